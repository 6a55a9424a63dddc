//! Script execution inputs and results.
//!
//! Scripts are executed outside the object model; these types describe what is
//! handed to an executor and what comes back.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::event::{Event, EventType};

/// Resolved script source for one item and phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptSource {
    /// When the script runs.
    pub listen: EventType,
    /// Name of the item the script belongs to.
    pub item_name: String,
    /// Full source text.
    pub source: String,
}

impl ScriptSource {
    /// Concatenates a chain of events, outermost first, into one source.
    #[must_use]
    pub fn from_chain(listen: EventType, item_name: impl Into<String>, chain: &[&Event]) -> Self {
        let source = chain
            .iter()
            .map(|event| event.source_code())
            .collect::<Vec<_>>()
            .join("\n");
        Self {
            listen,
            item_name: item_name.into(),
            source,
        }
    }

    /// Returns true if there is nothing to run.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.source.trim().is_empty()
    }
}

/// Outcome of running a script.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptReport {
    /// Pass/fail keyed by test name.
    pub results: BTreeMap<String, bool>,
    /// Console output.
    pub logs: Vec<String>,
    /// Error that aborted the script, if any.
    pub error: Option<String>,
}

impl ScriptReport {
    /// Create a report for a script that failed to run.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Default::default()
        }
    }

    /// Records a test result.
    pub fn record(&mut self, test_name: impl Into<String>, passed: bool) {
        self.results.insert(test_name.into(), passed);
    }

    /// Add a log message.
    pub fn add_log(&mut self, message: impl Into<String>) {
        self.logs.push(message.into());
    }

    /// Number of passing tests.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.results.values().filter(|passed| **passed).count()
    }

    /// Number of failing tests.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.results.len() - self.passed()
    }

    /// True when the script ran and every test passed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.failed() == 0
    }
}
