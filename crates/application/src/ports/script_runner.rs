//! Script execution port.

use std::future::Future;

use satchel_domain::{ScriptReport, ScriptSource};

use crate::ApplicationResult;

/// Executes pre-request and test scripts.
pub trait ScriptRunner: Send + Sync {
    /// Runs a script and reports pass/fail per test name.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ApplicationError::Script`] if the engine cannot run
    /// the script at all. Failing tests are reported in the [`ScriptReport`].
    fn run(&self, script: &ScriptSource)
    -> impl Future<Output = ApplicationResult<ScriptReport>> + Send;
}
