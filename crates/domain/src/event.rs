//! Pre-request and test scripts attached to items and collections.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::element::CollectionElement;
use crate::error::{DomainError, DomainResult};
use crate::id::ElementId;

/// MIME type of script sources.
pub const SCRIPT_TYPE: &str = "text/javascript";

/// When a script runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    /// Before the request is sent.
    #[serde(rename = "prerequest")]
    PreRequest,
    /// After the response arrives.
    #[serde(rename = "test")]
    Test,
}

impl EventType {
    /// Returns the `listen` value used in documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PreRequest => "prerequest",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s {
            "prerequest" => Ok(Self::PreRequest),
            "test" => Ok(Self::Test),
            other => Err(DomainError::InvalidEventType(other.to_string())),
        }
    }
}

/// A script: an ordered list of source lines.
#[derive(Debug, Clone)]
pub struct Event {
    id: ElementId,
    listen: EventType,
    exec: Vec<String>,
}

impl Event {
    /// Creates an event from source text, split into lines.
    #[must_use]
    pub fn new(listen: EventType, source: &str) -> Self {
        Self::from_lines(listen, source.split('\n').map(str::to_owned).collect())
    }

    /// Creates an event from pre-split lines.
    #[must_use]
    pub fn from_lines(listen: EventType, exec: Vec<String>) -> Self {
        Self {
            id: ElementId::generate(),
            listen,
            exec,
        }
    }

    /// Returns when the script runs.
    #[must_use]
    pub const fn listen(&self) -> EventType {
        self.listen
    }

    /// Returns the source lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.exec
    }

    /// Returns the source joined with `\n`.
    #[must_use]
    pub fn source_code(&self) -> String {
        self.exec.join("\n")
    }

    /// Replaces the source.
    pub fn set_source(&mut self, source: &str) {
        self.exec = source.split('\n').map(str::to_owned).collect();
    }

    /// Inserts a line at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::IndexOutOfRange`] if `position` is past the end.
    pub fn add_line(&mut self, code: impl Into<String>, position: usize) -> DomainResult<()> {
        let len = self.exec.len();
        if position > len {
            return Err(DomainError::IndexOutOfRange {
                index: position,
                len,
            });
        }
        self.exec.insert(position, code.into());
        Ok(())
    }

    /// Removes the line at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::IndexOutOfRange`] if there is no such line.
    pub fn remove_line(&mut self, position: usize) -> DomainResult<String> {
        let len = self.exec.len();
        if position >= len {
            return Err(DomainError::IndexOutOfRange {
                index: position,
                len,
            });
        }
        Ok(self.exec.remove(position))
    }
}

impl CollectionElement for Event {
    fn id(&self) -> ElementId {
        self.id
    }

    fn key(&self) -> Option<&str> {
        Some(self.listen.as_str())
    }
}

/// At most one event per [`EventType`], in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Events {
    events: Vec<Event>,
}

impl Events {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Returns true if no scripts are attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Iterates over the events in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    /// Returns the event for `listen`.
    #[must_use]
    pub fn get(&self, listen: EventType) -> Option<&Event> {
        self.events.iter().find(|e| e.listen == listen)
    }

    /// Returns the event for `listen` mutably.
    pub fn get_mut(&mut self, listen: EventType) -> Option<&mut Event> {
        self.events.iter_mut().find(|e| e.listen == listen)
    }

    /// Returns the pre-request script.
    #[must_use]
    pub fn pre_request(&self) -> Option<&Event> {
        self.get(EventType::PreRequest)
    }

    /// Returns the test script.
    #[must_use]
    pub fn test(&self) -> Option<&Event> {
        self.get(EventType::Test)
    }

    /// Stores an event, replacing one of the same type in place.
    pub fn set(&mut self, event: Event) {
        match self.events.iter().position(|e| e.listen == event.listen) {
            Some(index) => self.events[index] = event,
            None => self.events.push(event),
        }
    }

    /// Sets the pre-request script from source text.
    pub fn set_pre_request_script(&mut self, source: &str) {
        self.set(Event::new(EventType::PreRequest, source));
    }

    /// Sets the test script from source text.
    pub fn set_test_script(&mut self, source: &str) {
        self.set(Event::new(EventType::Test, source));
    }

    /// Removes the event for `listen`.
    pub fn remove(&mut self, listen: EventType) -> Option<Event> {
        let index = self.events.iter().position(|e| e.listen == listen)?;
        Some(self.events.remove(index))
    }
}

impl<'a> IntoIterator for &'a Events {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
