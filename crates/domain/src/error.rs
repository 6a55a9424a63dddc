//! Domain error types

use thiserror::Error;

/// Domain-level errors raised by tree edits, container operations and
/// accessors on the collection model.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A property was added with neither a key nor a value.
    #[error("property must have a key or a value")]
    NullKeyValue,

    /// Adding the item would make it its own ancestor.
    #[error("recursive item add: {0}")]
    RecursiveItemAdd(String),

    /// An item with the same key already exists in the target group.
    #[error("duplicate item: {0}")]
    DuplicateItem(String),

    /// A positional argument was outside the valid range.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The length of the sequence at the time of the call.
        len: usize,
    },

    /// The requested tree operation is not valid in the current state.
    #[error("invalid action: {0}")]
    InvalidAction(String),

    /// A body accessor was used while a different mode was active.
    #[error("cannot access {required} payload while body mode is {actual}")]
    IllegalModeAccess {
        /// The mode(s) the accessor requires.
        required: &'static str,
        /// The mode that is currently active.
        actual: &'static str,
    },

    /// A `{{token}}` or `:path` variable could not be resolved.
    #[error("unresolved variable: {0}")]
    VariableResolution(String),

    /// A path variable with the same key is already registered.
    #[error("duplicate path variable: {0}")]
    DuplicateVariableKey(String),

    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The body mode string is not recognized.
    #[error("unknown body mode: {0}")]
    UnknownBodyMode(String),

    /// The auth type string is not recognized.
    #[error("unknown auth type: {0}")]
    UnknownAuthType(String),

    /// The raw body language string is not recognized.
    #[error("unknown raw language: {0}")]
    UnknownRawLanguage(String),

    /// The URL scheme is not `http` or `https`.
    #[error("unknown protocol: {0}")]
    UnknownProtocol(String),

    /// The event type string is not recognized.
    #[error("invalid event type: {0}")]
    InvalidEventType(String),

    /// No element matched the given key or id.
    #[error("not found: {0}")]
    NotFound(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
