//! Application error types

use thiserror::Error;
use satchel_domain::DomainError;

use crate::ports::FileSystemError;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain rule was violated.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The remote API answered with an unexpected status.
    #[error("API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body returned by the API.
        body: String,
    },

    /// An HTTP request could not be completed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A document could not be encoded or decoded.
    #[error("codec error: {0}")]
    Codec(String),

    /// A file system operation failed.
    #[error("file system error: {0}")]
    FileSystem(#[from] FileSystemError),

    /// A script could not be executed.
    #[error("script error: {0}")]
    Script(String),

    /// Configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
