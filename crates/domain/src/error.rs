//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A request payload is not valid JSON.
    #[error("invalid JSON payload: {0}")]
    InvalidPayload(String),

    /// A request payload does not name the agent method to call.
    #[error("JSON payload has no string \"method\" member")]
    MissingMethod,
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
