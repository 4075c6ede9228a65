//! Application error types

use thiserror::Error;
use bstcheck_domain::DomainError;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Test data could not be loaded or is unusable.
    #[error("configuration error: {0}")]
    Config(String),

    /// A test data section is absent.
    #[error("section [{0}] not found in test data")]
    MissingSection(String),

    /// A test case name is not in the catalog.
    #[error("unknown test case: {0}")]
    UnknownTestCase(String),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
