//! Failure classes of a verification step.

use thiserror::Error;

/// Why a step failed.
///
/// Every variant is recovered into a FAIL [`StepResult`](crate::testing::StepResult);
/// none of them aborts the run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckError {
    /// The agent could not be reached.
    #[error(
        "agent unreachable ({0}); check the address in the ini file and that the BroadView agent is running"
    )]
    Transport(String),

    /// The request could not be built or sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The agent answered with a status other than 200.
    #[error("Obtained {status}")]
    Protocol {
        /// HTTP status received.
        status: u16,
    },

    /// The response carried no body.
    #[error("Got null response")]
    EmptyBody,

    /// The response body is not JSON.
    #[error("Invalid JSON Response data received: {0}")]
    MalformedBody(String),

    /// A required member is absent from the response JSON.
    #[error("No {0} key in Response JSON Data")]
    MissingKey(String),

    /// The step has no input, or the input is unusable.
    #[error("{0}")]
    MissingInput(String),

    /// The response does not match the expectation.
    #[error("{0}")]
    Mismatch(String),
}

/// Result type alias for step checks.
pub type CheckResult<T> = Result<T, CheckError>;
