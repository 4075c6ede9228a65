//! HTTP Client port

use thiserror::Error;
use bstcheck_domain::{RequestSpec, RestResponse};

/// Errors an [`HttpClient`] reports instead of a response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HttpClientError {
    /// The request did not complete within the transport timeout.
    #[error("request timed out")]
    Timeout,

    /// The host name could not be resolved.
    #[error("DNS resolution failed for {host}: {message}")]
    DnsError {
        /// Host that failed to resolve.
        host: String,
        /// Resolver message.
        message: String,
    },

    /// The agent refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Any other local failure.
    #[error("{0}")]
    Other(String),
}

impl HttpClientError {
    /// Returns true when the agent could not be reached at all.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Timeout
                | Self::DnsError { .. }
                | Self::ConnectionRefused { .. }
                | Self::ConnectionFailed(_)
        )
    }
}

/// Port for executing HTTP requests.
///
/// Implementations perform exactly one blocking round-trip per call and
/// return every HTTP status as `Ok`; only exchanges that produced no status
/// are errors.
pub trait HttpClient {
    /// Executes an HTTP request and returns the response.
    ///
    /// # Errors
    ///
    /// Returns an error if no HTTP status was received.
    fn execute(&self, request: &RequestSpec) -> Result<RestResponse, HttpClientError>;
}
