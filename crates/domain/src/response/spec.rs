//! Response specification type
//!
//! A [`RestResponse`] is the normalized outcome of one request: either an
//! HTTP exchange with any status code, or one of two sentinel statuses for
//! exchanges that never produced an HTTP status.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::check::{CheckError, CheckResult};

/// Code reported for an agent that could not be reached.
pub const UNREACHABLE_CODE: u16 = 555;

/// Text some agents prepend to the JSON body.
pub const BODY_MARKER: &str = "Content-Type: text/json";

/// HTTP status code of an agent answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusCode(pub u16);

impl StatusCode {
    /// `200 OK`
    pub const OK: Self = Self(200);

    /// Returns the numeric status code.
    #[must_use]
    pub const fn as_u16(&self) -> u16 {
        self.0
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

/// Status of a request after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseStatus {
    /// The agent answered with an HTTP status.
    Http(StatusCode),
    /// The agent could not be reached (DNS, connect, timeout).
    Unreachable {
        /// Transport error text.
        reason: String,
    },
    /// The request never left the harness or failed for a local reason.
    Invalid {
        /// Local error text.
        reason: String,
    },
}

impl ResponseStatus {
    /// Returns the numeric code shown in reports, with the unreachable
    /// sentinel standing in for transport failures.
    #[must_use]
    pub const fn code(&self) -> Option<u16> {
        match self {
            Self::Http(code) => Some(code.as_u16()),
            Self::Unreachable { .. } => Some(UNREACHABLE_CODE),
            Self::Invalid { .. } => None,
        }
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code() {
            Some(code) => write!(f, "{code}"),
            None => f.write_str("INVALID"),
        }
    }
}

/// Normalized response of one agent request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestResponse {
    /// Normalized status.
    pub status: ResponseStatus,
    /// Response body, `None` when empty or absent.
    pub body: Option<String>,
    /// Round-trip time; zero when no request was sent.
    pub duration: Duration,
}

impl RestResponse {
    /// Creates a response for a completed HTTP exchange.
    #[must_use]
    pub fn http(status: impl Into<StatusCode>, body: Option<String>, duration: Duration) -> Self {
        Self {
            status: ResponseStatus::Http(status.into()),
            body: body.filter(|b| !b.is_empty()),
            duration,
        }
    }

    /// Creates a response for an agent that could not be reached.
    #[must_use]
    pub fn unreachable(reason: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Unreachable {
                reason: reason.into(),
            },
            body: None,
            duration: Duration::ZERO,
        }
    }

    /// Creates a response for a request that failed locally.
    #[must_use]
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Invalid {
                reason: reason.into(),
            },
            body: None,
            duration: Duration::ZERO,
        }
    }

    /// Returns true for an HTTP `200 OK` exchange.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == ResponseStatus::Http(StatusCode::OK)
    }

    /// Converts the non-HTTP statuses into their [`CheckError`].
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::Transport`] for unreachable agents and
    /// [`CheckError::InvalidRequest`] for local failures.
    pub fn exchanged(&self) -> CheckResult<StatusCode> {
        match &self.status {
            ResponseStatus::Http(code) => Ok(*code),
            ResponseStatus::Unreachable { reason } => Err(CheckError::Transport(reason.clone())),
            ResponseStatus::Invalid { reason } => Err(CheckError::InvalidRequest(reason.clone())),
        }
    }

    /// Requires an HTTP `200 OK` exchange.
    ///
    /// # Errors
    ///
    /// Returns the transport/local error of a failed exchange, or
    /// [`CheckError::Protocol`] for any other HTTP status.
    pub fn require_ok(&self) -> CheckResult<()> {
        let code = self.exchanged()?;
        if code == StatusCode::OK {
            Ok(())
        } else {
            Err(CheckError::Protocol {
                status: code.as_u16(),
            })
        }
    }

    /// Parses the body as JSON after removing the [`BODY_MARKER`] prefix.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::EmptyBody`] when there is no body and
    /// [`CheckError::MalformedBody`] when it is not JSON.
    pub fn json_body(&self) -> CheckResult<Value> {
        let body = self.body.as_deref().ok_or(CheckError::EmptyBody)?;
        let cleaned = body.replace(BODY_MARKER, "");
        if cleaned.trim().is_empty() {
            return Err(CheckError::EmptyBody);
        }
        serde_json::from_str(&cleaned).map_err(|e| CheckError::MalformedBody(e.to_string()))
    }
}
