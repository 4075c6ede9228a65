//! Agent endpoint addressing.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};

/// Port the agent listens on when none is given.
pub const DEFAULT_PORT: u16 = 8080;

/// Path prefix of the BST REST API.
pub const BST_PATH: &str = "/broadview/bst/";

/// Host and port of a BroadView agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentEndpoint {
    /// Host name or IP address.
    pub host: String,
    /// TCP port.
    pub port: u16,
}

impl AgentEndpoint {
    /// Creates an endpoint.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Returns the BST API base URL, `http://<host>:<port>/broadview/bst/`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}:{}{BST_PATH}", self.host, self.port)
    }

    /// Extracts host and port from an agent URL such as
    /// `http://10.0.0.5:8080/broadview/bst/get-bst-feature`.
    ///
    /// The port defaults to [`DEFAULT_PORT`].
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidUrl`] if the URL does not parse, has no
    /// host, or does not point below `/broadview/bst`.
    pub fn parse_url(raw: &str) -> DomainResult<Self> {
        let url = Url::parse(raw).map_err(|e| DomainError::InvalidUrl(format!("{e}: {raw}")))?;
        if url.scheme() != "http" {
            return Err(DomainError::InvalidUrl(format!("unsupported scheme: {raw}")));
        }
        if !url.path().starts_with(BST_PATH.trim_end_matches('/')) {
            return Err(DomainError::InvalidUrl(format!(
                "not a BST API URL: {raw}"
            )));
        }
        let host = url
            .host_str()
            .ok_or_else(|| DomainError::InvalidUrl(format!("missing host: {raw}")))?;
        Ok(Self::new(host, url.port().unwrap_or(DEFAULT_PORT)))
    }
}

impl Default for AgentEndpoint {
    fn default() -> Self {
        Self::new("127.0.0.1", DEFAULT_PORT)
    }
}

impl fmt::Display for AgentEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
