//! REST service
//!
//! Addresses the agent's BST API and folds every failure into a
//! [`RestResponse`], so callers never see an error escape a request.

use std::sync::Arc;

use bstcheck_domain::{AgentEndpoint, HttpMethod, RequestSpec, RestResponse, agent_method};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::ports::HttpClient;

/// Reasons a request is rejected before it reaches the client.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RequestValidationError {
    /// URL is empty.
    #[error("URL is required")]
    EmptyUrl,

    /// URL is not an HTTP URL.
    #[error("URL must start with http:// or https://: {0}")]
    InvalidScheme(String),
}

/// Client for the agent's BST REST API.
///
/// `get` targets the base URL; `post`, `put` and `delete` append the payload's
/// `"method"` member to it, so `{"method": "get-bst-feature", ...}` is sent to
/// `http://<agent>/broadview/bst/get-bst-feature`.
pub struct RestService<C: HttpClient> {
    client: Arc<C>,
    url: String,
    verbose: bool,
}

impl<C: HttpClient> RestService<C> {
    /// Creates a service for the given agent.
    pub fn new(client: Arc<C>, endpoint: &AgentEndpoint) -> Self {
        Self {
            client,
            url: endpoint.base_url(),
            verbose: false,
        }
    }

    /// Logs every request at info level.
    pub const fn set_verbose(&mut self) {
        self.verbose = true;
    }

    /// Logs requests at debug level only.
    pub const fn clear_verbose(&mut self) {
        self.verbose = false;
    }

    /// Returns whether requests are logged at info level.
    #[must_use]
    pub const fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Replaces the base URL.
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    /// Returns the base URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Sends a GET request to the base URL.
    pub fn get(&self) -> RestResponse {
        self.send(&RequestSpec::get(self.url.clone()))
    }

    /// Sends `payload` as a POST request.
    pub fn post(&self, payload: &str) -> RestResponse {
        self.send_payload(HttpMethod::Post, payload)
    }

    /// Sends `payload` as a PUT request.
    pub fn put(&self, payload: &str) -> RestResponse {
        self.send_payload(HttpMethod::Put, payload)
    }

    /// Sends `payload` as a DELETE request.
    pub fn delete(&self, payload: &str) -> RestResponse {
        self.send_payload(HttpMethod::Delete, payload)
    }

    /// Sends `payload` to the agent method it names.
    ///
    /// A payload that is not JSON or names no method yields an `Invalid`
    /// response without any I/O.
    pub fn send_payload(&self, method: HttpMethod, payload: &str) -> RestResponse {
        let name = match agent_method(payload) {
            Ok(name) => name,
            Err(e) => {
                warn!(error = %e, "payload rejected");
                return RestResponse::invalid(e.to_string());
            }
        };
        let request = RequestSpec::new(method, format!("{}{name}", self.url)).with_body(payload);
        self.send(&request)
    }

    /// Performs one request.
    pub fn send(&self, request: &RequestSpec) -> RestResponse {
        if let Err(e) = Self::validate(request) {
            warn!(url = %request.url, error = %e, "request rejected");
            return RestResponse::invalid(e.to_string());
        }

        if self.verbose {
            info!(method = %request.method, url = %request.url, "sending request");
        } else {
            debug!(method = %request.method, url = %request.url, "sending request");
        }

        match self.client.execute(request) {
            Ok(response) => {
                debug!(
                    status = %response.status,
                    elapsed_ms = response.duration.as_millis(),
                    "response received"
                );
                response
            }
            Err(e) if e.is_transport() => {
                warn!(url = %request.url, error = %e, "agent unreachable");
                RestResponse::unreachable(e.to_string())
            }
            Err(e) => {
                warn!(url = %request.url, error = %e, "request failed");
                RestResponse::invalid(e.to_string())
            }
        }
    }

    /// Validates the request before execution.
    fn validate(request: &RequestSpec) -> Result<(), RequestValidationError> {
        if request.url.trim().is_empty() {
            return Err(RequestValidationError::EmptyUrl);
        }

        if !request.url.starts_with("http://") && !request.url.starts_with("https://") {
            return Err(RequestValidationError::InvalidScheme(request.url.clone()));
        }

        Ok(())
    }
}
