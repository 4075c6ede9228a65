//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port with the blocking reqwest
//! client. Every request carries JSON `Content-Type` and `Accept` headers and,
//! when configured, a bearer token.

use std::error::Error as _;
use std::time::{Duration, Instant};

use bstcheck_application::ports::{HttpClient, HttpClientError};
use bstcheck_domain::{HttpMethod, RequestSpec, RestResponse};
use reqwest::Method;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::trace;

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("bstcheck/", env!("CARGO_PKG_VERSION"));

/// Transport timeout of [`ReqwestHttpClient::new`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const JSON: &str = "application/json";

/// Blocking HTTP client implementation using reqwest.
pub struct ReqwestHttpClient {
    client: Client,
    bearer_token: Option<String>,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client with default settings.
    ///
    /// Default configuration:
    /// - Transport timeout: 30 seconds
    /// - Follow redirects: up to 10
    /// - User-Agent: `bstcheck/<version>`
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, HttpClientError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Creates a new HTTP client with a custom transport timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self::with_client(client))
    }

    /// Creates a new HTTP client with a custom reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self {
            client,
            bearer_token: None,
        }
    }

    /// Sends `Authorization: Bearer <token>` with every request.
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Maps reqwest errors to `HttpClientError`.
    ///
    /// reqwest keeps the OS error in the source chain, so the whole chain is
    /// inspected.
    fn map_error(error: &reqwest::Error) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout;
        }

        if error.is_connect() {
            let message = error_chain(error);
            let lowered = message.to_lowercase();
            let url = error.url();
            let host = url
                .and_then(|u| u.host_str())
                .unwrap_or("unknown")
                .to_string();
            if lowered.contains("dns") || lowered.contains("resolve") {
                return HttpClientError::DnsError { host, message };
            }
            if lowered.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host,
                    port: url.and_then(reqwest::Url::port_or_known_default).unwrap_or(80),
                };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        if error.is_builder() {
            return HttpClientError::InvalidUrl(error_chain(error));
        }

        HttpClientError::Other(error_chain(error))
    }
}

/// Joins an error and its sources with `": "`.
fn error_chain(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

impl HttpClient for ReqwestHttpClient {
    fn execute(&self, request: &RequestSpec) -> Result<RestResponse, HttpClientError> {
        let url = request
            .parse_url()
            .map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {}", request.url)))?;

        let start = Instant::now();

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url)
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON);

        if let Some(token) = &self.bearer_token {
            builder = builder.bearer_auth(token);
        }

        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().map_err(|e| Self::map_error(&e))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| HttpClientError::Other(format!("Failed to read body: {e}")))?;
        let duration = start.elapsed();

        trace!(status, bytes = body.len(), "response body read");
        Ok(RestResponse::http(status, Some(body), duration))
    }
}
