//! Request specification type

use serde::{Deserialize, Serialize};
use url::Url;

use super::HttpMethod;

/// A single HTTP request to send to the agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// HTTP method
    pub method: HttpMethod,
    /// Target URL
    pub url: String,
    /// JSON payload, sent verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl RequestSpec {
    /// Creates a request without a payload.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
        }
    }

    /// Creates a GET request with the given URL.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    /// Creates a POST request carrying `body`.
    #[must_use]
    pub fn post(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url).with_body(body)
    }

    /// Sets the payload (builder pattern).
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Validates the URL and returns parsed version if valid.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed.
    pub fn parse_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.url)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_get_request_has_no_body() {
        let req = RequestSpec::get("http://10.0.0.1:8080/broadview/bst/");
        assert_eq!(req.method, HttpMethod::Get);
        assert!(req.body.is_none());
    }

    #[test]
    fn test_post_request_carries_body() {
        let req = RequestSpec::post("http://h/broadview/bst/x", "{}");
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.body.as_deref(), Some("{}"));
    }

    #[test]
    fn test_parse_url() {
        let req = RequestSpec::get("http://127.0.0.1:8080/broadview/bst/");
        let url = req.parse_url().expect("valid url");
        assert_eq!(url.port(), Some(8080));

        let req = RequestSpec::get("not a url");
        assert!(req.parse_url().is_err());
    }
}
