//! State shared by the steps of one BST case.

use bstcheck_domain::{RestResponse, flatten_value, render_flat};
use serde_json::Value;
use tracing::{Level, debug, enabled};

use crate::ports::HttpClient;
use crate::rest_service::RestService;

/// Context handed to every step of a BST case.
pub struct BstContext<C: HttpClient> {
    service: RestService<C>,
    params_list: Vec<String>,
    last_configuration: Option<String>,
}

impl<C: HttpClient> BstContext<C> {
    /// Creates a context around `service`.
    ///
    /// `params_list` names the params a query step expects in its result.
    #[must_use]
    pub const fn new(service: RestService<C>, params_list: Vec<String>) -> Self {
        Self {
            service,
            params_list,
            last_configuration: None,
        }
    }

    /// Returns the REST service.
    #[must_use]
    pub const fn service(&self) -> &RestService<C> {
        &self.service
    }

    /// Returns the expected param names.
    #[must_use]
    pub fn params_list(&self) -> &[String] {
        &self.params_list
    }

    /// Remembers the payload of the latest configuration request.
    pub fn remember_configuration(&mut self, payload: &str) {
        self.last_configuration = Some(payload.to_string());
    }

    /// Returns the payload of the latest configuration request.
    #[must_use]
    pub fn last_configuration(&self) -> Option<&str> {
        self.last_configuration.as_deref()
    }

    /// POSTs `payload` to the agent and logs the exchange at debug level.
    pub fn exchange(&self, payload: &str) -> RestResponse {
        let response = self.service.post(payload);
        if enabled!(Level::DEBUG) {
            dump("request", serde_json::from_str(payload).ok(), payload);
            let body = response.body.as_deref().unwrap_or_default();
            dump("response", response.json_body().ok(), body);
        }
        response
    }
}

fn dump(label: &str, parsed: Option<Value>, raw: &str) {
    match parsed {
        Some(value @ Value::Object(_)) => {
            debug!("{label}:\n{}", render_flat(&flatten_value(&value), '.'));
        }
        _ => debug!("{label}: {raw}"),
    }
}
