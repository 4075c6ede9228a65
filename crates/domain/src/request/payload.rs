//! Agent request payload helpers.

use serde_json::Value;

use crate::error::{DomainError, DomainResult};

/// Extracts the agent method name (the `"method"` member) from a JSON-RPC
/// style payload such as `{"jsonrpc": "2.0", "method": "get-bst-feature", ...}`.
///
/// # Errors
///
/// Returns [`DomainError::InvalidPayload`] when the payload is not JSON and
/// [`DomainError::MissingMethod`] when it has no string `method` member.
pub fn agent_method(payload: &str) -> DomainResult<String> {
    let value: Value =
        serde_json::from_str(payload).map_err(|e| DomainError::InvalidPayload(e.to_string()))?;
    value
        .get("method")
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .ok_or(DomainError::MissingMethod)
}
