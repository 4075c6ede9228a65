//! Step bodies of the BST cases.
//!
//! Every step POSTs its input payload to the agent and checks the answer.
//! Each body has the signature of a runner step, so it can be passed to
//! [`TestCase::push`](crate::runner::TestCase::push) directly.

use bstcheck_domain::{CheckError, CheckResult, StepResult, flatten_json, json_compare};
use serde_json::{Map, Value};

use super::context::BstContext;
use crate::ports::HttpClient;

/// Prefix of the request params that select a realm.
const INCLUDE_PREFIX: &str = "include-";

/// Sends a configuration payload, remembers it, and requires `200 OK`.
pub fn configure<C: HttpClient>(ctx: &mut BstContext<C>, input: Option<&str>) -> StepResult {
    StepResult::from(configure_checked(ctx, input))
}

/// Queries the configuration and requires its `result` to equal the params
/// of the latest configuration.
pub fn verify_configuration<C: HttpClient>(
    ctx: &mut BstContext<C>,
    input: Option<&str>,
) -> StepResult {
    StepResult::from(verify_configuration_checked(ctx, input))
}

/// Sends a payload and requires `200 OK`.
pub fn expect_status_ok<C: HttpClient>(ctx: &mut BstContext<C>, input: Option<&str>) -> StepResult {
    StepResult::from(expect_status_ok_checked(ctx, input))
}

/// Queries the agent and requires every expected param in its `result`.
pub fn verify_result_params<C: HttpClient>(
    ctx: &mut BstContext<C>,
    input: Option<&str>,
) -> StepResult {
    StepResult::from(verify_result_params_checked(ctx, input))
}

/// Queries a report and requires exactly the realms the request included.
pub fn verify_realms<C: HttpClient>(ctx: &mut BstContext<C>, input: Option<&str>) -> StepResult {
    StepResult::from(verify_realms_checked(ctx, input))
}

fn configure_checked<C: HttpClient>(ctx: &mut BstContext<C>, input: Option<&str>) -> CheckResult<()> {
    let payload = require_input(input)?;
    let response = ctx.exchange(payload);
    response.exchanged()?;
    ctx.remember_configuration(payload);
    response.require_ok()
}

fn verify_configuration_checked<C: HttpClient>(
    ctx: &mut BstContext<C>,
    input: Option<&str>,
) -> CheckResult<()> {
    let payload = require_input(input)?;
    let response = ctx.exchange(payload);
    response.require_ok()?;
    let body = response.json_body()?;
    let result = object_member(&body, "result", "Result")?;

    let configuration = ctx.last_configuration().ok_or_else(|| {
        CheckError::MissingInput("no configuration was sent by a previous step".into())
    })?;
    let expected = request_params(configuration)?;

    let diff = json_compare(result, &expected);
    if diff.is_identical() {
        return Ok(());
    }

    let wrong = diff.differing_keys(expected.keys());
    if wrong.is_empty() {
        let extra: Vec<&str> = diff.added.iter().map(String::as_str).collect();
        return Err(CheckError::Mismatch(format!(
            "response carries unexpected params {}",
            extra.join(" ")
        )));
    }
    Err(CheckError::Mismatch(format!(
        "params {} contains wrong values in response.",
        wrong.join(" ")
    )))
}

fn expect_status_ok_checked<C: HttpClient>(
    ctx: &mut BstContext<C>,
    input: Option<&str>,
) -> CheckResult<()> {
    let payload = require_input(input)?;
    ctx.exchange(payload).require_ok()
}

fn verify_result_params_checked<C: HttpClient>(
    ctx: &mut BstContext<C>,
    input: Option<&str>,
) -> CheckResult<()> {
    let payload = require_input(input)?;
    let response = ctx.exchange(payload);
    response.require_ok()?;
    let body = response.json_body()?;
    let result = object_member(&body, "result", "Result")?;

    let flat = flatten_json(result);
    let missing: Vec<&str> = ctx
        .params_list()
        .iter()
        .map(String::as_str)
        .filter(|name| {
            !result.contains_key(*name)
                && !flat
                    .keys()
                    .any(|key| key.strip_prefix(*name).is_some_and(|rest| rest.starts_with('.')))
        })
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(CheckError::Mismatch(format!(
            "Expected param(s) {} not present",
            missing.join(" ")
        )))
    }
}

fn verify_realms_checked<C: HttpClient>(
    ctx: &mut BstContext<C>,
    input: Option<&str>,
) -> CheckResult<()> {
    let payload = require_input(input)?;
    let response = ctx.exchange(payload);
    response.require_ok()?;
    let body = response.json_body()?;

    let report = body
        .get("report")
        .ok_or_else(|| CheckError::MissingKey("Report".into()))?
        .as_array()
        .ok_or_else(|| CheckError::Mismatch("report is not a JSON array".into()))?;

    let mut reported: Vec<String> = report
        .iter()
        .filter(|entry| entry.get("data").is_some())
        .filter_map(|entry| entry.get("realm").and_then(Value::as_str))
        .map(ToString::to_string)
        .collect();
    reported.sort();

    let mut expected: Vec<String> = request_params(payload)?
        .iter()
        .filter(|(_, value)| is_one(value))
        .filter_map(|(key, _)| key.strip_prefix(INCLUDE_PREFIX))
        .map(ToString::to_string)
        .collect();
    expected.sort();

    if reported == expected {
        Ok(())
    } else {
        Err(CheckError::Mismatch(format!(
            "Expected realm(s) {} not present",
            expected.join(" ")
        )))
    }
}

/// Loose equality with `1`: `1`, `1.0` and `true` all select a realm.
fn is_one(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|f| (f - 1.0).abs() < f64::EPSILON),
        _ => false,
    }
}

fn require_input(input: Option<&str>) -> CheckResult<&str> {
    input
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CheckError::MissingInput("no JSON payload configured for this step".into()))
}

fn object_member<'a>(body: &'a Value, key: &str, label: &str) -> CheckResult<&'a Map<String, Value>> {
    body.get(key)
        .ok_or_else(|| CheckError::MissingKey(label.to_string()))?
        .as_object()
        .ok_or_else(|| CheckError::Mismatch(format!("{key} is not a JSON object")))
}

/// Returns the `params` object of a request payload.
fn request_params(payload: &str) -> CheckResult<Map<String, Value>> {
    let request: Value = serde_json::from_str(payload)
        .map_err(|e| CheckError::MissingInput(format!("request payload is not valid JSON: {e}")))?;
    match request {
        Value::Object(mut members) => match members.remove("params") {
            Some(Value::Object(params)) => Ok(params),
            _ => Err(CheckError::MissingInput(
                "request payload has no params object".into(),
            )),
        },
        _ => Err(CheckError::MissingInput(
            "request payload is not a JSON object".into(),
        )),
    }
}
