//! bstcheck Domain - Core types
//!
//! This crate defines the domain model of the BST REST conformance harness:
//! requests and normalized responses, the mapping comparator and JSON
//! flattener, step results and run reports.
//! All types here are pure Rust with no I/O dependencies.

pub mod check;
pub mod compare;
pub mod endpoint;
pub mod error;
pub mod flatten;
pub mod inputs;
pub mod request;
pub mod response;
pub mod testing;

pub use check::{CheckError, CheckResult};
pub use compare::{DictDiff, dict_compare, json_compare};
pub use endpoint::{AgentEndpoint, BST_PATH, DEFAULT_PORT};
pub use error::{DomainError, DomainResult};
pub use flatten::{DEFAULT_DELIMITER, FlatJson, flatten_json, flatten_json_with, flatten_value, render_flat};
pub use inputs::{PARAMS_LIST_KEY, StepInputs, step_number};
pub use request::{HttpMethod, RequestSpec, agent_method};
pub use response::{ResponseStatus, RestResponse, StatusCode, UNREACHABLE_CODE};
pub use testing::{
    CASE_PASSED_MESSAGE, StepOutcome, StepRecord, StepResult, SuiteReport, TestCaseReport,
    return_status,
};
