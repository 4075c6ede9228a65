//! bstcheck Application - Use cases and ports
//!
//! This crate drives the BST conformance cases: the REST service that talks
//! to the agent, the step runner, the case catalog and the suite use case.
//! External systems are reached only through the traits in [`ports`].

pub mod error;
pub mod ports;
pub mod rest_service;
pub mod runner;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{ApplicationError, ApplicationResult};
pub use rest_service::{RequestValidationError, RestService};
pub use runner::{Step, StepFn, StepRunner, TestCase};
pub use use_cases::{BstCase, BstContext, RunSuite, RunSuiteInput, StepPattern};
