//! Application use cases (business logic orchestration).

pub mod bst;
mod run_suite;

pub use bst::{BstCase, BstContext, StepPattern};
pub use run_suite::*;
