//! Test data port

use bstcheck_domain::StepInputs;

use crate::ApplicationResult;

/// Source of per-case step inputs.
pub trait TestDataSource {
    /// Returns the inputs stored under `section`.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::MissingSection`](crate::ApplicationError::MissingSection)
    /// if the section does not exist, or a configuration error if it cannot be read.
    fn case_inputs(&self, section: &str) -> ApplicationResult<StepInputs>;
}
