//! Step reporting port

use bstcheck_domain::{StepRecord, TestCaseReport};

/// Receives progress while test cases run.
pub trait StepReporter {
    /// A case is about to run its first step.
    fn case_started(&mut self, name: &str);

    /// A step finished.
    fn step_finished(&mut self, record: &StepRecord);

    /// A case finished, or could not be started.
    fn case_finished(&mut self, report: &TestCaseReport);
}
