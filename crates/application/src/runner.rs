//! Test step runner
//!
//! A [`TestCase`] is an ordered list of named [`Step`]s over a shared
//! context. [`StepRunner`] executes them in order, feeds each step the input
//! stored under its name, and stops at the first failure.

use std::time::Instant;

use bstcheck_domain::{StepInputs, StepOutcome, StepRecord, StepResult, TestCaseReport};
use tracing::{info, warn};

use crate::ports::StepReporter;

/// Step body: the shared context and the step's input entry, if any.
pub type StepFn<C> = Box<dyn Fn(&mut C, Option<&str>) -> StepResult>;

/// One named step of a test case.
pub struct Step<C> {
    name: String,
    description: String,
    run: StepFn<C>,
}

impl<C> Step<C> {
    /// Returns the step name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the one-line description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// An ordered sequence of steps.
pub struct TestCase<C> {
    name: String,
    steps: Vec<Step<C>>,
}

impl<C> TestCase<C> {
    /// Creates an empty case.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    /// Appends a step and returns the case.
    #[must_use]
    pub fn step<F>(mut self, name: impl Into<String>, description: impl Into<String>, run: F) -> Self
    where
        F: Fn(&mut C, Option<&str>) -> StepResult + 'static,
    {
        self.push(name, description, run);
        self
    }

    /// Appends a step.
    pub fn push<F>(&mut self, name: impl Into<String>, description: impl Into<String>, run: F)
    where
        F: Fn(&mut C, Option<&str>) -> StepResult + 'static,
    {
        self.steps.push(Step {
            name: name.into(),
            description: description.into(),
            run: Box::new(run),
        });
    }

    /// Returns the case name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the steps in execution order.
    #[must_use]
    pub fn steps(&self) -> &[Step<C>] {
        &self.steps
    }

    /// Returns the number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if the case has no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Executes test cases and reports progress.
pub struct StepRunner<'r> {
    reporter: &'r mut dyn StepReporter,
}

impl<'r> StepRunner<'r> {
    /// Creates a runner that reports to `reporter`.
    pub fn new(reporter: &'r mut dyn StepReporter) -> Self {
        Self { reporter }
    }

    /// Runs `case` against `ctx`, stopping at the first failed step.
    ///
    /// Steps after a failure are neither executed nor recorded.
    pub fn run<C>(&mut self, case: &TestCase<C>, ctx: &mut C, inputs: &StepInputs) -> TestCaseReport {
        info!(case = case.name(), steps = case.len(), "running test case");
        self.reporter.case_started(case.name());

        let started = Instant::now();
        let mut records = Vec::with_capacity(case.len());
        for step in case.steps() {
            let step_started = Instant::now();
            let result = (step.run)(ctx, inputs.get(step.name()));
            let record = StepRecord::new(
                step.name(),
                step.description(),
                result,
                elapsed_ms(step_started),
            );
            self.reporter.step_finished(&record);

            let failed = record.outcome == StepOutcome::Fail;
            if failed {
                warn!(
                    case = case.name(),
                    step = step.name(),
                    message = %record.message,
                    "step failed"
                );
            }
            records.push(record);
            if failed {
                break;
            }
        }

        let report = TestCaseReport::from_steps(case.name(), records, elapsed_ms(started));
        info!(case = case.name(), passed = report.passed, "test case finished");
        self.reporter.case_finished(&report);
        report
    }

    /// Reports a case that could not be started.
    pub fn abort(&mut self, name: &str, message: impl Into<String>) -> TestCaseReport {
        let report = TestCaseReport::aborted(name, message);
        warn!(case = name, message = %report.message, "test case aborted");
        self.reporter.case_finished(&report);
        report
    }
}

fn elapsed_ms(since: Instant) -> u64 {
    u64::try_from(since.elapsed().as_millis()).unwrap_or(u64::MAX)
}
