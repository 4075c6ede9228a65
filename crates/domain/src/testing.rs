//! Step outcomes and run reports.
//!
//! A test case is a sequence of steps; each step yields a [`StepResult`].
//! The runner turns those into [`StepRecord`]s, a [`TestCaseReport`] per case
//! and a [`SuiteReport`] per run.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::check::{CheckError, CheckResult};

/// Aggregate message of a case whose steps all passed.
pub const CASE_PASSED_MESSAGE: &str = "Test Case Passed";

/// Verdict of one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StepOutcome {
    /// The step passed.
    Pass,
    /// The step failed; the case stops here.
    Fail,
}

impl StepOutcome {
    /// Returns the outcome label used in reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
        }
    }
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome and message of one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResult {
    /// Verdict.
    pub outcome: StepOutcome,
    /// Remark; empty for most passes.
    pub message: String,
}

impl StepResult {
    /// Create a passed result with no remark.
    #[must_use]
    pub const fn pass() -> Self {
        Self {
            outcome: StepOutcome::Pass,
            message: String::new(),
        }
    }

    /// Create a passed result with a remark.
    #[must_use]
    pub fn pass_with(message: impl Into<String>) -> Self {
        Self {
            outcome: StepOutcome::Pass,
            message: message.into(),
        }
    }

    /// Create a failed result.
    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            outcome: StepOutcome::Fail,
            message: message.into(),
        }
    }

    /// Returns true if the step passed.
    #[must_use]
    pub fn is_pass(&self) -> bool {
        self.outcome == StepOutcome::Pass
    }
}

impl From<CheckError> for StepResult {
    fn from(error: CheckError) -> Self {
        Self::fail(error.to_string())
    }
}

impl From<CheckResult<()>> for StepResult {
    fn from(result: CheckResult<()>) -> Self {
        result.map_or_else(|e| Self::fail(e.to_string()), |()| Self::pass())
    }
}

/// Compares `actual` with `expected`: PASS with `pass_msg` when equal,
/// FAIL with `fail_msg` otherwise.
#[must_use]
pub fn return_status<T: PartialEq + ?Sized>(
    actual: &T,
    expected: &T,
    pass_msg: &str,
    fail_msg: &str,
) -> StepResult {
    if actual == expected {
        StepResult::pass_with(pass_msg)
    } else {
        StepResult::fail(fail_msg)
    }
}

/// A finished step as shown in reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Step name, e.g. `step3`.
    pub name: String,
    /// One-line description.
    pub description: String,
    /// Verdict.
    pub outcome: StepOutcome,
    /// Remark.
    pub message: String,
    /// Execution time in milliseconds.
    pub duration_ms: u64,
}

impl StepRecord {
    /// Builds a record from a step's result.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        result: StepResult,
        duration_ms: u64,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            outcome: result.outcome,
            message: result.message,
            duration_ms,
        }
    }
}

/// Verdict of one test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCaseReport {
    /// Case name.
    pub name: String,
    /// Whether every executed step passed.
    pub passed: bool,
    /// [`CASE_PASSED_MESSAGE`] or the first failure's message.
    pub message: String,
    /// Executed steps, in order.
    pub steps: Vec<StepRecord>,
    /// Execution time in milliseconds.
    pub duration_ms: u64,
}

impl TestCaseReport {
    /// Aggregates executed steps into a case verdict.
    #[must_use]
    pub fn from_steps(name: impl Into<String>, steps: Vec<StepRecord>, duration_ms: u64) -> Self {
        let failure = steps.iter().find(|s| s.outcome == StepOutcome::Fail);
        let (passed, message) = match failure {
            Some(step) => (false, step.message.clone()),
            None => (true, CASE_PASSED_MESSAGE.to_string()),
        };
        Self {
            name: name.into(),
            passed,
            message,
            steps,
            duration_ms,
        }
    }

    /// A case that could not be started.
    #[must_use]
    pub fn aborted(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            message: message.into(),
            steps: Vec::new(),
            duration_ms: 0,
        }
    }
}

/// Results of one harness run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteReport {
    /// Run identifier.
    pub run_id: Uuid,
    /// Run start time.
    pub started_at: DateTime<Utc>,
    /// Agent base URL.
    pub target: String,
    /// Case reports, in execution order.
    pub cases: Vec<TestCaseReport>,
}

impl SuiteReport {
    /// Starts an empty report.
    #[must_use]
    pub fn new(started_at: DateTime<Utc>, target: impl Into<String>) -> Self {
        Self {
            run_id: Uuid::now_v7(),
            started_at,
            target: target.into(),
            cases: Vec::new(),
        }
    }

    /// Number of passed cases.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.cases.iter().filter(|c| c.passed).count()
    }

    /// Number of failed cases.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.cases.len() - self.passed()
    }

    /// True when every case passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.cases.iter().all(|c| c.passed)
    }
}
