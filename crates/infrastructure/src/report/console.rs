//! Step table printed while cases run.
//!
//! ```text
//! ==================================== ... (130)
//! STEP    | DESCRIPTION                  ... | OUTCOME  | REMARK
//! ==================================== ...
//! step1   | Configure BST feature        ... | PASS     |
//! ------------------------------------ ...
//! ==================================== ...
//! ```

use std::io::{self, Write};

use bstcheck_application::ports::StepReporter;
use bstcheck_domain::{StepRecord, SuiteReport, TestCaseReport};

/// Width of the `=` and `-` rules.
pub const RULE_WIDTH: usize = 130;

const STEP_WIDTH: usize = 7;
const DESCRIPTION_WIDTH: usize = 75;
const OUTCOME_WIDTH: usize = 8;
const REMARK_WIDTH: usize = 40;

/// [`StepReporter`] writing the step table to `W`.
///
/// Write errors do not interrupt the run; the first one is returned by
/// [`finish`](Self::finish).
pub struct ConsoleReporter<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl ConsoleReporter<io::Stdout> {
    /// Creates a reporter writing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    /// Creates a reporter writing to `out`.
    pub const fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Prints the per-case verdicts and totals of a finished run.
    pub fn summary(&mut self, suite: &SuiteReport) {
        let mut text = format!("\n{}\n", "=".repeat(RULE_WIDTH));
        text.push_str(&format!("RUN {} against {}\n", suite.run_id, suite.target));
        for case in &suite.cases {
            let verdict = if case.passed { "PASSED" } else { "FAILED" };
            text.push_str(&format!("{:<40} {verdict:<8} {}\n", case.name, case.message));
        }
        text.push_str(&format!(
            "{} passed, {} failed\n",
            suite.passed(),
            suite.failed()
        ));
        self.emit(&text);
    }

    /// Flushes the output and returns it.
    ///
    /// # Errors
    ///
    /// Returns the first write error seen during the run.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(error) = self.error.take() {
            return Err(error);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn emit(&mut self, text: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.out.write_all(text.as_bytes()) {
            self.error = Some(e);
        }
    }
}

fn row(step: &str, description: &str, outcome: &str, remark: &str) -> String {
    format!(
        "{step:<STEP_WIDTH$} | {:<DESCRIPTION_WIDTH$} | {outcome:<OUTCOME_WIDTH$} | {remark:<REMARK_WIDTH$}",
        fit(description)
    )
    .trim_end()
    .to_string()
        + "\n"
}

/// Cuts descriptions wider than the column to 72 characters plus `...`.
fn fit(description: &str) -> String {
    if description.chars().count() > DESCRIPTION_WIDTH {
        let cut: String = description.chars().take(DESCRIPTION_WIDTH - 3).collect();
        format!("{cut}...")
    } else {
        description.to_string()
    }
}

impl<W: Write> StepReporter for ConsoleReporter<W> {
    fn case_started(&mut self, name: &str) {
        let equals = "=".repeat(RULE_WIDTH);
        let text = format!(
            "\nTEST CASE: {name}\n{equals}\n{}{equals}\n",
            row("STEP", "DESCRIPTION", "OUTCOME", "REMARK")
        );
        self.emit(&text);
    }

    fn step_finished(&mut self, record: &StepRecord) {
        let text = format!(
            "{}{}\n",
            row(
                &record.name,
                &record.description,
                record.outcome.as_str(),
                &record.message
            ),
            "-".repeat(RULE_WIDTH)
        );
        self.emit(&text);
    }

    fn case_finished(&mut self, report: &TestCaseReport) {
        let verdict = if report.passed { "PASSED" } else { "FAILED" };
        let text = if report.steps.is_empty() && !report.passed {
            format!("\nTEST CASE: {} {verdict}: {}\n", report.name, report.message)
        } else {
            format!(
                "{}\n\n{} {verdict}: {}\n",
                "=".repeat(RULE_WIDTH),
                report.name,
                report.message
            )
        };
        self.emit(&text);
    }
}
