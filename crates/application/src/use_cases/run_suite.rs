//! Run suite use case
//!
//! Runs the selected BST cases against one agent and collects a
//! [`SuiteReport`].

use std::sync::Arc;

use bstcheck_domain::{AgentEndpoint, SuiteReport, TestCaseReport};
use tracing::{info, warn};

use super::bst::{BstCase, BstContext};
use crate::ports::{Clock, HttpClient, StepReporter, TestDataSource};
use crate::rest_service::RestService;
use crate::runner::StepRunner;

/// Input for the run suite use case.
#[derive(Debug, Clone)]
pub struct RunSuiteInput {
    /// Agent under test.
    pub endpoint: AgentEndpoint,
    /// Cases to run; empty selects the whole catalog.
    pub cases: Vec<BstCase>,
    /// Log every request at info level.
    pub verbose: bool,
}

impl RunSuiteInput {
    /// Creates an input that runs every case against `endpoint`.
    #[must_use]
    pub const fn new(endpoint: AgentEndpoint) -> Self {
        Self {
            endpoint,
            cases: Vec::new(),
            verbose: false,
        }
    }

    /// Restricts the run to `cases`.
    #[must_use]
    pub fn with_cases(mut self, cases: impl IntoIterator<Item = BstCase>) -> Self {
        self.cases = cases.into_iter().collect();
        self
    }

    /// Enables verbose request logging.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Returns the selected cases in catalog order, without duplicates.
    #[must_use]
    pub fn selected(&self) -> Vec<BstCase> {
        BstCase::all()
            .iter()
            .copied()
            .filter(|case| self.cases.is_empty() || self.cases.contains(case))
            .collect()
    }
}

/// Use case for running the BST suite.
pub struct RunSuite<C, D, K> {
    client: Arc<C>,
    data: D,
    clock: K,
}

impl<C, D, K> RunSuite<C, D, K>
where
    C: HttpClient + 'static,
    D: TestDataSource,
    K: Clock,
{
    /// Creates a new instance of the use case.
    pub const fn new(client: Arc<C>, data: D, clock: K) -> Self {
        Self {
            client,
            data,
            clock,
        }
    }

    /// Executes the use case.
    ///
    /// Cases run one at a time, each with a fresh context. A case that cannot
    /// be started is reported as failed and the run moves on.
    pub fn execute(&self, input: &RunSuiteInput, reporter: &mut dyn StepReporter) -> SuiteReport {
        let mut suite = SuiteReport::new(self.clock.now(), input.endpoint.base_url());
        let cases = input.selected();
        info!(agent = %suite.target, cases = cases.len(), "starting run");

        let mut runner = StepRunner::new(reporter);
        for case in cases {
            let report = self.run_case(case, input, &mut runner);
            suite.cases.push(report);
        }

        info!(
            passed = suite.passed(),
            failed = suite.failed(),
            "run finished"
        );
        suite
    }

    fn run_case(
        &self,
        case: BstCase,
        input: &RunSuiteInput,
        runner: &mut StepRunner<'_>,
    ) -> TestCaseReport {
        let section = case.section();
        let inputs = match self.data.case_inputs(&section) {
            Ok(inputs) => inputs,
            Err(e) => {
                warn!(case = case.name(), error = %e, "test data unavailable");
                return runner.abort(case.name(), e.to_string());
            }
        };
        if inputs.numbered_steps().is_empty() {
            return runner.abort(
                case.name(),
                format!("no steps configured in section [{section}]"),
            );
        }

        let mut service = RestService::new(Arc::clone(&self.client), &input.endpoint);
        if input.verbose {
            service.set_verbose();
        }
        let mut ctx = BstContext::new(service, inputs.params_list());
        let test_case = case.build::<C>(&inputs);
        runner.run(&test_case, &mut ctx, &inputs)
    }
}
