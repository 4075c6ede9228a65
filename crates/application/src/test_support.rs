//! Test doubles shared by the unit tests of this crate.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use bstcheck_domain::{RequestSpec, RestResponse, StepInputs, StepRecord, TestCaseReport};
use chrono::{DateTime, TimeZone, Utc};

use crate::ports::{Clock, HttpClient, HttpClientError, StepReporter, TestDataSource};
use crate::{ApplicationError, ApplicationResult};

/// Replays queued results and records every request it receives.
///
/// When the queue runs dry it answers `404` with no body.
#[derive(Default)]
pub struct ScriptedClient {
    replies: RefCell<VecDeque<Result<RestResponse, HttpClientError>>>,
    sent: RefCell<Vec<RequestSpec>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, reply: Result<RestResponse, HttpClientError>) {
        self.replies.borrow_mut().push_back(reply);
    }

    pub fn respond(&self, status: u16, body: &str) {
        self.push(Ok(RestResponse::http(
            status,
            Some(body.to_string()),
            Duration::from_millis(1),
        )));
    }

    pub fn fail(&self, error: HttpClientError) {
        self.push(Err(error));
    }

    pub fn requests(&self) -> Vec<RequestSpec> {
        self.sent.borrow().clone()
    }
}

impl HttpClient for ScriptedClient {
    fn execute(&self, request: &RequestSpec) -> Result<RestResponse, HttpClientError> {
        self.sent.borrow_mut().push(request.clone());
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(RestResponse::http(404u16, None, Duration::ZERO)))
    }
}

/// In-memory sections.
#[derive(Default)]
pub struct MemoryTestData {
    sections: HashMap<String, Vec<(String, String)>>,
}

impl MemoryTestData {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn section(mut self, name: &str, entries: &[(&str, &str)]) -> Self {
        self.sections.insert(
            name.to_string(),
            entries
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        );
        self
    }
}

impl TestDataSource for MemoryTestData {
    fn case_inputs(&self, section: &str) -> ApplicationResult<StepInputs> {
        self.sections
            .get(section)
            .map(|entries| StepInputs::new(section, entries.iter().map(|(k, v)| (k, v.clone()))))
            .ok_or_else(|| ApplicationError::MissingSection(section.to_string()))
    }
}

pub struct FixedClock;

impl FixedClock {
    pub fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 0)
            .single()
            .unwrap_or_default()
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        Self::instant()
    }
}

/// Records reporter callbacks as strings.
#[derive(Default)]
pub struct RecordingReporter {
    pub events: Vec<String>,
}

impl StepReporter for RecordingReporter {
    fn case_started(&mut self, name: &str) {
        self.events.push(format!("start {name}"));
    }

    fn step_finished(&mut self, record: &StepRecord) {
        self.events
            .push(format!("step {} {}", record.name, record.outcome));
    }

    fn case_finished(&mut self, report: &TestCaseReport) {
        self.events
            .push(format!("finish {} {}", report.name, report.passed));
    }
}
