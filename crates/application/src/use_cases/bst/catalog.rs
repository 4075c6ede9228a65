//! Catalog of the BST test cases.

use std::fmt;
use std::str::FromStr;

use bstcheck_domain::{StepInputs, step_number};

use super::context::BstContext;
use super::steps;
use crate::error::ApplicationError;
use crate::ports::HttpClient;
use crate::runner::TestCase;

/// Suffix of the test data section of every case.
const SECTION_SUFFIX: &str = "_api_ct";

/// How a case turns its `stepN` entries into steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPattern {
    /// Odd steps configure, even steps read the configuration back.
    ConfigureThenVerify,
    /// Every step queries and checks the `paramslist` params.
    ResultParams,
    /// Every step queries a report and checks its realms.
    Realms,
    /// Every step only requires `200 OK`.
    StatusOnly,
}

/// A BST conformance test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BstCase {
    /// `get-bst-feature` returns the expected params.
    GetFeature,
    /// `get-bst-tracking` returns the expected params.
    GetTracking,
    /// `get-bst-thresholds` reports the requested realms.
    GetThresholds,
    /// `get-bst-report` reports the requested realms.
    GetReport,
    /// `configure-bst-feature` round-trips through `get-bst-feature`.
    ConfigureFeature,
    /// `configure-bst-tracking` round-trips through `get-bst-tracking`.
    ConfigureTracking,
    /// `configure-bst-thresholds` is accepted.
    ConfigureThresholds,
    /// `clear-bst-statistics` is accepted.
    ClearStatistics,
    /// `clear-bst-thresholds` is accepted.
    ClearThresholds,
}

impl BstCase {
    /// Returns every case in catalog order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::GetFeature,
            Self::GetTracking,
            Self::GetThresholds,
            Self::GetReport,
            Self::ConfigureFeature,
            Self::ConfigureTracking,
            Self::ConfigureThresholds,
            Self::ClearStatistics,
            Self::ClearThresholds,
        ]
    }

    /// Returns the case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::GetFeature => "get_bst_feature",
            Self::GetTracking => "get_bst_tracking",
            Self::GetThresholds => "get_bst_thresholds",
            Self::GetReport => "get_bst_report",
            Self::ConfigureFeature => "configure_bst_feature",
            Self::ConfigureTracking => "configure_bst_tracking",
            Self::ConfigureThresholds => "configure_bst_thresholds",
            Self::ClearStatistics => "clear_bst_statistics",
            Self::ClearThresholds => "clear_bst_thresholds",
        }
    }

    /// Returns the test data section holding the case's steps.
    #[must_use]
    pub fn section(self) -> String {
        format!("{}{SECTION_SUFFIX}", self.name())
    }

    /// Returns how the case builds its steps.
    #[must_use]
    pub const fn pattern(self) -> StepPattern {
        match self {
            Self::GetFeature | Self::GetTracking => StepPattern::ResultParams,
            Self::GetThresholds | Self::GetReport => StepPattern::Realms,
            Self::ConfigureFeature | Self::ConfigureTracking => StepPattern::ConfigureThenVerify,
            Self::ConfigureThresholds | Self::ClearStatistics | Self::ClearThresholds => {
                StepPattern::StatusOnly
            }
        }
    }

    /// Descriptions of the case's steps; only `ConfigureThenVerify` cases
    /// use the second one, for their even steps.
    const fn descriptions(self) -> (&'static str, &'static str) {
        match self {
            Self::GetFeature => ("Get BST Feature", "Get BST Feature"),
            Self::GetTracking => ("Get BST Tracking", "Get BST Tracking"),
            Self::GetThresholds => ("Get BST Thresholds", "Get BST Thresholds"),
            Self::GetReport => ("Get BST Report", "Get BST Report"),
            Self::ConfigureFeature => ("Configure BST feature", "Get BST Feature Status"),
            Self::ConfigureTracking => ("Configure BST tracking", "Get BST Tracking Status"),
            Self::ConfigureThresholds => ("Configure BST thresholds", "Configure BST thresholds"),
            Self::ClearStatistics => ("Clear BST statistics", "Clear BST statistics"),
            Self::ClearThresholds => ("Clear BST thresholds", "Clear BST thresholds"),
        }
    }

    /// Builds one step per `stepN` entry of `inputs`, in numeric order.
    #[must_use]
    pub fn build<C: HttpClient + 'static>(self, inputs: &StepInputs) -> TestCase<BstContext<C>> {
        let (primary, secondary) = self.descriptions();
        let mut case = TestCase::new(self.name());
        for name in inputs.numbered_steps() {
            match self.pattern() {
                StepPattern::ConfigureThenVerify => {
                    if step_number(name).is_some_and(|n| n % 2 == 1) {
                        case.push(name, primary, steps::configure::<C>);
                    } else {
                        case.push(name, secondary, steps::verify_configuration::<C>);
                    }
                }
                StepPattern::ResultParams => {
                    case.push(name, primary, steps::verify_result_params::<C>);
                }
                StepPattern::Realms => case.push(name, primary, steps::verify_realms::<C>),
                StepPattern::StatusOnly => case.push(name, primary, steps::expect_status_ok::<C>),
            }
        }
        case
    }
}

impl fmt::Display for BstCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BstCase {
    type Err = ApplicationError;

    /// Accepts a case name or its section name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let wanted = lowered.strip_suffix(SECTION_SUFFIX).unwrap_or(lowered.as_str());
        Self::all()
            .iter()
            .copied()
            .find(|case| case.name() == wanted)
            .ok_or_else(|| ApplicationError::UnknownTestCase(s.to_string()))
    }
}
