//! Per-case step inputs.
//!
//! Each case reads one INI section: `stepN` entries hold the JSON payload of
//! step N, and an optional `paramslist` names the params a query must return.

use std::collections::BTreeMap;

/// Entry naming the params a query step expects.
pub const PARAMS_LIST_KEY: &str = "paramslist";

/// Prefix of numbered step names.
pub const STEP_PREFIX: &str = "step";

/// Returns the number of a step name (`step12` -> 12).
#[must_use]
pub fn step_number(name: &str) -> Option<u32> {
    name.strip_prefix(STEP_PREFIX)?.parse().ok()
}

/// Key/value entries of one case section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepInputs {
    section: String,
    entries: BTreeMap<String, String>,
}

impl StepInputs {
    /// Creates inputs for `section`. Keys are matched case-insensitively.
    pub fn new<I, K, V>(section: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            section: section.into(),
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.as_ref().trim().to_ascii_lowercase(), v.into()))
                .collect(),
        }
    }

    /// Returns the section name.
    #[must_use]
    pub fn section(&self) -> &str {
        &self.section
    }

    /// Returns the raw entry for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(&key.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Returns the names listed in `paramslist`, split on whitespace and commas.
    #[must_use]
    pub fn params_list(&self) -> Vec<String> {
        self.get(PARAMS_LIST_KEY)
            .map(|list| {
                list.split(|c: char| c.is_whitespace() || c == ',')
                    .filter(|s| !s.is_empty())
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns the `stepN` entry names in ascending numeric order.
    #[must_use]
    pub fn numbered_steps(&self) -> Vec<&str> {
        let mut steps: Vec<(u32, &str)> = self
            .entries
            .keys()
            .filter_map(|k| step_number(k).map(|n| (n, k.as_str())))
            .collect();
        steps.sort_unstable();
        steps.into_iter().map(|(_, name)| name).collect()
    }

    /// Returns true if the section has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_step_number() {
        assert_eq!(step_number("step1"), Some(1));
        assert_eq!(step_number("step22"), Some(22));
        assert_eq!(step_number("paramslist"), None);
        assert_eq!(step_number("stepx"), None);
    }

    #[test]
    fn test_numbered_steps_sort_numerically() {
        let inputs = StepInputs::new(
            "case",
            [
                ("step10", "{}"),
                ("step2", "{}"),
                ("paramslist", "a"),
                ("step1", "{}"),
                ("step9", "{}"),
            ],
        );
        assert_eq!(
            inputs.numbered_steps(),
            vec!["step1", "step2", "step9", "step10"]
        );
    }

    #[test]
    fn test_keys_are_case_insensitive() {
        let inputs = StepInputs::new("case", [("Step1", "{\"method\": \"x\"}")]);
        assert_eq!(inputs.get("step1"), Some("{\"method\": \"x\"}"));
        assert_eq!(inputs.get("STEP1"), Some("{\"method\": \"x\"}"));
    }

    #[test]
    fn test_params_list() {
        let inputs = StepInputs::new("case", [("paramslist", "bst-enable, send-async-reports  collection-interval")]);
        assert_eq!(
            inputs.params_list(),
            vec!["bst-enable", "send-async-reports", "collection-interval"]
        );
        assert!(StepInputs::default().params_list().is_empty());
    }
}
