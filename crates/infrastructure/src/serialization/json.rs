//! JSON serialization helpers for deterministic output.

use std::fs;
use std::io;
use std::path::Path;

use bstcheck_domain::SuiteReport;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Serializes a value to deterministic JSON.
///
/// Output format:
/// - 2-space indentation
/// - Trailing newline
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable<T: Serialize>(value: &T) -> Result<String, SerializationError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    let mut json = String::from_utf8(buffer)?;
    json.push('\n');
    Ok(json)
}

/// Writes a run report to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the report cannot be serialized or written.
pub fn write_report(path: &Path, report: &SuiteReport) -> Result<(), SerializationError> {
    let json = to_json_stable(report)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use bstcheck_domain::{StepRecord, StepResult, TestCaseReport};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn report() -> SuiteReport {
        let started = Utc
            .with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
            .single()
            .expect("valid time");
        let mut suite = SuiteReport::new(started, "http://127.0.0.1:8080/broadview/bst/");
        suite.cases.push(TestCaseReport::from_steps(
            "clear_bst_statistics",
            vec![StepRecord::new(
                "step1",
                "Clear BST statistics",
                StepResult::fail("Obtained 500"),
                4,
            )],
            4,
        ));
        suite
    }

    #[test]
    fn test_stable_serialization_has_trailing_newline() {
        let json = to_json_stable(&BTreeMap::from([("k", 1)])).expect("serialization should work");
        assert!(json.ends_with('\n'));
    }

    #[test]
    fn test_stable_serialization_uses_two_space_indent() {
        let json = to_json_stable(&BTreeMap::from([("key", "value")])).expect("serialization should work");
        assert!(json.contains("\n  \"key\""));
    }

    #[test]
    fn test_report_shape() {
        let json = to_json_stable(&report()).expect("serialization should work");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

        assert_eq!(value["target"], "http://127.0.0.1:8080/broadview/bst/");
        assert_eq!(value["started_at"], "2026-03-01T12:00:00Z");
        assert_eq!(value["cases"][0]["passed"], false);
        assert_eq!(value["cases"][0]["message"], "Obtained 500");
        assert_eq!(value["cases"][0]["steps"][0]["outcome"], "FAIL");
    }

    #[test]
    fn test_write_report_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("report.json");
        let original = report();

        write_report(&path, &original).expect("write");
        let restored: SuiteReport =
            serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("parse");

        assert_eq!(restored, original);
    }

    #[test]
    fn test_write_report_into_missing_directory_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent").join("report.json");

        assert!(matches!(
            write_report(&path, &report()),
            Err(SerializationError::Io(_))
        ));
    }
}
