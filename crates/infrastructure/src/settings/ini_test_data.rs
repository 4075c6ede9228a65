//! Step payloads (`testCaseJsonStrings.ini`).

use std::path::Path;

use bstcheck_application::ports::TestDataSource;
use bstcheck_application::{ApplicationError, ApplicationResult};
use bstcheck_domain::StepInputs;
use config::{Config, ConfigError, File, FileFormat};
use tracing::debug;

use super::ConfigLoadError;

/// Test data read from an INI file.
///
/// Every payload must fit on one line.
pub struct IniTestData {
    settings: Config,
}

impl IniTestData {
    /// Loads `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let settings = Config::builder()
            .add_source(File::new(&path.to_string_lossy(), FileFormat::Ini).required(true))
            .build()?;
        debug!(path = %path.display(), "test data loaded");
        Ok(Self { settings })
    }
}

impl TestDataSource for IniTestData {
    fn case_inputs(&self, section: &str) -> ApplicationResult<StepInputs> {
        let table = match self.settings.get_table(section) {
            Ok(table) => table,
            Err(ConfigError::NotFound(_)) => {
                return Err(ApplicationError::MissingSection(section.to_string()));
            }
            Err(e) => return Err(ApplicationError::Config(e.to_string())),
        };

        let mut entries = Vec::with_capacity(table.len());
        for (key, value) in table {
            let text = value
                .into_string()
                .map_err(|e| ApplicationError::Config(format!("[{section}] {key}: {e}")))?;
            entries.push((key, text));
        }
        Ok(StepInputs::new(section, entries))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    const DATA: &str = r#"[get_bst_feature_api_ct]
step1 = {"jsonrpc": "2.0", "method": "get-bst-feature", "asic-id": "1", "params": {}, "id": 1}
paramslist = bst-enable send-async-reports collection-interval

[clear_bst_statistics_api_ct]
step2 = {"jsonrpc": "2.0", "method": "clear-bst-statistics", "asic-id": "1", "params": {}, "id": 2}
step1 = {"jsonrpc": "2.0", "method": "clear-bst-statistics", "asic-id": "1", "params": {}, "id": 1}
"#;

    fn load(dir: &tempfile::TempDir) -> IniTestData {
        let path = dir.path().join("testCaseJsonStrings.ini");
        fs::write(&path, DATA).expect("write ini");
        IniTestData::load(&path).expect("load")
    }

    #[test]
    fn test_reads_section_entries() {
        let dir = tempfile::tempdir().expect("tempdir");
        let data = load(&dir);

        let inputs = data.case_inputs("get_bst_feature_api_ct").expect("section");

        assert_eq!(inputs.section(), "get_bst_feature_api_ct");
        assert_eq!(inputs.numbered_steps(), vec!["step1"]);
        assert_eq!(
            inputs.params_list(),
            vec!["bst-enable", "send-async-reports", "collection-interval"]
        );
        let payload: serde_json::Value =
            serde_json::from_str(inputs.get("step1").expect("step1")).expect("json payload");
        assert_eq!(payload["method"], "get-bst-feature");
    }

    #[test]
    fn test_steps_come_back_in_numeric_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let data = load(&dir);

        let inputs = data.case_inputs("clear_bst_statistics_api_ct").expect("section");

        assert_eq!(inputs.numbered_steps(), vec!["step1", "step2"]);
    }

    #[test]
    fn test_missing_section() {
        let dir = tempfile::tempdir().expect("tempdir");
        let data = load(&dir);

        assert!(matches!(
            data.case_inputs("get_bst_report_api_ct"),
            Err(ApplicationError::MissingSection(ref s)) if s == "get_bst_report_api_ct"
        ));
    }

    #[test]
    fn test_payload_text_is_kept_verbatim() {
        let dir = tempfile::tempdir().expect("tempdir");
        let data = load(&dir);

        let inputs = data.case_inputs("clear_bst_statistics_api_ct").expect("section");

        assert_eq!(
            inputs.get("step2"),
            Some(r#"{"jsonrpc": "2.0", "method": "clear-bst-statistics", "asic-id": "1", "params": {}, "id": 2}"#)
        );
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");

        assert!(IniTestData::load(&dir.path().join("absent.ini")).is_err());
    }
}
