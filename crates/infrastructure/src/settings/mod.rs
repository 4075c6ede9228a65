//! INI settings.
//!
//! Two files live in the configuration directory:
//! - [`SERVER_DETAILS_FILE`] describes the agent under test (optional).
//! - [`TEST_DATA_FILE`] holds one section of step payloads per test case.
//!
//! Both are read with the `config` crate's INI format.

mod ini_test_data;
mod server_details;

use thiserror::Error;

pub use ini_test_data::IniTestData;
pub use server_details::{SERVER_DETAILS_SECTION, ServerDetails, SwitchType, load_server_details};

/// Agent description file.
pub const SERVER_DETAILS_FILE: &str = "serverDetails.ini";

/// Step payload file.
pub const TEST_DATA_FILE: &str = "testCaseJsonStrings.ini";

/// Prefix of environment overrides, e.g. `BSTCHECK_SERVER_DETAILS__AGENT_SERVER_IP`.
pub const ENV_PREFIX: &str = "BSTCHECK";

/// Errors raised while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    /// The file could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// `switch_type` names a platform the harness does not know.
    #[error("Unknown platform '{0}' is provided in the {SERVER_DETAILS_FILE} file")]
    UnknownPlatform(String),
}
