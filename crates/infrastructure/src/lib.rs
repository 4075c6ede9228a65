//! bstcheck Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer: the reqwest HTTP client, the system
//! clock, INI-backed settings and test data, the console step table and
//! the JSON run report.

pub mod adapters;
pub mod report;
pub mod serialization;
pub mod settings;

pub use adapters::{ReqwestHttpClient, SystemClock};
pub use report::ConsoleReporter;
pub use serialization::{SerializationError, to_json_stable, write_report};
pub use settings::{
    ConfigLoadError, IniTestData, SERVER_DETAILS_FILE, ServerDetails, SwitchType, TEST_DATA_FILE,
    load_server_details,
};
