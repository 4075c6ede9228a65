//! Run reporting.
//!
//! [`ConsoleReporter`] prints the step table while cases run; the JSON report
//! of a finished run is written with [`write_report`](crate::serialization::write_report).

mod console;

pub use console::{ConsoleReporter, RULE_WIDTH};
