//! HTTP Response domain types

mod spec;

pub use spec::{BODY_MARKER, ResponseStatus, RestResponse, StatusCode, UNREACHABLE_CODE};
