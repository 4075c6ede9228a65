//! HTTP Request domain types

mod method;
mod payload;
mod spec;

pub use method::HttpMethod;
pub use payload::agent_method;
pub use spec::RequestSpec;
