//! Adapters implementing the application ports.

mod reqwest_client;
mod system_clock;

pub use reqwest_client::{DEFAULT_TIMEOUT, ReqwestHttpClient, USER_AGENT};
pub use system_clock::SystemClock;
