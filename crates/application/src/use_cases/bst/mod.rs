//! BST test cases.
//!
//! [`BstCase`] names each case of the catalog and builds its steps;
//! [`steps`] holds the step bodies and [`BstContext`] the state they share.

mod catalog;
mod context;
pub mod steps;

pub use catalog::{BstCase, StepPattern};
pub use context::BstContext;
