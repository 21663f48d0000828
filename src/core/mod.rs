//! Core value types and reference data.
//!
//! Parties, item categories, charge decisions, the territorial code sets
//! the rules consume, and the crate's error type.

mod error;
mod territories;
mod types;

pub use error::*;
pub use territories::*;
pub use types::*;
