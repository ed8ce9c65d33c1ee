//! Error types for Herald
//!
//! All fallible core operations return [`HeraldResult`]. Errors carry enough
//! context to be logged at the boundary where they are absorbed:
//! - error_code: A stable identifier for programmatic handling
//! - message: Human-readable error message
//! - is_fatal: Whether the error must abort startup

mod constructors;
mod conversions;
mod types;

pub use types::{HeraldError, HeraldResult, OptionExt, ResultExt};
