//! Command registry
//!
//! Maps command names to constructed commands. Written only during
//! Discovery, read concurrently by the Dispatcher afterwards.

mod types;


pub use types::Registry;
