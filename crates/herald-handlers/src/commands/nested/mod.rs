//! Commands living one directory below the commands root

#[allow(clippy::module_inception)]
mod nested;
mod nested_two;

pub use nested::Nested;
pub use nested_two::NestedTwo;
