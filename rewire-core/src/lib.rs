//! Core utilities shared across the rewire crates.
//!
//! Generated-file writing rules and identifier case conversion.

mod file;
mod utils;

// File operations
pub use file::{File, GeneratedFile, Overwrite, WriteResult};
// String utilities
pub use utils::{is_identifier, to_camel_case, to_pascal_case};
