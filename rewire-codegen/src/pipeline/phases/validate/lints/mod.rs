//! Built-in lints for pipeline graph validation.

mod duplicate_start;
mod missing_start;
mod unreachable_node;

pub use duplicate_start::DuplicateStartLint;
pub use missing_start::MissingStartLint;
pub use unreachable_node::UnreachableNodeLint;
