//! Built-in pipeline phases.
//!
//! - [`ParsePhase`] - parses the document into a `PipelineIR`
//! - [`ValidatePhase`] - runs structural lints on the IR
//! - [`AnalyzePhase`] - reconstructs structured control flow

mod analyze;
mod parse;
mod validate;

pub use analyze::AnalyzePhase;
pub use parse::ParsePhase;
pub use validate::{
    DuplicateStartLint, Lint, LintInfo, MissingStartLint, UnreachableNodeLint, ValidatePhase,
};
