//! Control-flow analysis.
//!
//! Turns the unstructured pipeline graph into one structured function per
//! entry point:
//!
//! - [`Analyzer`] - reconstructs if/else chains, loops and handler dispatch
//! - [`SuccessConditions`] - guesses the success test of pipelets with an error exit
//! - [`find_convergence_point`] - locates the join node closing a branch
//! - [`Outline`] - renders analysed functions as an indented block tree

mod analyzer;
mod convergence;
mod outline;
mod success;
mod walk;

pub use analyzer::{Analyzer, symbol};
pub use convergence::find_convergence_point;
pub use outline::{Outline, describe_condition, render_outline};
use rewire_ir::{AnalysisResult, PipelineIR};
pub use success::SuccessConditions;

/// Analyze a pipeline with the built-in success-condition table.
pub fn analyze(ir: &PipelineIR) -> AnalysisResult {
    Analyzer::new(ir, &SuccessConditions::default()).analyze()
}
