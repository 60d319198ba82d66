//! Lint for pipelines without entry points.

use rewire_ir::PipelineIR;

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that warns when a pipeline has no start node.
pub struct MissingStartLint;

impl Lint for MissingStartLint {
    fn name(&self) -> &'static str {
        "missing-start"
    }

    fn description(&self) -> &'static str {
        "Warn about pipelines without start nodes"
    }

    fn check(&self, ir: &PipelineIR, diagnostics: &mut Vec<Diagnostic>) {
        if ir.is_empty() {
            diagnostics.push(
                Diagnostic::warning(
                    "validate",
                    "pipeline defines no start node; only form handlers will be generated",
                )
                .at(ir.name.as_str()),
            );
        }
    }
}
