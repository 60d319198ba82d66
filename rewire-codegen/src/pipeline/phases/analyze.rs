//! Analyze phase - reconstructs structured control flow.

use eyre::Result;

use crate::{
    analysis::{Analyzer, SuccessConditions},
    pipeline::{CompilationContext, Diagnostic, Phase},
};

/// Phase that runs the control-flow analyzer over the parsed graph.
///
/// Every analyzer warning becomes a warning diagnostic located at the
/// function it was found in.
pub struct AnalyzePhase {
    success: SuccessConditions,
}

impl AnalyzePhase {
    pub fn new(success: SuccessConditions) -> Self {
        Self { success }
    }
}

impl Default for AnalyzePhase {
    fn default() -> Self {
        Self::new(SuccessConditions::default())
    }
}

impl Phase for AnalyzePhase {
    fn name(&self) -> &'static str {
        "analyze"
    }

    fn description(&self) -> &'static str {
        "Reconstruct structured control flow"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let analysis = Analyzer::new(ctx.ir()?, &self.success).analyze();

        for warning in &analysis.warnings {
            let diagnostic = match warning.split_once(": ") {
                Some((function, message)) => {
                    Diagnostic::warning(self.name(), message).at(function)
                }
                None => Diagnostic::warning(self.name(), warning.as_str()),
            };
            ctx.add_diagnostic(diagnostic);
        }

        ctx.analysis = Some(analysis);
        Ok(())
    }
}
