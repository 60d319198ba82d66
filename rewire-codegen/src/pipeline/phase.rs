//! Pipeline phase trait.

use eyre::Result;

use super::CompilationContext;

/// Name and summary of a phase, as listed by `rewire explain`.
#[derive(Debug, Clone)]
pub struct PhaseInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// One step of a pipeline conversion.
///
/// The built-in steps run first, in this order:
/// - `parse` fills `ctx.ir` from the document
/// - `validate` lints the graph and records warnings
/// - `analyze` fills `ctx.analysis`
///
/// Phases registered through [`Pipeline::phase`](super::Pipeline::phase)
/// follow and can read everything the built-ins produced.
pub trait Phase: Send + Sync {
    /// Short identifier, also passed to plugin hooks.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Execute the phase.
    ///
    /// An `Err` aborts the conversion of the current document. Graph
    /// irregularities belong in the context's diagnostics instead.
    fn run(&self, ctx: &mut CompilationContext) -> Result<()>;

    fn info(&self) -> PhaseInfo {
        PhaseInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}
