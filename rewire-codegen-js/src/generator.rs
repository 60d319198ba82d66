//! JavaScript controller generator.

use eyre::{Result, eyre};
use rewire_codegen::{
    builder::Indent,
    config::RewireConfig,
    generation::SymbolTable,
    language::LanguageCodegen,
    pipeline::CompilationContext,
};
use rewire_core::{GeneratedFile, Overwrite};
use rewire_ir::{AnalysisResult, PipelineIR};

use crate::files::ControllerJs;

/// Generator producing one SiteGenesis-style controller module per pipeline.
pub struct Generator {
    ir: PipelineIR,
    analysis: AnalysisResult,
    symbols: SymbolTable,
    indent: Indent,
    overwrite: Overwrite,
}

impl LanguageCodegen for Generator {
    fn language(&self) -> &'static str {
        "javascript"
    }

    fn file_name(&self) -> String {
        self.controller().file_name()
    }

    fn render_module(&self) -> String {
        self.render()
    }

    fn overwrite(&self) -> Overwrite {
        self.overwrite
    }
}

impl Generator {
    pub fn new(ir: PipelineIR, analysis: AnalysisResult) -> Self {
        Self {
            ir,
            analysis,
            symbols: SymbolTable::default(),
            indent: Indent::CONTROLLER,
            overwrite: Overwrite::Always,
        }
    }

    /// Take the IR and analysis out of a finished compilation.
    pub fn from_context(ctx: CompilationContext) -> Result<Self> {
        let ir = ctx
            .ir
            .ok_or_else(|| eyre!("pipeline IR not set - did ParsePhase run?"))?;
        let analysis = ctx
            .analysis
            .ok_or_else(|| eyre!("analysis not set - did AnalyzePhase run?"))?;
        Ok(Self::new(ir, analysis))
    }

    pub fn with_symbols(mut self, symbols: SymbolTable) -> Self {
        self.symbols = symbols;
        self
    }

    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_overwrite(mut self, overwrite: Overwrite) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Apply the output and symbol settings of a configuration.
    pub fn with_config(self, config: &RewireConfig) -> Self {
        self.with_symbols(config.symbol_table())
            .with_indent(config.indent())
            .with_overwrite(config.overwrite())
    }

    /// Render the controller module.
    pub fn render(&self) -> String {
        self.controller().render()
    }

    fn controller(&self) -> ControllerJs<'_> {
        ControllerJs::new(&self.ir, &self.analysis, &self.symbols)
            .with_indent(self.indent)
            .with_overwrite(self.overwrite)
    }
}
