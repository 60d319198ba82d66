//! JavaScript controller generator for rewire.
//!
//! This crate renders analysed pipelines as CommonJS controller modules in
//! the SiteGenesis controller idiom: one function per entry point and form
//! handler, `require`d script API modules and guarded exports.
//!
//! # Usage
//!
//! ```
//! let xml = r#"<pipeline>
//!   <branch basename="Show">
//!     <segment>
//!       <node><start-node call-mode="public" name="Show"/></node>
//!       <simple-transition/>
//!       <node><interaction-node><template name="home/homepage"/></interaction-node></node>
//!     </segment>
//!   </branch>
//! </pipeline>"#;
//!
//! let conversion = rewire_codegen_js::convert(xml, "Home")?;
//! assert!(conversion.warnings.is_empty());
//! assert!(conversion.code.contains("ISML.renderTemplate('home/homepage', pdict);"));
//! assert!(conversion.code.contains("exports.Show = guard.ensure(['get'], show);"));
//! # Ok::<(), eyre::Report>(())
//! ```
//!
//! For configured output (symbol paths, indentation, overwrite rules) run a
//! [`Pipeline`](rewire_codegen::Pipeline) and hand its context to
//! [`Generator::from_context`].

mod code_file;
mod generator;
mod naming;
mod translate;

pub mod ast;
pub mod emit;
pub mod files;

use eyre::Result;
use rewire_codegen::{Diagnostic, Pipeline, generation::SymbolTable};
use rewire_core::GeneratedFile;
use rewire_ir::{AnalysisResult, PipelineIR};

pub use code_file::CodeFile;
pub use generator::Generator;
pub use naming::function_name;
pub use rewire_codegen::language::{GenerateResult, LanguageCodegen, PreviewFile};
pub use translate::{CONTEXT_PREFIXES, translate};

/// A generated controller together with the warnings raised on the way.
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Controller module source.
    pub code: String,
    /// Non-fatal issues, each prefixed with the function or node it concerns.
    pub warnings: Vec<String>,
}

/// Render a controller module with the default symbol table.
pub fn generate(ir: &PipelineIR, analysis: &AnalysisResult) -> String {
    files::ControllerJs::new(ir, analysis, &SymbolTable::default()).render()
}

/// Parse, analyze and generate one pipeline document.
///
/// Fails only when the document cannot be parsed.
pub fn convert(source: &str, name: &str) -> Result<Conversion> {
    let ctx = Pipeline::new().run(source, name)?;
    let code = generate(ctx.ir()?, ctx.analysis()?);
    let warnings = ctx.warnings().map(warning_text).collect();
    Ok(Conversion { code, warnings })
}

fn warning_text(diagnostic: &Diagnostic) -> String {
    match &diagnostic.location {
        Some(location) => format!("{}: {}", location, diagnostic.message),
        None => diagnostic.message.clone(),
    }
}
