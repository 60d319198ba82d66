//! Core operations.
//!
//! This module contains the business logic for rewire commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod convert;
pub mod explain;

use std::path::Path;

pub use check::check;
pub use convert::convert;
use eyre::Result;
pub use explain::explain;
use rewire_codegen::{CompilationContext, Diagnostic, Pipeline, RewireConfig, pipeline::SnapshotPlugin};
use rewire_parser::PipelineFile;

/// A document run through the pipeline with the configuration that applies to it.
pub(crate) struct Compiled {
    pub file: PipelineFile,
    pub config: RewireConfig,
    pub ctx: CompilationContext,
}

/// Read `input`, load its configuration and run the pipeline on it.
///
/// `config` overrides the `rewire.toml` lookup next to the input.
pub(crate) fn compile(
    input: &Path,
    config: Option<&Path>,
    snapshot_dir: Option<&Path>,
) -> Result<Compiled> {
    let file = PipelineFile::open(input)?;
    let search_from = input
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let config = RewireConfig::load(config, search_from)?;

    let mut pipeline = Pipeline::new().success_conditions(config.success_conditions());
    if let Some(dir) = snapshot_dir {
        pipeline = pipeline.plugin(SnapshotPlugin::with_output_dir(dir));
    }
    let ctx = pipeline.run_file(&file)?;

    Ok(Compiled { file, config, ctx })
}

/// Render a fatal error. Document errors get the annotated source view.
pub(crate) fn describe_error(err: eyre::Report) -> String {
    match err.downcast::<Box<rewire_parser::Error>>() {
        Ok(parse) => format!("{:?}", miette::Report::new(*parse)),
        Err(err) => format!("error: {:#}", err),
    }
}

/// One-line message of a diagnostic, with its location on a second line.
pub(crate) fn describe_diagnostic(diag: &Diagnostic) -> String {
    match &diag.location {
        Some(loc) => format!("{}\n  --> {}", diag.message, loc),
        None => diag.message.clone(),
    }
}
