// miette's derive macro generates code that triggers false positive warnings
#![allow(unused_assignments)]

//! Pipeline XML parsing.
//!
//! Turns an exported pipeline document into a [`PipelineIR`]. Only malformed
//! XML and a wrong root element are errors; transitions whose target path
//! cannot be resolved are dropped.
//!
//! # Example
//!
//! ```
//! let xml = r#"
//! <pipeline>
//!   <branch basename="Show">
//!     <segment>
//!       <node><start-node call-mode="public" name="Show"/></node>
//!       <simple-transition/>
//!       <node><end-node/></node>
//!     </segment>
//!   </branch>
//! </pipeline>"#;
//!
//! let ir = rewire_parser::parse(xml, "Account").unwrap();
//! assert_eq!(ir.nodes.len(), 2);
//! assert_eq!(ir.start_nodes.len(), 1);
//! ```

mod builder;
mod error;
mod file;
mod nodes;
mod path;
mod xml;

pub use error::{Error, Result, SourceContext};
pub use file::PipelineFile;
pub use path::resolve_target_path;
use rewire_ir::PipelineIR;

use crate::builder::GraphBuilder;

/// Parse a pipeline document.
///
/// `name` is the pipeline name, usually the file stem of the document.
pub fn parse(document: &str, name: &str) -> Result<PipelineIR> {
    parse_with_filename(document, name, &format!("{}.xml", name))
}

/// Parse a pipeline document, reporting errors against `filename`.
pub fn parse_with_filename(document: &str, name: &str, filename: &str) -> Result<PipelineIR> {
    parse_source(&SourceContext::new(document, filename), name)
}

/// Read and parse a pipeline document from disk.
pub fn parse_file(path: impl AsRef<std::path::Path>) -> Result<PipelineIR> {
    PipelineFile::open(path)?.parse()
}

pub(crate) fn parse_source(ctx: &SourceContext, name: &str) -> Result<PipelineIR> {
    let root = xml::parse_document(ctx)?;
    GraphBuilder::new(ctx, name).build(&root)
}
