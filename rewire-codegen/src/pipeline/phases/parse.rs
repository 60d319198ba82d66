//! Parse phase - turns the document into a pipeline graph.

use eyre::Result;
use tracing::debug;

use crate::pipeline::{CompilationContext, Phase};

/// Phase that parses the pipeline document.
///
/// Malformed XML is the only fatal condition of the whole pipeline; the
/// boxed parser error is returned unchanged so callers can render it.
pub struct ParsePhase;

impl Phase for ParsePhase {
    fn name(&self) -> &'static str {
        "parse"
    }

    fn description(&self) -> &'static str {
        "Parse pipeline XML into a node graph"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let ir = rewire_parser::parse_with_filename(&ctx.source, &ctx.name, &ctx.filename)?;
        debug!(
            pipeline = %ir.name,
            nodes = ir.nodes.len(),
            starts = ir.start_nodes.len(),
            "parsed pipeline"
        );
        ctx.ir = Some(ir);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_phase_populates_ir() {
        let mut ctx = CompilationContext::new(
            r#"<pipeline group="Checkout"><branch basename="A"><segment><node><start-node name="A"/></node></segment></branch></pipeline>"#,
            "Cart",
        );
        ParsePhase.run(&mut ctx).expect("parse should succeed");
        let ir = ctx.ir().expect("ir");
        assert_eq!(ir.name, "Cart");
        assert_eq!(ir.group.as_deref(), Some("Checkout"));
    }

    #[test]
    fn test_parse_phase_fails_on_wrong_root() {
        let mut ctx = CompilationContext::new("<pipelines/>", "Cart");
        assert!(ParsePhase.run(&mut ctx).is_err());
        assert!(ctx.ir.is_none());
    }
}
