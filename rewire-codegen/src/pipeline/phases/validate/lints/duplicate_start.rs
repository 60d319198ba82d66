//! Lint for duplicate entry names.

use std::collections::HashMap;

use rewire_ir::{NodeId, PipelineIR};

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that warns when two start nodes share a name.
///
/// Both functions are still generated, but only the last definition wins
/// at runtime.
pub struct DuplicateStartLint;

impl Lint for DuplicateStartLint {
    fn name(&self) -> &'static str {
        "duplicate-start"
    }

    fn description(&self) -> &'static str {
        "Detect start nodes sharing an entry name"
    }

    fn check(&self, ir: &PipelineIR, diagnostics: &mut Vec<Diagnostic>) {
        let mut seen: HashMap<&str, NodeId> = HashMap::new();

        for (node, start) in ir.starts() {
            if let Some(first) = seen.get(start.name.as_str()) {
                diagnostics.push(
                    Diagnostic::warning(
                        "validate",
                        format!(
                            "duplicate start node '{}' (first defined at node {})",
                            start.name, first
                        ),
                    )
                    .at_node(node.id),
                );
            } else {
                seen.insert(start.name.as_str(), node.id);
            }
        }
    }
}
