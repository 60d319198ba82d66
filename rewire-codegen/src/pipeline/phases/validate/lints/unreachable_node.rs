//! Lint for nodes no entry point leads to.

use std::collections::HashSet;

use rewire_ir::{NodeId, PipelineIR};

use super::super::Lint;
use crate::pipeline::Diagnostic;

/// Lint that warns about nodes unreachable from every start node and form
/// handler. Such nodes never appear in the generated controller.
pub struct UnreachableNodeLint;

impl Lint for UnreachableNodeLint {
    fn name(&self) -> &'static str {
        "unreachable-node"
    }

    fn description(&self) -> &'static str {
        "Warn about nodes that no entry point reaches"
    }

    fn check(&self, ir: &PipelineIR, diagnostics: &mut Vec<Diagnostic>) {
        let mut stack: Vec<NodeId> = ir
            .start_nodes
            .iter()
            .copied()
            .chain(ir.continue_nodes().map(|(node, _)| node.id))
            .collect();
        let mut reached = HashSet::new();

        while let Some(id) = stack.pop() {
            if !reached.insert(id) {
                continue;
            }
            if let Some(node) = ir.node(id) {
                stack.extend(node.transitions.iter().map(|t| t.target));
            }
        }

        for node in ir.nodes.values().filter(|n| !reached.contains(&n.id)) {
            diagnostics.push(
                Diagnostic::warning(
                    "validate",
                    format!("{} node is unreachable from any entry point", node.kind.as_str()),
                )
                .at_node(node.id),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use rewire_ir::{NodeIR, NodeKind, StartNode, Transition};

    use super::*;

    #[test]
    fn test_orphan_node_is_reported() {
        let mut ir = PipelineIR::new("Cart");
        let start = NodeIR::new(
            NodeId(1),
            NodeKind::Start(StartNode {
                name: "Show".into(),
                public: true,
                secure: false,
            }),
        )
        .with_transition(Transition::to(NodeId(2)));
        ir.nodes.insert(NodeId(1), start);
        ir.nodes
            .insert(NodeId(2), NodeIR::new(NodeId(2), NodeKind::End { name: None }));
        ir.nodes
            .insert(NodeId(3), NodeIR::new(NodeId(3), NodeKind::End { name: None }));
        ir.start_nodes.push(NodeId(1));

        let mut diagnostics = Vec::new();
        UnreachableNodeLint.check(&ir, &mut diagnostics);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].location.as_deref(), Some("node #3"));
        assert_eq!(
            diagnostics[0].message,
            "end node is unreachable from any entry point"
        );
    }
}
