//! Convergence-point search for splits.

use std::collections::{HashSet, VecDeque};

use rewire_ir::{NodeId, NodeKind, PipelineIR};

/// Find where the arms of a split reunite.
///
/// Breadth-first search from the arm targets; the first join node reached on
/// any path wins. End nodes close their path of the search, and `barriers`
/// (the enclosing walk's stop and loop nodes) are never crossed.
pub fn find_convergence_point(
    ir: &PipelineIR,
    targets: &[NodeId],
    barriers: &[NodeId],
) -> Option<NodeId> {
    let mut queue: VecDeque<NodeId> = targets.iter().copied().collect();
    let mut seen = HashSet::new();

    while let Some(id) = queue.pop_front() {
        if barriers.contains(&id) || !seen.insert(id) {
            continue;
        }
        let Some(node) = ir.node(id) else {
            continue;
        };
        match node.kind {
            NodeKind::Join => return Some(id),
            NodeKind::End { .. } => continue,
            _ => queue.extend(node.transitions.iter().map(|t| t.target)),
        }
    }
    None
}
