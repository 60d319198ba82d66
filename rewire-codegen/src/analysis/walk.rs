//! Walk state threaded through the analyzer.

use std::collections::HashSet;

use indexmap::IndexSet;
use rewire_ir::NodeId;
use tracing::debug;

/// How a walk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Exit {
    /// Reached a terminal node.
    Terminated,
    /// Reached one of the stop nodes bounding the walk.
    Converged(NodeId),
    /// Transition back to the enclosing loop node.
    LoopBack,
    /// Ran out of transitions, or was truncated by a cycle or dangling target.
    Open,
}

impl Exit {
    /// Combine the exits of parallel arms.
    ///
    /// Convergence wins over everything, then open paths, then loop-backs.
    pub fn combine(exits: &[Exit]) -> Exit {
        exits
            .iter()
            .find(|e| matches!(e, Exit::Converged(_)))
            .or_else(|| exits.iter().find(|e| **e == Exit::Open))
            .or_else(|| exits.iter().find(|e| **e == Exit::LoopBack))
            .copied()
            .unwrap_or(Exit::Terminated)
    }
}

/// Per-walk context.
///
/// Branches get their own copy through [`WalkContext::fork`] and are folded
/// back with [`WalkContext::absorb`] once every arm of a split is done.
#[derive(Debug, Clone, Default)]
pub(crate) struct WalkContext {
    pub visited: HashSet<NodeId>,
    /// Nodes the walk must stop in front of.
    pub stops: Vec<NodeId>,
    /// Loop node whose body is being collected.
    pub loop_head: Option<NodeId>,
    pub required: IndexSet<String>,
    pub warnings: Vec<String>,
}

impl WalkContext {
    /// Copy of this context for one arm of a split, bounded by `stop`.
    pub fn fork(&self, stop: Option<NodeId>) -> Self {
        let mut stops = self.stops.clone();
        stops.extend(stop);
        Self {
            visited: self.visited.clone(),
            stops,
            loop_head: self.loop_head,
            required: IndexSet::new(),
            warnings: Vec::new(),
        }
    }

    /// Fresh context for a loop body headed by `head`.
    pub fn loop_body(&self, head: NodeId) -> Self {
        Self {
            visited: self.visited.clone(),
            stops: Vec::new(),
            loop_head: Some(head),
            required: IndexSet::new(),
            warnings: Vec::new(),
        }
    }

    /// Fold a finished arm back into this context.
    pub fn absorb(&mut self, arm: WalkContext) {
        self.visited.extend(arm.visited);
        self.required.extend(arm.required);
        self.warnings.extend(arm.warnings);
    }

    /// Stop treating `stop` as a boundary so the walk can carry on past it.
    pub fn release(&mut self, stop: NodeId) {
        self.stops.retain(|s| *s != stop);
    }

    /// Nodes a convergence search must not pass through.
    pub fn barriers(&self) -> Vec<NodeId> {
        self.stops.iter().copied().chain(self.loop_head).collect()
    }

    pub fn is_stop(&self, id: NodeId) -> bool {
        self.stops.contains(&id)
    }

    pub fn require(&mut self, symbol: &str) {
        if !self.required.contains(symbol) {
            self.required.insert(symbol.to_string());
        }
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!(warning = %message, "analysis warning");
        self.warnings.push(message);
    }
}
