//! Two-pass graph construction.
//!
//! The first pass walks branches, segments and node wrappers in document
//! order, assigning ids and linking adjacent nodes. Explicit transitions are
//! queued as pending because they frequently point at segments that have not
//! been visited yet. The second pass resolves them once every node path is
//! known.

use std::collections::HashMap;

use rewire_ir::{NodeId, NodeIR, NodeKind, PipelineIR, TransactionControl, Transition};
use tracing::debug;

use crate::{
    error::{Result, SourceContext},
    nodes::node_kind,
    path::{child_path, resolve_target_path},
    xml::Element,
};

/// A transition whose target path still needs resolving.
#[derive(Debug)]
struct Pending {
    source: NodeId,
    base: String,
    target_path: String,
    connector: Option<String>,
    transaction: Option<TransactionControl>,
}

/// An edge waiting for the next node of the current segment.
#[derive(Debug)]
struct Link {
    source: NodeId,
    connector: Option<String>,
    transaction: Option<TransactionControl>,
}

pub(crate) struct GraphBuilder<'a> {
    ctx: &'a SourceContext,
    pipeline: PipelineIR,
    next_id: u32,
    paths: HashMap<String, NodeId>,
    pending: Vec<Pending>,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(ctx: &'a SourceContext, name: &str) -> Self {
        Self {
            ctx,
            pipeline: PipelineIR::new(name),
            next_id: 1,
            paths: HashMap::new(),
            pending: Vec::new(),
        }
    }

    /// Build the pipeline graph from the document root.
    pub fn build(mut self, root: &Element) -> Result<PipelineIR> {
        if root.name != "pipeline" {
            return Err(self.ctx.structure_error(
                format!("expected <pipeline> root element, found <{}>", root.name),
                Some(root.span),
            ));
        }
        self.pipeline.group = root.attr("group").map(str::to_string);

        for (index, branch) in root.children_named("branch").enumerate() {
            let path = format!("/{}", basename(branch, index));
            self.branch(branch, &path, None)?;
        }

        self.resolve_pending();

        debug!(
            pipeline = %self.pipeline.name,
            nodes = self.pipeline.nodes.len(),
            starts = self.pipeline.start_nodes.len(),
            "parsed pipeline"
        );
        Ok(self.pipeline)
    }

    /// Walk one branch. `owner` is the node a nested branch hangs off,
    /// together with the connector labelling the edge into it.
    fn branch(
        &mut self,
        branch: &Element,
        path: &str,
        owner: Option<(NodeId, &str, Option<&str>)>,
    ) -> Result<()> {
        for (index, segment) in branch.children_named("segment").enumerate() {
            let segment_path = child_path(path, index + 1);
            let first = self.segment(segment, &segment_path)?;

            // The owning node enters a nested branch at its first segment.
            if index == 0
                && let (Some((source, _, connector)), Some(first)) = (owner, first)
            {
                self.link(source, first, connector.map(str::to_string), None);
            }
        }

        // Transitions placed directly in a nested branch leave the owning node.
        for transition in branch.children_named("transition") {
            let Some((source, owner_path, connector)) = owner else {
                debug!(branch = path, "ignoring transition outside of a node branch");
                continue;
            };
            match transition.attr("target-path") {
                Some(target) => self.pending.push(Pending {
                    source,
                    base: owner_path.to_string(),
                    target_path: target.to_string(),
                    connector: connector.map(str::to_string),
                    transaction: transaction(transition),
                }),
                None => debug!(branch = path, "ignoring branch transition without target"),
            }
        }
        Ok(())
    }

    /// Walk one segment and return the id of its first node.
    fn segment(&mut self, segment: &Element, path: &str) -> Result<Option<NodeId>> {
        let mut first = None;
        let mut previous: Option<NodeId> = None;
        let mut waiting: Option<Link> = None;
        let mut position = 0;

        for child in &segment.children {
            match child.name.as_str() {
                "node" => {
                    position += 1;
                    let node_path = child_path(path, position);
                    let Some(id) = self.node(child, &node_path)? else {
                        continue;
                    };
                    if let Some(link) = waiting.take() {
                        self.link(link.source, id, link.connector, link.transaction);
                    }
                    first.get_or_insert(id);
                    previous = Some(id);
                }
                "simple-transition" | "transition" => {
                    let Some(source) = previous else {
                        debug!(segment = path, "transition without a preceding node");
                        continue;
                    };
                    let connector = child.attr("source-connector").map(str::to_string);
                    match child.attr("target-path") {
                        Some(target) if child.name == "transition" => {
                            self.pending.push(Pending {
                                source,
                                base: path.to_string(),
                                target_path: target.to_string(),
                                connector,
                                transaction: transaction(child),
                            });
                        }
                        // An attribute-less transition element is still a real edge.
                        _ => {
                            waiting = Some(Link {
                                source,
                                connector,
                                transaction: transaction(child),
                            });
                        }
                    }
                }
                _ => {}
            }
        }

        if waiting.is_some() {
            debug!(segment = path, "segment ends with an open transition");
        }
        Ok(first)
    }

    /// Register one `<node>` wrapper and walk its nested branches.
    fn node(&mut self, wrapper: &Element, path: &str) -> Result<Option<NodeId>> {
        let Some(element) = wrapper
            .children
            .iter()
            .find(|c| c.name.ends_with("-node"))
        else {
            debug!(node = path, "node wrapper without a node element");
            return Ok(None);
        };

        // Branches may sit beside the node element or inside it.
        let branches: Vec<&Element> = wrapper
            .children_named("branch")
            .chain(element.children_named("branch"))
            .collect();

        let Some(kind) = node_kind(element, &branches, &self.pipeline.name) else {
            debug!(node = path, element = %element.name, "skipping element");
            return Ok(None);
        };

        let id = NodeId(self.next_id);
        self.next_id += 1;
        if matches!(kind, NodeKind::Start(_)) {
            self.pipeline.start_nodes.push(id);
        }
        self.pipeline.nodes.insert(id, NodeIR::new(id, kind));
        self.paths.insert(path.to_string(), id);

        for (index, branch) in branches.iter().enumerate() {
            let branch_path = child_path(path, basename(branch, index));
            let connector = branch.attr("source-connector");
            self.branch(branch, &branch_path, Some((id, path, connector)))?;
        }

        Ok(Some(id))
    }

    fn link(
        &mut self,
        source: NodeId,
        target: NodeId,
        connector: Option<String>,
        transaction: Option<TransactionControl>,
    ) {
        if let Some(node) = self.pipeline.nodes.get_mut(&source) {
            node.transitions.push(Transition {
                target,
                connector,
                transaction,
            });
        }
    }

    fn resolve_pending(&mut self) {
        for pending in std::mem::take(&mut self.pending) {
            let target = resolve_target_path(&pending.base, &pending.target_path).and_then(|path| {
                self.paths
                    .get(&path)
                    .or_else(|| self.paths.get(&child_path(&path, 1)))
                    .copied()
            });

            match target {
                Some(target) => {
                    self.link(pending.source, target, pending.connector, pending.transaction)
                }
                // Unresolvable targets are dropped without a warning. Whether this
                // should be escalated is still an open question.
                None => debug!(
                    source = %pending.source,
                    base = %pending.base,
                    target = %pending.target_path,
                    "dropping unresolved transition"
                ),
            }
        }
    }
}

fn basename(branch: &Element, index: usize) -> String {
    branch
        .attr("basename")
        .map(str::to_string)
        .unwrap_or_else(|| format!("_{}", index + 1))
}

fn transaction(element: &Element) -> Option<TransactionControl> {
    element
        .attr("transaction-control")
        .and_then(TransactionControl::parse)
}
