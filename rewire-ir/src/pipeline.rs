//! Pipeline Intermediate Representation.
//!
//! This module defines the parsed form of a pipeline graph: typed nodes keyed
//! by their synthetic id, each carrying its outgoing transitions.
//!
//! # Architecture
//!
//! ```text
//! <pipeline> XML → rewire-parser → PipelineIR → analyzer
//! ```

use indexmap::IndexMap;
use serde::Serialize;

use crate::{NodeId, TransactionControl, connector};

/// The whole parsed pipeline graph.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineIR {
    /// Pipeline name (derived from the file name by the caller).
    pub name: String,
    /// Optional group tag from the root element.
    pub group: Option<String>,
    /// All nodes, in id order.
    pub nodes: IndexMap<NodeId, NodeIR>,
    /// Entry nodes, in document order.
    pub start_nodes: Vec<NodeId>,
}

impl PipelineIR {
    /// Create an empty pipeline.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: None,
            nodes: IndexMap::new(),
            start_nodes: Vec::new(),
        }
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&NodeIR> {
        self.nodes.get(&id)
    }

    /// Iterate over all start nodes with their payload.
    pub fn starts(&self) -> impl Iterator<Item = (&NodeIR, &StartNode)> {
        self.start_nodes
            .iter()
            .filter_map(|id| self.nodes.get(id))
            .filter_map(|node| match &node.kind {
                NodeKind::Start(start) => Some((node, start)),
                _ => None,
            })
    }

    /// Find a start node by its entry name.
    pub fn start_by_name(&self, name: &str) -> Option<&NodeIR> {
        self.starts()
            .find(|(_, start)| start.name == name)
            .map(|(node, _)| node)
    }

    /// Iterate over all interaction-continue nodes in id order.
    pub fn continue_nodes(&self) -> impl Iterator<Item = (&NodeIR, &InteractionContinueNode)> {
        self.nodes.values().filter_map(|node| match &node.kind {
            NodeKind::InteractionContinue(cont) => Some((node, cont)),
            _ => None,
        })
    }

    /// Returns true if this pipeline has no entry points.
    pub fn is_empty(&self) -> bool {
        self.start_nodes.is_empty()
    }
}

/// A single typed step of the graph.
#[derive(Debug, Clone, Serialize)]
pub struct NodeIR {
    /// Synthetic id assigned by the parser.
    pub id: NodeId,
    /// Kind-specific payload.
    pub kind: NodeKind,
    /// Outgoing edges.
    pub transitions: Vec<Transition>,
}

impl NodeIR {
    /// Create a node without transitions.
    pub fn new(id: NodeId, kind: NodeKind) -> Self {
        Self {
            id,
            kind,
            transitions: Vec::new(),
        }
    }

    /// Add an outgoing transition.
    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.transitions.push(transition);
        self
    }

    /// The unlabelled ("next") transition, falling back to the first one.
    pub fn next_transition(&self) -> Option<&Transition> {
        self.transitions
            .iter()
            .find(|t| t.is_default())
            .or_else(|| self.transitions.first())
    }

    /// The first transition carrying the given connector label.
    pub fn transition_for(&self, label: &str) -> Option<&Transition> {
        self.transitions
            .iter()
            .find(|t| t.connector.as_deref() == Some(label))
    }

    /// Returns true if any transition carries the given connector label.
    pub fn has_connector(&self, label: &str) -> bool {
        self.transition_for(label).is_some()
    }
}

/// Node payload - one variant per node kind.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum NodeKind {
    /// Entry point of a callable function.
    Start(StartNode),
    /// Terminal node with an optional label returned to the caller.
    End { name: Option<String> },
    /// Boolean test with "yes"/"no" exits.
    Decision(DecisionNode),
    /// Invocation of an externally defined unit of work.
    Pipelet(PipeletNode),
    /// In-process call of another start node.
    Call(CallTarget),
    /// Client redirect to another start node.
    Jump(CallTarget),
    /// Iteration over a collection.
    Loop(LoopNode),
    /// Structural marker where branches reconverge.
    Join,
    /// Template rendering.
    Interaction(InteractionNode),
    /// Template rendering with a paired form-submission handler.
    InteractionContinue(InteractionContinueNode),
}

impl NodeKind {
    /// Get the document element name without the `-node` suffix.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Start(_) => "start",
            NodeKind::End { .. } => "end",
            NodeKind::Decision(_) => "decision",
            NodeKind::Pipelet(_) => "pipelet",
            NodeKind::Call(_) => "call",
            NodeKind::Jump(_) => "jump",
            NodeKind::Loop(_) => "loop",
            NodeKind::Join => "join",
            NodeKind::Interaction(_) => "interaction",
            NodeKind::InteractionContinue(_) => "interaction-continue",
        }
    }

    /// Returns true for nodes after which control never continues in the same function.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            NodeKind::End { .. }
                | NodeKind::Jump(_)
                | NodeKind::Interaction(_)
                | NodeKind::InteractionContinue(_)
        )
    }

    /// Returns true for nodes that render a template.
    pub fn renders_template(&self) -> bool {
        matches!(
            self,
            NodeKind::Interaction(_) | NodeKind::InteractionContinue(_)
        )
    }
}

/// Start node payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartNode {
    /// Entry name (becomes the function name).
    pub name: String,
    /// Whether the entry is callable from outside.
    pub public: bool,
    /// Whether the entry requires an HTTPS context.
    pub secure: bool,
}

/// Decision node payload. The condition is opaque to the analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionNode {
    pub condition_key: String,
    pub condition_operator: String,
}

/// Pipelet node payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipeletNode {
    /// Unit name (e.g. `Assign`, `Script`, `GetProduct`).
    pub name: String,
    /// Originating pipelet set.
    pub set_identifier: Option<String>,
    /// Ordered key bindings; bindings unset on both sides are never present.
    pub key_bindings: Vec<KeyBinding>,
    /// Configuration properties.
    pub config: Vec<ConfigProperty>,
    /// Whether an "error" exit is wired.
    pub has_error_branch: bool,
}

impl PipeletNode {
    /// Pipeline variable bound to the given pipelet key.
    pub fn binding(&self, key: &str) -> Option<&str> {
        self.key_bindings
            .iter()
            .find(|b| b.key == key)
            .map(|b| b.alias.as_str())
    }

    /// Value of a configuration property.
    pub fn config_value(&self, key: &str) -> Option<&str> {
        self.config
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
    }
}

/// Binding of a pipelet key to a pipeline variable or expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyBinding {
    /// Pipelet-side key.
    pub key: String,
    /// Pipeline-side variable or expression.
    pub alias: String,
}

impl KeyBinding {
    /// The literal token used for an unset binding side.
    pub const NULL: &'static str = "null";

    /// Returns true if the pipeline side is unset.
    pub fn is_unbound(&self) -> bool {
        self.alias == Self::NULL
    }
}

/// Pipelet configuration property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigProperty {
    pub key: String,
    pub value: String,
}

/// Target of a call or jump node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum CallTarget {
    /// Statically named `Pipeline-Start` reference.
    Static { pipeline: String, start: String },
    /// Resolved at runtime from a pipeline variable.
    Dynamic { key: String },
}

impl CallTarget {
    /// Build a static target from a `Pipeline-Start` reference.
    ///
    /// A reference without a pipeline part points into `current`.
    pub fn from_reference(reference: &str, current: &str) -> Self {
        match reference.split_once('-') {
            Some((pipeline, start)) => CallTarget::Static {
                pipeline: pipeline.to_string(),
                start: start.to_string(),
            },
            None => CallTarget::Static {
                pipeline: current.to_string(),
                start: reference.to_string(),
            },
        }
    }
}

/// Loop node payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoopNode {
    /// Per-iteration element variable.
    pub element_key: String,
    /// Source collection variable.
    pub iterator_key: String,
}

/// Template reference of an interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Template {
    pub name: String,
    pub buffered: bool,
    /// The name is an expression resolved at runtime.
    pub dynamic: bool,
}

/// Interaction node payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InteractionNode {
    pub template: Template,
}

/// Interaction-continue node payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InteractionContinueNode {
    pub template: Template,
    /// Name of the separately generated submission handler.
    pub handler: String,
    /// Whether the handler requires an HTTPS context.
    pub secure: bool,
    /// Named sub-branches the handler dispatches on.
    pub connectors: Vec<String>,
}

impl InteractionContinueNode {
    /// Entry name of the handler paired with the node `id`.
    ///
    /// Nodes without a `start-name` get `Continue<id>`.
    pub fn handler_name(&self, id: NodeId) -> String {
        if self.handler.is_empty() {
            format!("Continue{}", id.0)
        } else {
            self.handler.clone()
        }
    }
}

/// A directed edge between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    /// Target node id.
    pub target: NodeId,
    /// Branch label; `None` for the plain "next" edge.
    pub connector: Option<String>,
    /// Transaction boundary marker.
    pub transaction: Option<TransactionControl>,
}

impl Transition {
    /// Create an unlabelled transition.
    pub fn to(target: NodeId) -> Self {
        Self {
            target,
            connector: None,
            transaction: None,
        }
    }

    /// Create a labelled transition.
    pub fn labelled(target: NodeId, connector: impl Into<String>) -> Self {
        Self {
            target,
            connector: Some(connector.into()),
            transaction: None,
        }
    }

    /// Returns true for the plain edge (no label or "next").
    pub fn is_default(&self) -> bool {
        match self.connector.as_deref() {
            None => true,
            Some(label) => label == connector::NEXT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipelet(name: &str) -> PipeletNode {
        PipeletNode {
            name: name.into(),
            set_identifier: None,
            key_bindings: vec![KeyBinding {
                key: "Product".into(),
                alias: "Product".into(),
            }],
            config: vec![ConfigProperty {
                key: "Transactional".into(),
                value: "false".into(),
            }],
            has_error_branch: false,
        }
    }

    #[test]
    fn test_call_target_from_reference() {
        assert_eq!(
            CallTarget::from_reference("Cart-Show", "Account"),
            CallTarget::Static {
                pipeline: "Cart".into(),
                start: "Show".into()
            }
        );
        assert_eq!(
            CallTarget::from_reference("Show", "Account"),
            CallTarget::Static {
                pipeline: "Account".into(),
                start: "Show".into()
            }
        );
    }

    #[test]
    fn test_next_transition_prefers_unlabelled() {
        let node = NodeIR::new(NodeId(1), NodeKind::Pipelet(pipelet("GetProduct")))
            .with_transition(Transition::labelled(NodeId(3), "error"))
            .with_transition(Transition::to(NodeId(2)));

        assert_eq!(node.next_transition().map(|t| t.target), Some(NodeId(2)));
        assert_eq!(
            node.transition_for("error").map(|t| t.target),
            Some(NodeId(3))
        );
        assert!(!node.has_connector("yes"));
    }

    #[test]
    fn test_pipelet_lookups() {
        let p = pipelet("GetProduct");
        assert_eq!(p.binding("Product"), Some("Product"));
        assert_eq!(p.binding("Missing"), None);
        assert_eq!(p.config_value("Transactional"), Some("false"));
    }

    #[test]
    fn test_start_by_name() {
        let mut ir = PipelineIR::new("Account");
        let start = NodeIR::new(
            NodeId(1),
            NodeKind::Start(StartNode {
                name: "Show".into(),
                public: true,
                secure: false,
            }),
        );
        ir.nodes.insert(start.id, start);
        ir.start_nodes.push(NodeId(1));

        assert!(ir.start_by_name("Show").is_some());
        assert!(ir.start_by_name("Edit").is_none());
        assert!(!ir.is_empty());
    }

    #[test]
    fn test_handler_name() {
        let mut cont = InteractionContinueNode {
            template: Template {
                name: "account/login".into(),
                buffered: false,
                dynamic: false,
            },
            handler: "LoginForm".into(),
            secure: true,
            connectors: vec!["login".into()],
        };
        assert_eq!(cont.handler_name(NodeId(4)), "LoginForm");
        cont.handler.clear();
        assert_eq!(cont.handler_name(NodeId(4)), "Continue4");
    }

    #[test]
    fn test_terminal_kinds() {
        assert!(NodeKind::End { name: None }.is_terminal());
        assert!(!NodeKind::Join.is_terminal());
        assert_eq!(NodeKind::Join.as_str(), "join");
    }
}
