//! Structured control flow produced by the analyzer.

use indexmap::IndexSet;
use serde::Serialize;

use crate::NodeId;

/// Structured control-flow tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "block", rename_all = "kebab-case")]
pub enum ControlFlowBlock {
    /// Blocks executed in order.
    Sequence { blocks: Vec<ControlFlowBlock> },
    /// Two-way branch.
    IfElse {
        condition: Condition,
        then_block: Box<ControlFlowBlock>,
        else_block: Option<Box<ControlFlowBlock>>,
    },
    /// Iteration over a collection.
    Loop {
        element: String,
        iterator: String,
        body: Box<ControlFlowBlock>,
    },
    /// Reserved: never produced by the analyzer today.
    TryCatch {
        body: Box<ControlFlowBlock>,
        handler: Box<ControlFlowBlock>,
    },
    /// Leaf referring back to one node.
    Statement { node: NodeId },
}

impl ControlFlowBlock {
    /// Create a sequence.
    pub fn sequence(blocks: Vec<ControlFlowBlock>) -> Self {
        Self::Sequence { blocks }
    }

    /// Create a statement leaf.
    pub fn statement(node: NodeId) -> Self {
        Self::Statement { node }
    }

    /// Create an if/else block. An empty else arm is dropped.
    pub fn if_else(
        condition: Condition,
        then_block: ControlFlowBlock,
        else_block: Option<ControlFlowBlock>,
    ) -> Self {
        Self::IfElse {
            condition,
            then_block: Box::new(then_block),
            else_block: else_block.filter(|b| !b.is_empty()).map(Box::new),
        }
    }

    /// Create a loop block.
    pub fn looping(
        element: impl Into<String>,
        iterator: impl Into<String>,
        body: ControlFlowBlock,
    ) -> Self {
        Self::Loop {
            element: element.into(),
            iterator: iterator.into(),
            body: Box::new(body),
        }
    }

    /// Returns true if the block contains no statements at all.
    pub fn is_empty(&self) -> bool {
        match self {
            ControlFlowBlock::Sequence { blocks } => blocks.iter().all(|b| b.is_empty()),
            _ => false,
        }
    }

    /// Child blocks of a sequence (empty for every other kind).
    pub fn blocks(&self) -> &[ControlFlowBlock] {
        match self {
            ControlFlowBlock::Sequence { blocks } => blocks,
            _ => &[],
        }
    }

    /// All statement node ids in rendering order.
    pub fn statements(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_statements(&mut out);
        out
    }

    fn collect_statements(&self, out: &mut Vec<NodeId>) {
        match self {
            ControlFlowBlock::Sequence { blocks } => {
                for block in blocks {
                    block.collect_statements(out);
                }
            }
            ControlFlowBlock::IfElse {
                then_block,
                else_block,
                ..
            } => {
                then_block.collect_statements(out);
                if let Some(else_block) = else_block {
                    else_block.collect_statements(out);
                }
            }
            ControlFlowBlock::Loop { body, .. } => body.collect_statements(out),
            ControlFlowBlock::TryCatch { body, handler } => {
                body.collect_statements(out);
                handler.collect_statements(out);
            }
            ControlFlowBlock::Statement { node } => out.push(*node),
        }
    }
}

/// Condition of an if/else block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Condition {
    /// Decision node test, opaque pipeline expression plus operator.
    Decision { key: String, operator: String },
    /// Heuristic pipelet success test, written as a pipeline expression.
    Success { expression: String },
    /// No better test is known; always true.
    Always,
    /// Result of a call node equals an end-node label.
    CallResult { label: String },
    /// Triggered form action equals a connector name.
    FormAction { action: String },
}

/// A function produced from one start node or one interaction-continue handler.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzedFunction {
    /// Entry name.
    pub name: String,
    /// Node the function was analysed from.
    pub entry: NodeId,
    /// Whether the function is callable from outside.
    pub is_public: bool,
    /// Whether the function requires an HTTPS context.
    pub is_secure: bool,
    /// Whether this is a form-submission handler.
    pub is_form_handler: bool,
    /// Structured body.
    pub body: ControlFlowBlock,
    /// External symbols referenced by the body, in first-encounter order.
    pub required_symbols: IndexSet<String>,
    /// Whether the body necessarily ends by rendering a template.
    pub ends_with_interaction: bool,
}

/// Output of the analyzer.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisResult {
    pub functions: Vec<AnalyzedFunction>,
    pub warnings: Vec<String>,
}

impl AnalysisResult {
    /// Find a function by name.
    pub fn function(&self, name: &str) -> Option<&AnalyzedFunction> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Required symbols across all functions, deduplicated in first-encounter order.
    pub fn required_symbols(&self) -> IndexSet<&str> {
        self.functions
            .iter()
            .flat_map(|f| f.required_symbols.iter().map(String::as_str))
            .collect()
    }
}
