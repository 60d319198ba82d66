//! Intermediate representation types for the rewire pipeline converter.
//!
//! This crate provides the type definitions shared by every stage of the
//! conversion. Data flows strictly one way:
//!
//! ```text
//! pipeline XML → rewire-parser → PipelineIR → analyzer → AnalysisResult → generator
//! ```
//!
//! The types are designed to be:
//! - Read-only once produced (no stage writes back into a previous stage's output)
//! - Closed sum types, so adding a node or block kind forces every consumer to be revisited
//! - Target-language agnostic (no JavaScript concerns live here)

mod flow;
mod pipeline;
mod types;

pub use flow::{AnalysisResult, AnalyzedFunction, Condition, ControlFlowBlock};
pub use pipeline::{
    CallTarget, ConfigProperty, DecisionNode, InteractionContinueNode, InteractionNode,
    KeyBinding, LoopNode, NodeIR, NodeKind, PipeletNode, PipelineIR, StartNode, Template,
    Transition,
};
pub use types::{NodeId, TransactionControl, connector};
