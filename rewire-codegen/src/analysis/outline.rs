//! Human-readable rendering of analysed functions.

use rewire_ir::{
    AnalysisResult, AnalyzedFunction, CallTarget, Condition, ControlFlowBlock, NodeId, NodeKind,
    PipelineIR,
};

use crate::builder::{CodeBuilder, CodeFragment, Renderable};

/// Block tree of one analysed function, one node or block per line.
///
/// ```text
/// Show (public) entry #1
///   #2 pipelet GetProduct
///   if Product
///     #4 interaction product/show
///   else
///     #5 end
/// ```
pub struct Outline<'a> {
    ir: &'a PipelineIR,
    function: &'a AnalyzedFunction,
}

impl<'a> Outline<'a> {
    pub fn new(ir: &'a PipelineIR, function: &'a AnalyzedFunction) -> Self {
        Self { ir, function }
    }

    fn header(&self) -> String {
        let f = self.function;
        let mut flags = Vec::new();
        flags.push(if f.is_public { "public" } else { "private" });
        if f.is_secure {
            flags.push("secure");
        }
        if f.is_form_handler {
            flags.push("form handler");
        }
        format!("{} ({}) entry {}", f.name, flags.join(", "), f.entry)
    }

    fn block(&self, block: &ControlFlowBlock) -> Vec<CodeFragment> {
        match block {
            ControlFlowBlock::Sequence { blocks } => {
                blocks.iter().flat_map(|b| self.block(b)).collect()
            }
            ControlFlowBlock::IfElse {
                condition,
                then_block,
                else_block,
            } => {
                let mut out = vec![CodeFragment::block(
                    format!("if {}", describe_condition(condition)),
                    self.block(then_block),
                    None,
                )];
                if let Some(else_block) = else_block {
                    out.push(CodeFragment::block("else", self.block(else_block), None));
                }
                out
            }
            ControlFlowBlock::Loop {
                element,
                iterator,
                body,
            } => vec![CodeFragment::block(
                format!("loop {} in {}", element, iterator),
                self.block(body),
                None,
            )],
            ControlFlowBlock::TryCatch { body, handler } => vec![
                CodeFragment::block("try", self.block(body), None),
                CodeFragment::block("catch", self.block(handler), None),
            ],
            ControlFlowBlock::Statement { node } => {
                vec![CodeFragment::line(self.describe_node(*node))]
            }
        }
    }

    fn describe_node(&self, id: NodeId) -> String {
        let Some(node) = self.ir.node(id) else {
            return format!("{} missing", id);
        };
        let detail = match &node.kind {
            NodeKind::End { name } => name.clone(),
            NodeKind::Pipelet(p) => Some(p.name.clone()),
            NodeKind::Call(target) | NodeKind::Jump(target) => Some(describe_target(target)),
            NodeKind::Interaction(i) => Some(i.template.name.clone()),
            NodeKind::InteractionContinue(c) => {
                Some(format!("{} -> {}", c.template.name, c.handler))
            }
            NodeKind::Decision(d) => Some(d.condition_key.clone()),
            NodeKind::Start(s) => Some(s.name.clone()),
            NodeKind::Loop(_) | NodeKind::Join => None,
        };
        match detail {
            Some(detail) => format!("{} {} {}", id, node.kind.as_str(), detail),
            None => format!("{} {}", id, node.kind.as_str()),
        }
    }
}

impl Renderable for Outline<'_> {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut body = self.block(&self.function.body);
        if body.is_empty() {
            body.push(CodeFragment::line("(empty)"));
        }
        vec![CodeFragment::block(self.header(), body, None)]
    }
}

/// Outline every function of an analysis, followed by its warnings.
pub fn render_outline(ir: &PipelineIR, analysis: &AnalysisResult) -> String {
    let mut builder = CodeBuilder::outline();
    for (i, function) in analysis.functions.iter().enumerate() {
        if i > 0 {
            builder.push_blank();
        }
        builder.emit(&Outline::new(ir, function));
    }
    if !analysis.warnings.is_empty() {
        builder.push_blank().push_line("warnings:").push_indent();
        for warning in &analysis.warnings {
            builder.push_line(warning);
        }
        builder.push_dedent();
    }
    builder.build()
}

/// Short text form of a branch condition.
pub fn describe_condition(condition: &Condition) -> String {
    match condition {
        Condition::Decision { key, operator } if operator == "expr" => key.clone(),
        Condition::Decision { key, operator } => format!("{} [{}]", key, operator),
        Condition::Success { expression } => expression.clone(),
        Condition::Always => "true".to_string(),
        Condition::CallResult { label } => format!("result == '{}'", label),
        Condition::FormAction { action } => format!("action == '{}'", action),
    }
}

fn describe_target(target: &CallTarget) -> String {
    match target {
        CallTarget::Static { pipeline, start } => format!("{}-{}", pipeline, start),
        CallTarget::Dynamic { key } => format!("({})", key),
    }
}
