//! Structured control-flow reconstruction.

use indexmap::IndexSet;
use rewire_ir::{
    AnalysisResult, AnalyzedFunction, CallTarget, Condition, ControlFlowBlock, NodeId, NodeIR,
    NodeKind, PipelineIR, connector,
};
use tracing::{debug, trace};

use super::{
    convergence::find_convergence_point,
    success::SuccessConditions,
    walk::{Exit, WalkContext},
};

/// External symbols referenced by generated code.
pub mod symbol {
    pub const ISML: &str = "ISML";
    pub const URL_UTILS: &str = "URLUtils";
    pub const APP: &str = "app";
    pub const GUARD: &str = "guard";
}

/// What the enclosing walk does after a split.
enum Flow {
    /// Resume at this node.
    Resume(NodeId),
    /// The split ended the walk.
    Stop(Exit),
}

/// Rebuilds structured control flow from a pipeline graph.
///
/// One function is produced per start node, in document order, followed by
/// one form handler per interaction-continue node, in id order. Graph
/// irregularities never fail the analysis; they are reported as warnings and
/// the affected path is cut short.
pub struct Analyzer<'a> {
    ir: &'a PipelineIR,
    success: &'a SuccessConditions,
}

impl<'a> Analyzer<'a> {
    pub fn new(ir: &'a PipelineIR, success: &'a SuccessConditions) -> Self {
        Self { ir, success }
    }

    /// Analyze every entry point of the pipeline.
    pub fn analyze(&self) -> AnalysisResult {
        let mut result = AnalysisResult::default();

        for (node, start) in self.ir.starts() {
            let mut ctx = WalkContext::default();
            let (blocks, _) = self.walk(Some(node.id), &mut ctx);
            let function = self.function(
                &start.name,
                node.id,
                start.public,
                start.secure,
                false,
                ControlFlowBlock::sequence(blocks),
                ctx.required,
            );
            self.finish(&mut result, function, ctx.warnings);
        }

        for (node, cont) in self.ir.continue_nodes() {
            let mut ctx = WalkContext::default();
            if cont.connectors.is_empty() {
                ctx.warn(format!(
                    "interaction-continue node {} declares no connectors",
                    node.id
                ));
            }
            let body = self.handler_body(node, &mut ctx);
            let name = cont.handler_name(node.id);
            let function =
                self.function(&name, node.id, true, cont.secure, true, body, ctx.required);
            self.finish(&mut result, function, ctx.warnings);
        }

        result
    }

    #[allow(clippy::too_many_arguments)]
    fn function(
        &self,
        name: &str,
        entry: NodeId,
        is_public: bool,
        is_secure: bool,
        is_form_handler: bool,
        body: ControlFlowBlock,
        mut required_symbols: IndexSet<String>,
    ) -> AnalyzedFunction {
        if is_public {
            required_symbols.insert(symbol::GUARD.to_string());
        }
        let ends_with_interaction = self.ends_with_interaction(&body);
        AnalyzedFunction {
            name: name.to_string(),
            entry,
            is_public,
            is_secure,
            is_form_handler,
            body,
            required_symbols,
            ends_with_interaction,
        }
    }

    fn finish(&self, result: &mut AnalysisResult, function: AnalyzedFunction, warnings: Vec<String>) {
        debug!(
            function = %function.name,
            statements = function.body.statements().len(),
            warnings = warnings.len(),
            "analyzed function"
        );
        result.warnings.extend(
            warnings
                .into_iter()
                .map(|w| format!("{}: {}", function.name, w)),
        );
        result.functions.push(function);
    }

    /// Walk forward from `from` until the path terminates, converges on a
    /// stop node or loops back to the enclosing loop.
    fn walk(&self, from: Option<NodeId>, ctx: &mut WalkContext) -> (Vec<ControlFlowBlock>, Exit) {
        let mut blocks = Vec::new();
        let mut current = from;

        while let Some(id) = current {
            if ctx.is_stop(id) {
                return (blocks, Exit::Converged(id));
            }
            if ctx.loop_head == Some(id) {
                return (blocks, Exit::LoopBack);
            }
            let Some(node) = self.ir.node(id) else {
                ctx.warn(format!("transition to missing node {}", id));
                return (blocks, Exit::Open);
            };
            if !ctx.visited.insert(id) {
                ctx.warn(format!(
                    "cycle detected at {} node {}",
                    node.kind.as_str(),
                    id
                ));
                return (blocks, Exit::Open);
            }
            trace!(node = %id, kind = node.kind.as_str(), "visit");

            current = match &node.kind {
                NodeKind::Start(_) | NodeKind::Join => default_target(node),
                NodeKind::End { .. } => {
                    blocks.push(ControlFlowBlock::statement(id));
                    return (blocks, Exit::Terminated);
                }
                NodeKind::Interaction(_) => {
                    ctx.require(symbol::ISML);
                    blocks.push(ControlFlowBlock::statement(id));
                    return (blocks, Exit::Terminated);
                }
                NodeKind::InteractionContinue(_) => {
                    ctx.require(symbol::URL_UTILS);
                    ctx.require(symbol::ISML);
                    blocks.push(ControlFlowBlock::statement(id));
                    return (blocks, Exit::Terminated);
                }
                NodeKind::Jump(_) => {
                    ctx.require(symbol::URL_UTILS);
                    blocks.push(ControlFlowBlock::statement(id));
                    return (blocks, Exit::Terminated);
                }
                NodeKind::Decision(decision) => {
                    let then_target = node.transition_for(connector::YES).map(|t| t.target);
                    if then_target.is_none() {
                        ctx.warn(format!("decision node {} has no \"yes\" transition", id));
                    }
                    let else_target = node
                        .transition_for(connector::NO)
                        .or_else(|| {
                            node.transitions.iter().find(|t| {
                                !matches!(
                                    t.connector.as_deref(),
                                    Some(connector::YES) | Some(connector::ERROR)
                                )
                            })
                        })
                        .map(|t| t.target);
                    let condition = Condition::Decision {
                        key: decision.condition_key.clone(),
                        operator: decision.condition_operator.clone(),
                    };
                    let (block, flow) =
                        self.split(node, vec![(condition, then_target)], else_target, ctx);
                    blocks.push(block);
                    match flow {
                        Flow::Resume(next) => Some(next),
                        Flow::Stop(exit) => return (blocks, exit),
                    }
                }
                NodeKind::Pipelet(pipelet) => {
                    blocks.push(ControlFlowBlock::statement(id));
                    if pipelet.has_error_branch {
                        let success = default_target(node);
                        let failure = node.transition_for(connector::ERROR).map(|t| t.target);
                        let condition = self.success.condition_for(pipelet);
                        let (block, flow) =
                            self.split(node, vec![(condition, success)], failure, ctx);
                        blocks.push(block);
                        match flow {
                            Flow::Resume(next) => Some(next),
                            Flow::Stop(exit) => return (blocks, exit),
                        }
                    } else {
                        default_target(node)
                    }
                }
                NodeKind::Call(target) => {
                    if self.is_remote(target) {
                        ctx.require(symbol::APP);
                    }
                    blocks.push(ControlFlowBlock::statement(id));

                    let arms: Vec<(Condition, Option<NodeId>)> = node
                        .transitions
                        .iter()
                        .filter(|t| !t.is_default())
                        .filter_map(|t| {
                            let label = t.connector.clone()?;
                            Some((Condition::CallResult { label }, Some(t.target)))
                        })
                        .collect();
                    let fallthrough = node
                        .transitions
                        .iter()
                        .find(|t| t.is_default())
                        .map(|t| t.target);

                    if arms.is_empty() {
                        fallthrough
                    } else {
                        let (block, flow) = self.split(node, arms, fallthrough, ctx);
                        blocks.push(block);
                        match flow {
                            Flow::Resume(next) => Some(next),
                            Flow::Stop(exit) => return (blocks, exit),
                        }
                    }
                }
                NodeKind::Loop(looping) => {
                    let body_target = node
                        .transition_for(connector::DO)
                        .or_else(|| node.transition_for(connector::LOOP))
                        .map(|t| t.target);
                    let exit_target = node
                        .transitions
                        .iter()
                        .find(|t| {
                            !matches!(
                                t.connector.as_deref(),
                                Some(connector::DO) | Some(connector::LOOP)
                            )
                        })
                        .map(|t| t.target);

                    let mut body_ctx = ctx.loop_body(id);
                    let body = match body_target {
                        Some(target) => self.walk(Some(target), &mut body_ctx).0,
                        None => {
                            body_ctx.warn(format!("loop node {} has no body", id));
                            Vec::new()
                        }
                    };
                    ctx.absorb(body_ctx);

                    blocks.push(ControlFlowBlock::looping(
                        looping.element_key.clone(),
                        looping.iterator_key.clone(),
                        ControlFlowBlock::sequence(body),
                    ));
                    exit_target
                }
            };
        }

        (blocks, Exit::Open)
    }

    /// Build an if/else chain over `arms`, with `otherwise` as the final else.
    fn split(
        &self,
        node: &NodeIR,
        arms: Vec<(Condition, Option<NodeId>)>,
        otherwise: Option<NodeId>,
        ctx: &mut WalkContext,
    ) -> (ControlFlowBlock, Flow) {
        let targets: Vec<NodeId> = arms
            .iter()
            .filter_map(|(_, target)| *target)
            .chain(otherwise)
            .collect();
        let convergence = find_convergence_point(self.ir, &targets, &ctx.barriers());
        trace!(node = %node.id, convergence = ?convergence, "split");

        // Every arm starts from the same snapshot of the parent context. The
        // else arm is the last entry of each list.
        let mut conditions = Vec::new();
        let mut bodies = Vec::new();
        let mut exits = Vec::new();
        let mut finished = Vec::new();
        for (condition, target) in arms {
            let mut arm = ctx.fork(convergence);
            let (blocks, exit) = self.walk(target, &mut arm);
            conditions.push(condition);
            bodies.push(blocks);
            exits.push(exit);
            finished.push(arm);
        }
        let mut fallback = ctx.fork(convergence);
        let (else_blocks, else_exit) = self.walk(otherwise, &mut fallback);
        bodies.push(else_blocks);
        exits.push(else_exit);
        finished.push(fallback);

        let else_index = exits.len() - 1;
        let arm_converged =
            convergence.is_some_and(|c| exits[..else_index].contains(&Exit::Converged(c)));
        let mut adopted = false;

        // An else arm that goes straight to the convergence point while no
        // other arm reaches it takes over the code after that point.
        if let Some(point) = convergence
            && bodies[else_index].is_empty()
            && exits[else_index] == Exit::Converged(point)
            && !arm_converged
        {
            let mut tail = ctx.fork(None);
            let (blocks, exit) = self.walk(Some(point), &mut tail);
            bodies[else_index] = blocks;
            exits[else_index] = exit;
            finished.push(tail);
            adopted = true;
        }

        // Arms leaving for an enclosing stop or loop head skip the code after
        // this split's convergence point, so that code moves into the arms
        // that reach it.
        if let Some(point) = convergence
            && !adopted
            && exits.contains(&Exit::Converged(point))
            && exits.iter().any(|e| escapes(*e, point))
        {
            trace!(node = %node.id, convergence = %point, "tail moved into arms");
            for i in 0..exits.len() {
                if exits[i] != Exit::Converged(point) {
                    continue;
                }
                finished[i].release(point);
                let (blocks, exit) = self.walk(Some(point), &mut finished[i]);
                bodies[i].extend(blocks);
                exits[i] = exit;
            }
        }

        for arm in finished {
            ctx.absorb(arm);
        }

        let mut bodies = bodies.into_iter();
        let mut block = ControlFlowBlock::sequence(bodies.next_back().unwrap_or_default());
        for (condition, then_blocks) in conditions.into_iter().zip(bodies).rev() {
            block = ControlFlowBlock::if_else(
                condition,
                ControlFlowBlock::sequence(then_blocks),
                Some(block),
            );
        }

        let flow = match convergence {
            Some(point) if !adopted && exits.contains(&Exit::Converged(point)) => Flow::Resume(point),
            _ => {
                if convergence.is_none()
                    && exits.contains(&Exit::Open)
                    && !exits.iter().any(|e| matches!(e, Exit::Converged(_)))
                {
                    ctx.warn(format!(
                        "branches of {} node {} neither terminate nor reconverge",
                        node.kind.as_str(),
                        node.id
                    ));
                }
                Flow::Stop(Exit::combine(&exits))
            }
        };

        (block, flow)
    }

    /// Body of the form handler paired with an interaction-continue node.
    fn handler_body(&self, node: &NodeIR, ctx: &mut WalkContext) -> ControlFlowBlock {
        let mut blocks = Vec::new();
        let mut finished = Vec::new();

        for transition in &node.transitions {
            let Some(action) = transition.connector.as_deref().filter(|_| !transition.is_default())
            else {
                continue;
            };
            let mut arm = ctx.fork(None);
            let (body, _) = self.walk(Some(transition.target), &mut arm);
            finished.push(arm);
            blocks.push(ControlFlowBlock::if_else(
                Condition::FormAction {
                    action: action.to_string(),
                },
                ControlFlowBlock::sequence(body),
                None,
            ));
        }

        // Unlabelled exit: what happens when no known action was triggered.
        if let Some(default) = node.transitions.iter().find(|t| t.is_default()) {
            let mut arm = ctx.fork(None);
            let (body, _) = self.walk(Some(default.target), &mut arm);
            finished.push(arm);
            blocks.extend(body);
        }

        for arm in finished {
            ctx.absorb(arm);
        }
        ControlFlowBlock::sequence(blocks)
    }

    fn is_remote(&self, target: &CallTarget) -> bool {
        match target {
            CallTarget::Static { pipeline, .. } => *pipeline != self.ir.name,
            CallTarget::Dynamic { .. } => true,
        }
    }

    /// Whether every path through the block's final statement renders a template.
    fn ends_with_interaction(&self, block: &ControlFlowBlock) -> bool {
        match block {
            ControlFlowBlock::Sequence { blocks } => blocks
                .last()
                .is_some_and(|last| self.ends_with_interaction(last)),
            ControlFlowBlock::IfElse {
                then_block,
                else_block,
                ..
            } => {
                self.ends_with_interaction(then_block)
                    || else_block
                        .as_deref()
                        .is_some_and(|b| self.ends_with_interaction(b))
            }
            ControlFlowBlock::Loop { body, .. } => self.ends_with_interaction(body),
            ControlFlowBlock::TryCatch { body, .. } => self.ends_with_interaction(body),
            ControlFlowBlock::Statement { node } => self
                .ir
                .node(*node)
                .is_some_and(|n| n.kind.renders_template()),
        }
    }
}

/// Whether an arm exit leaves a split without passing `point`.
fn escapes(exit: Exit, point: NodeId) -> bool {
    match exit {
        Exit::Converged(other) => other != point,
        Exit::LoopBack => true,
        Exit::Terminated | Exit::Open => false,
    }
}

/// The plain continuation of a node: its default transition, otherwise the
/// first one that is not an error exit.
fn default_target(node: &NodeIR) -> Option<NodeId> {
    node.transitions
        .iter()
        .find(|t| t.is_default())
        .or_else(|| {
            node.transitions
                .iter()
                .find(|t| t.connector.as_deref() != Some(connector::ERROR))
        })
        .map(|t| t.target)
}
