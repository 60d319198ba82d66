//! Rendering of analysed block trees to JavaScript fragments.
//!
//! Blocks become nested [`CodeFragment`]s; indentation is applied once, when
//! the fragments are written through a [`CodeBuilder`](rewire_codegen::builder::CodeBuilder).

mod nodes;
mod pipelets;

use rewire_codegen::builder::CodeFragment;
use rewire_core::to_camel_case;
use rewire_ir::{Condition, ControlFlowBlock, PipelineIR};

pub use pipelets::script_module;

use crate::{naming::string_literal, translate::translate};

/// Turns the block tree of one pipeline's functions into code fragments.
pub struct Emitter<'a> {
    ir: &'a PipelineIR,
}

impl<'a> Emitter<'a> {
    pub fn new(ir: &'a PipelineIR) -> Self {
        Self { ir }
    }

    /// Fragments for a block and everything below it.
    pub fn block(&self, block: &ControlFlowBlock) -> Vec<CodeFragment> {
        match block {
            ControlFlowBlock::Sequence { blocks } => {
                blocks.iter().flat_map(|b| self.block(b)).collect()
            }
            ControlFlowBlock::IfElse {
                condition,
                then_block,
                else_block,
            } => self.if_chain("if", condition, then_block, else_block.as_deref()),
            ControlFlowBlock::Loop {
                element,
                iterator,
                body,
            } => self.looping(element, iterator, body),
            ControlFlowBlock::TryCatch { body, handler } => vec![
                CodeFragment::block("try {", self.block(body), None),
                CodeFragment::braced("} catch (e) {", self.block(handler)),
            ],
            ControlFlowBlock::Statement { node } => self.statement(*node),
        }
    }

    /// JavaScript test for a branch condition.
    pub fn condition(&self, condition: &Condition) -> String {
        match condition {
            Condition::Decision { key, operator } => {
                let test = translate(key);
                if operator.is_empty() || operator == "expr" {
                    test
                } else {
                    format!("{} /* {} */", test, operator)
                }
            }
            Condition::Success { expression } => translate(expression),
            Condition::Always => "true".to_string(),
            Condition::CallResult { label } => format!("result === {}", string_literal(label)),
            Condition::FormAction { action } => format!("action === {}", string_literal(action)),
        }
    }

    fn if_chain(
        &self,
        keyword: &str,
        condition: &Condition,
        then_block: &ControlFlowBlock,
        else_block: Option<&ControlFlowBlock>,
    ) -> Vec<CodeFragment> {
        let test = self.condition(condition);
        match else_block {
            // only the negative arm does anything
            Some(otherwise) if then_block.is_empty() => vec![CodeFragment::braced(
                format!("{} ({}) {{", keyword, negate(&test)),
                self.block(otherwise),
            )],
            None => vec![CodeFragment::braced(
                format!("{} ({}) {{", keyword, test),
                self.block(then_block),
            )],
            Some(otherwise) => {
                let mut fragments = vec![CodeFragment::block(
                    format!("{} ({}) {{", keyword, test),
                    self.block(then_block),
                    None,
                )];
                match chained(otherwise) {
                    Some((condition, then_block, else_block)) => {
                        fragments.extend(self.if_chain("} else if", condition, then_block, else_block))
                    }
                    None => fragments.push(CodeFragment::braced("} else {", self.block(otherwise))),
                }
                fragments
            }
        }
    }

    fn looping(
        &self,
        element: &str,
        iterator: &str,
        body: &ControlFlowBlock,
    ) -> Vec<CodeFragment> {
        let cursor = iterator_variable(element);
        let mut fragments = vec![CodeFragment::line(format!(
            "{} = {}.next();",
            translate(element),
            cursor
        ))];
        fragments.extend(self.block(body));

        vec![
            CodeFragment::line(format!("var {} = {}.iterator();", cursor, translate(iterator))),
            CodeFragment::braced(format!("while ({}.hasNext()) {{", cursor), fragments),
        ]
    }
}

/// An else arm that is itself a single if/else continues the chain.
fn chained(
    block: &ControlFlowBlock,
) -> Option<(&Condition, &ControlFlowBlock, Option<&ControlFlowBlock>)> {
    match block {
        ControlFlowBlock::IfElse {
            condition,
            then_block,
            else_block,
        } => Some((condition, then_block, else_block.as_deref())),
        ControlFlowBlock::Sequence { blocks } if blocks.len() == 1 => chained(&blocks[0]),
        _ => None,
    }
}

fn negate(test: &str) -> String {
    let simple = test
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '.'));
    if simple {
        format!("!{}", test)
    } else {
        format!("!({})", test)
    }
}

/// Iterator variable for a loop over `element` ("ProductLineItem" -> "productLineItemIterator").
fn iterator_variable(element: &str) -> String {
    let base = element.rsplit('.').next().unwrap_or(element);
    let name: String = to_camel_case(base)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '$')
        .collect();
    match name.chars().next() {
        None => "itemIterator".to_string(),
        Some(c) if c.is_ascii_digit() => format!("_{}Iterator", name),
        Some(_) => format!("{}Iterator", name),
    }
}

#[cfg(test)]
mod tests {
    use rewire_codegen::builder::CodeBuilder;
    use rewire_ir::{NodeIR, NodeId, NodeKind};

    use super::*;

    fn ir() -> PipelineIR {
        let mut ir = PipelineIR::new("Cart");
        for (id, name) in [(1, Some("OK")), (2, Some("FAIL")), (3, None)] {
            let node = NodeIR::new(
                NodeId(id),
                NodeKind::End {
                    name: name.map(str::to_string),
                },
            );
            ir.nodes.insert(node.id, node);
        }
        ir
    }

    fn render(ir: &PipelineIR, block: &ControlFlowBlock) -> String {
        let mut builder = CodeBuilder::controller();
        for fragment in Emitter::new(ir).block(block) {
            builder.apply_fragment(fragment);
        }
        builder.build()
    }

    fn decision(key: &str) -> Condition {
        Condition::Decision {
            key: key.into(),
            operator: "expr".into(),
        }
    }

    #[test]
    fn test_if_else() {
        let ir = ir();
        let block = ControlFlowBlock::if_else(
            decision("Basket"),
            ControlFlowBlock::statement(NodeId(1)),
            Some(ControlFlowBlock::statement(NodeId(2))),
        );
        assert_eq!(
            render(&ir, &block),
            "if (pdict.Basket) {\n    return 'OK';\n} else {\n    return 'FAIL';\n}\n"
        );
    }

    #[test]
    fn test_else_if_chain() {
        let ir = ir();
        let inner = ControlFlowBlock::if_else(
            Condition::CallResult {
                label: "FAIL".into(),
            },
            ControlFlowBlock::statement(NodeId(2)),
            Some(ControlFlowBlock::statement(NodeId(3))),
        );
        let block = ControlFlowBlock::if_else(
            Condition::CallResult { label: "OK".into() },
            ControlFlowBlock::statement(NodeId(1)),
            Some(inner),
        );
        assert_eq!(
            render(&ir, &block),
            "if (result === 'OK') {\n    return 'OK';\n} else if (result === 'FAIL') {\n    return 'FAIL';\n} else {\n    return;\n}\n"
        );
    }

    #[test]
    fn test_empty_then_arm_is_negated() {
        let ir = ir();
        let block = ControlFlowBlock::if_else(
            decision("Basket"),
            ControlFlowBlock::sequence(vec![]),
            Some(ControlFlowBlock::statement(NodeId(2))),
        );
        assert_eq!(render(&ir, &block), "if (!pdict.Basket) {\n    return 'FAIL';\n}\n");

        let block = ControlFlowBlock::if_else(
            decision("Count > 1"),
            ControlFlowBlock::sequence(vec![]),
            Some(ControlFlowBlock::statement(NodeId(2))),
        );
        assert_eq!(
            render(&ir, &block),
            "if (!(pdict.Count > 1)) {\n    return 'FAIL';\n}\n"
        );
    }

    #[test]
    fn test_loop() {
        let ir = ir();
        let block = ControlFlowBlock::looping(
            "ProductLineItem",
            "Basket.productLineItems",
            ControlFlowBlock::sequence(vec![]),
        );
        assert_eq!(
            render(&ir, &block),
            "var productLineItemIterator = Basket.productLineItems.iterator();\nwhile (productLineItemIterator.hasNext()) {\n    pdict.ProductLineItem = productLineItemIterator.next();\n}\n"
        );
    }

    #[test]
    fn test_conditions() {
        let ir = ir();
        let emitter = Emitter::new(&ir);
        assert_eq!(emitter.condition(&Condition::Always), "true");
        assert_eq!(
            emitter.condition(&Condition::FormAction {
                action: "login".into()
            }),
            "action === 'login'"
        );
        assert_eq!(
            emitter.condition(&Condition::Decision {
                key: "Product".into(),
                operator: "isNotNull".into()
            }),
            "pdict.Product /* isNotNull */"
        );
        assert_eq!(
            emitter.condition(&Condition::Success {
                expression: "CurrentCustomer.authenticated".into()
            }),
            "customer.authenticated"
        );
    }

    #[test]
    fn test_iterator_variable() {
        assert_eq!(iterator_variable("Product"), "productIterator");
        assert_eq!(iterator_variable("CurrentSession.custom.Line"), "lineIterator");
        assert_eq!(iterator_variable(""), "itemIterator");
    }
}
