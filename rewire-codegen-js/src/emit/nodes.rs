//! Statement renderers, one per node kind.

use rewire_codegen::builder::CodeFragment;
use rewire_ir::{CallTarget, NodeIR, NodeId, NodeKind, Template};

use super::{Emitter, pipelets};
use crate::{
    naming::{function_name, member, string_literal},
    translate::translate,
};

impl Emitter<'_> {
    /// Code for the node a statement block refers to.
    pub(super) fn statement(&self, id: NodeId) -> Vec<CodeFragment> {
        let Some(node) = self.ir.node(id) else {
            return vec![CodeFragment::comment(format!("missing node {}", id))];
        };

        match &node.kind {
            NodeKind::End { name } => vec![CodeFragment::line(match name {
                Some(label) => format!("return {};", string_literal(label)),
                None => "return;".to_string(),
            })],
            NodeKind::Interaction(interaction) => vec![render_template(&interaction.template)],
            NodeKind::InteractionContinue(cont) => {
                let scheme = if cont.secure { "https" } else { "url" };
                let action = format!("{}-{}", self.ir.name, cont.handler_name(node.id));
                vec![
                    CodeFragment::line(format!(
                        "pdict.ContinueURL = URLUtils.{}({});",
                        scheme,
                        string_literal(&action)
                    )),
                    render_template(&cont.template),
                ]
            }
            NodeKind::Call(target) => self.call(node, target),
            NodeKind::Jump(target) => jump(target),
            NodeKind::Pipelet(pipelet) => pipelets::render(pipelet),
            // structural nodes never appear as statements
            NodeKind::Start(_) | NodeKind::Join | NodeKind::Decision(_) | NodeKind::Loop(_) => {
                Vec::new()
            }
        }
    }

    fn call(&self, node: &NodeIR, target: &CallTarget) -> Vec<CodeFragment> {
        // labelled exits are tested against the callee's end-node name
        let captures = node.transitions.iter().any(|t| !t.is_default());
        let statement = |expression: String| {
            if captures {
                format!("var result = {};", expression)
            } else {
                format!("{};", expression)
            }
        };

        match target {
            CallTarget::Static { pipeline, start } if *pipeline == self.ir.name => {
                vec![CodeFragment::line(statement(format!(
                    "{}()",
                    function_name(start)
                )))]
            }
            CallTarget::Static { pipeline, start } => vec![CodeFragment::line(statement(format!(
                "app.getController({}){}()",
                string_literal(pipeline),
                member(start)
            )))],
            CallTarget::Dynamic { key } => vec![
                CodeFragment::line(format!("var target = ({}).split('-');", translate(key))),
                CodeFragment::line(statement(
                    "app.getController(target[0])[target[1]]()".to_string(),
                )),
            ],
        }
    }
}

fn render_template(template: &Template) -> CodeFragment {
    let name = if template.dynamic {
        translate(&template.name)
    } else {
        string_literal(&template.name)
    };
    CodeFragment::line(format!("ISML.renderTemplate({}, pdict);", name))
}

fn jump(target: &CallTarget) -> Vec<CodeFragment> {
    let url = match target {
        CallTarget::Static { pipeline, start } => string_literal(&format!("{}-{}", pipeline, start)),
        CallTarget::Dynamic { key } => translate(key),
    };
    vec![
        CodeFragment::line(format!("response.redirect(URLUtils.url({}));", url)),
        CodeFragment::line("return;"),
    ]
}
