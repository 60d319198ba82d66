//! Node element decoding.

use rewire_ir::{
    CallTarget, ConfigProperty, DecisionNode, InteractionContinueNode, InteractionNode,
    KeyBinding, LoopNode, NodeKind, PipeletNode, StartNode, Template, connector,
};

use crate::xml::Element;

/// Decode a node element into its IR payload.
///
/// `branches` holds the node's nested branches, already merged from the
/// `<node>` wrapper and the node element itself. Annotation-only and unknown
/// elements yield `None`.
pub(crate) fn node_kind(element: &Element, branches: &[&Element], pipeline: &str) -> Option<NodeKind> {
    let kind = match element.name.as_str() {
        "start-node" => NodeKind::Start(StartNode {
            name: element.attr("name").unwrap_or("Start").to_string(),
            public: element.attr("call-mode") == Some("public"),
            secure: element.flag("secure"),
        }),
        "end-node" => NodeKind::End {
            name: element.attr("name").map(str::to_string),
        },
        "decision-node" => NodeKind::Decision(DecisionNode {
            condition_key: element.attr("condition-key").unwrap_or_default().to_string(),
            condition_operator: element
                .attr("condition-operator")
                .unwrap_or("expr")
                .to_string(),
        }),
        "pipelet-node" => NodeKind::Pipelet(pipelet(element, branches)),
        "call-node" => NodeKind::Call(call_target(element, pipeline)?),
        "jump-node" => NodeKind::Jump(call_target(element, pipeline)?),
        "loop-node" => NodeKind::Loop(LoopNode {
            element_key: element.attr("element-key").unwrap_or_default().to_string(),
            iterator_key: element.attr("iterator-key").unwrap_or_default().to_string(),
        }),
        "join-node" => NodeKind::Join,
        "interaction-node" => NodeKind::Interaction(InteractionNode {
            template: template(element),
        }),
        "interaction-continue-node" => NodeKind::InteractionContinue(InteractionContinueNode {
            template: template(element),
            handler: element.attr("start-name").unwrap_or_default().to_string(),
            secure: element.flag("secure-connection-required"),
            connectors: branches
                .iter()
                .filter_map(|b| b.attr("source-connector"))
                .map(str::to_string)
                .collect(),
        }),
        _ => return None,
    };
    Some(kind)
}

fn pipelet(element: &Element, branches: &[&Element]) -> PipeletNode {
    let key_bindings = element
        .children_named("key-binding")
        .filter_map(|b| {
            let key = b.attr("key").unwrap_or(KeyBinding::NULL);
            let alias = b.attr("alias").unwrap_or(KeyBinding::NULL);
            // both sides unset: intentionally empty binding
            if key == KeyBinding::NULL && alias == KeyBinding::NULL {
                return None;
            }
            Some(KeyBinding {
                key: key.to_string(),
                alias: alias.to_string(),
            })
        })
        .collect();

    let config = element
        .children_named("config-property")
        .filter_map(|p| {
            Some(ConfigProperty {
                key: p.attr("key")?.to_string(),
                value: p.attr("value").unwrap_or_default().to_string(),
            })
        })
        .collect();

    PipeletNode {
        name: element.attr("pipelet-name").unwrap_or_default().to_string(),
        set_identifier: element.attr("pipelet-set-identifier").map(str::to_string),
        key_bindings,
        config,
        has_error_branch: branches
            .iter()
            .any(|b| b.attr("source-connector") == Some(connector::ERROR)),
    }
}

fn call_target(element: &Element, pipeline: &str) -> Option<CallTarget> {
    if let Some(reference) = element.attr("start-name-ref") {
        return Some(CallTarget::from_reference(reference, pipeline));
    }
    element.attr("start-name-key").map(|key| CallTarget::Dynamic {
        key: key.to_string(),
    })
}

fn template(element: &Element) -> Template {
    match element.child("template") {
        Some(t) => Template {
            name: t.attr("name").unwrap_or_default().to_string(),
            buffered: t.flag("buffered"),
            dynamic: t.flag("dynamic"),
        },
        None => Template {
            name: String::new(),
            buffered: false,
            dynamic: false,
        },
    }
}
