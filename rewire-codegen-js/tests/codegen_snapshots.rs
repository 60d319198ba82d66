//! Snapshot tests for JavaScript controller generation.
//!
//! These tests verify that the generated controller code matches expected output.
//! Run `cargo insta review` to update snapshots when making intentional changes.

use rewire_codegen::{Pipeline, analyze};
use rewire_codegen_js::{Generator, LanguageCodegen};
use rewire_ir::{
    CallTarget, ConfigProperty, DecisionNode, KeyBinding, LoopNode, NodeIR, NodeId, NodeKind,
    PipeletNode, PipelineIR, StartNode, Transition,
};

/// Run the full pipeline on a document and return the previewed files.
fn generate_files(xml: &str, name: &str) -> Vec<(String, String)> {
    let ctx = Pipeline::new().run(xml, name).expect("Pipeline failed");
    assert!(!ctx.has_warnings(), "unexpected warnings: {:?}", ctx.diagnostics);
    let generator = Generator::from_context(ctx).expect("Missing pipeline outputs");
    generator
        .preview()
        .into_iter()
        .map(|f| (f.path, f.content))
        .collect()
}

fn pipelet(name: &str, bindings: &[(&str, &str)], config: &[(&str, &str)]) -> NodeKind {
    NodeKind::Pipelet(PipeletNode {
        name: name.into(),
        set_identifier: None,
        key_bindings: bindings
            .iter()
            .map(|(key, alias)| KeyBinding {
                key: key.to_string(),
                alias: alias.to_string(),
            })
            .collect(),
        config: config
            .iter()
            .map(|(key, value)| ConfigProperty {
                key: key.to_string(),
                value: value.to_string(),
            })
            .collect(),
        has_error_branch: false,
    })
}

fn graph(name: &str, nodes: Vec<NodeIR>) -> PipelineIR {
    let mut ir = PipelineIR::new(name);
    for node in nodes {
        if matches!(node.kind, NodeKind::Start(_)) {
            ir.start_nodes.push(node.id);
        }
        ir.nodes.insert(node.id, node);
    }
    ir
}

const ACCOUNT_LOGIN: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<pipeline group="Account">
  <branch basename="Login">
    <segment>
      <node><start-node call-mode="public" name="Login" secure="true"/></node>
      <simple-transition/>
      <node>
        <decision-node condition-key="CurrentCustomer.authenticated">
          <branch basename="b2" source-connector="yes">
            <segment>
              <node><jump-node start-name-ref="Account-Show"/></node>
            </segment>
          </branch>
        </decision-node>
      </node>
      <simple-transition/>
      <node>
        <interaction-continue-node secure-connection-required="true" start-name="LoginForm">
          <template buffered="false" dynamic="false" name="account/login/accountlogin"/>
        </interaction-continue-node>
        <branch basename="b3" source-connector="login">
          <segment>
            <node>
              <pipelet-node pipelet-name="LoginCustomer" pipelet-set-identifier="bc_api">
                <key-binding alias="CurrentForms.login.username.value" key="Login"/>
                <key-binding alias="CurrentForms.login.password.value" key="Password"/>
                <key-binding alias="null" key="null"/>
                <branch basename="b4" source-connector="error">
                  <segment>
                    <node><end-node name="failed"/></node>
                  </segment>
                </branch>
              </pipelet-node>
            </node>
            <simple-transition/>
            <node><jump-node start-name-ref="Account-Show"/></node>
          </segment>
        </branch>
        <branch basename="b5" source-connector="register">
          <segment>
            <node><jump-node start-name-ref="Account-StartRegister"/></node>
          </segment>
        </branch>
      </node>
    </segment>
  </branch>
</pipeline>
"#;

#[test]
fn test_account_login_controller() {
    let files = generate_files(ACCOUNT_LOGIN, "Account");
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].0, "Account.js");

    let controller = &files[0].1;
    insta::assert_snapshot!("account_login", controller);
}

#[test]
fn test_cart_calculate_controller() {
    // start -> script -> loop(assign) -> decision(call | assign) -> join -> remote call(ok | default)
    let ir = graph(
        "Cart",
        vec![
            NodeIR::new(
                NodeId(1),
                NodeKind::Start(StartNode {
                    name: "Calculate".into(),
                    public: false,
                    secure: false,
                }),
            )
            .with_transition(Transition::to(NodeId(2))),
            NodeIR::new(
                NodeId(2),
                pipelet(
                    "Script",
                    &[("Basket", "Basket")],
                    &[("ScriptFile", "app_storefront_core:cart/CalculateCart.ds")],
                ),
            )
            .with_transition(Transition::to(NodeId(3))),
            NodeIR::new(
                NodeId(3),
                NodeKind::Loop(LoopNode {
                    element_key: "ProductLineItem".into(),
                    iterator_key: "Basket.productLineItems".into(),
                }),
            )
            .with_transition(Transition::labelled(NodeId(4), "do"))
            .with_transition(Transition::to(NodeId(6))),
            NodeIR::new(
                NodeId(4),
                pipelet(
                    "Assign",
                    &[("From_0", "ProductLineItem.quantityValue"), ("To_0", "Quantity")],
                    &[],
                ),
            )
            .with_transition(Transition::to(NodeId(3))),
            NodeIR::new(
                NodeId(6),
                NodeKind::Decision(DecisionNode {
                    condition_key: "Quantity > 10".into(),
                    condition_operator: "expr".into(),
                }),
            )
            .with_transition(Transition::labelled(NodeId(7), "yes"))
            .with_transition(Transition::labelled(NodeId(8), "no")),
            NodeIR::new(
                NodeId(7),
                NodeKind::Call(CallTarget::Static {
                    pipeline: "Cart".into(),
                    start: "Notify".into(),
                }),
            )
            .with_transition(Transition::to(NodeId(9))),
            NodeIR::new(
                NodeId(8),
                pipelet("Assign", &[("From_0", "false"), ("To_0", "Notified")], &[]),
            )
            .with_transition(Transition::to(NodeId(9))),
            NodeIR::new(NodeId(9), NodeKind::Join).with_transition(Transition::to(NodeId(10))),
            NodeIR::new(
                NodeId(10),
                NodeKind::Call(CallTarget::Static {
                    pipeline: "Tax".into(),
                    start: "Apply".into(),
                }),
            )
            .with_transition(Transition::labelled(NodeId(11), "ok"))
            .with_transition(Transition::to(NodeId(12))),
            NodeIR::new(
                NodeId(11),
                NodeKind::End {
                    name: Some("done".into()),
                },
            ),
            NodeIR::new(NodeId(12), NodeKind::End { name: None }),
        ],
    );

    let analysis = analyze(&ir);
    assert!(analysis.warnings.is_empty(), "{:?}", analysis.warnings);

    let controller = Generator::new(ir, analysis).render();
    insta::assert_snapshot!("cart_calculate", controller);
}
