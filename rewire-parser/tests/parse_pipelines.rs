use rewire_ir::{CallTarget, NodeId, NodeKind, PipelineIR, TransactionControl};
use rewire_parser::{Error, parse};

fn kinds(ir: &PipelineIR) -> Vec<&'static str> {
    ir.nodes.values().map(|n| n.kind.as_str()).collect()
}

fn targets(ir: &PipelineIR, id: u32) -> Vec<(u32, Option<&str>)> {
    ir.node(NodeId(id))
        .unwrap()
        .transitions
        .iter()
        .map(|t| (t.target.0, t.connector.as_deref()))
        .collect()
}

#[test]
fn test_straight_line_pipeline() {
    let ir = parse(
        r#"<?xml version="1.0" encoding="UTF-8" ?>
        <pipeline group="Account">
          <branch basename="Show">
            <segment>
              <node><start-node call-mode="public" name="Show" secure="true"/><node-display x="1" y="0"/></node>
              <simple-transition/>
              <node>
                <pipelet-node pipelet-name="GetCustomer" pipelet-set-identifier="bc_api">
                  <key-binding alias="null" key="null"/>
                  <key-binding alias="Customer" key="Customer"/>
                </pipelet-node>
              </node>
              <simple-transition/>
              <node><end-node name="done"/></node>
            </segment>
          </branch>
        </pipeline>"#,
        "Account",
    )
    .unwrap();

    assert_eq!(ir.name, "Account");
    assert_eq!(ir.group.as_deref(), Some("Account"));
    assert_eq!(kinds(&ir), vec!["start", "pipelet", "end"]);
    assert_eq!(ir.start_nodes, vec![NodeId(1)]);
    assert_eq!(targets(&ir, 1), vec![(2, None)]);
    assert_eq!(targets(&ir, 2), vec![(3, None)]);
    assert!(targets(&ir, 3).is_empty());

    match &ir.node(NodeId(2)).unwrap().kind {
        NodeKind::Pipelet(p) => {
            assert_eq!(p.key_bindings.len(), 1);
            assert_eq!(p.binding("Customer"), Some("Customer"));
        }
        other => panic!("expected pipelet, got {:?}", other),
    }
}

#[test]
fn test_empty_transition_element_links_nodes() {
    let ir = parse(
        r#"<pipeline>
          <branch basename="Show">
            <segment>
              <node><start-node name="Show"/></node>
              <transition transaction-control="begin"/>
              <node><end-node/></node>
            </segment>
          </branch>
        </pipeline>"#,
        "Account",
    )
    .unwrap();

    let start = ir.node(NodeId(1)).unwrap();
    assert_eq!(start.transitions.len(), 1);
    assert_eq!(start.transitions[0].target, NodeId(2));
    assert_eq!(
        start.transitions[0].transaction,
        Some(TransactionControl::Begin)
    );
}

#[test]
fn test_decision_branch_inside_node_element_is_merged() {
    // The "yes" branch sits inside the decision element, the error-free "no"
    // path continues in the segment. Both must reach the graph.
    let ir = parse(
        r#"<pipeline>
          <branch basename="Show">
            <segment>
              <node><start-node name="Show"/></node>
              <simple-transition/>
              <node>
                <decision-node condition-key="CurrentCustomer.authenticated">
                  <branch basename="b2" source-connector="yes">
                    <segment>
                      <node><end-node name="in"/></node>
                    </segment>
                  </branch>
                </decision-node>
              </node>
              <simple-transition/>
              <node><end-node name="out"/></node>
            </segment>
          </branch>
        </pipeline>"#,
        "Account",
    )
    .unwrap();

    assert_eq!(kinds(&ir), vec!["start", "decision", "end", "end"]);
    assert_eq!(targets(&ir, 2), vec![(3, Some("yes")), (4, None)]);

    match &ir.node(NodeId(2)).unwrap().kind {
        NodeKind::Decision(d) => assert_eq!(d.condition_operator, "expr"),
        other => panic!("expected decision, got {:?}", other),
    }
}

#[test]
fn test_branches_at_both_levels_are_merged() {
    let ir = parse(
        r#"<pipeline>
          <branch basename="Show">
            <segment>
              <node><start-node name="Show"/></node>
              <simple-transition/>
              <node>
                <pipelet-node pipelet-name="GetProduct">
                  <branch basename="b3" source-connector="error">
                    <segment><node><end-node name="FAIL"/></node></segment>
                  </branch>
                </pipelet-node>
                <branch basename="b2" source-connector="next">
                  <segment><node><end-node name="OK"/></node></segment>
                </branch>
              </node>
            </segment>
          </branch>
        </pipeline>"#,
        "Product",
    )
    .unwrap();

    // wrapper branches come first, then the element's own
    assert_eq!(targets(&ir, 2), vec![(3, Some("next")), (4, Some("error"))]);
    match &ir.node(NodeId(2)).unwrap().kind {
        NodeKind::Pipelet(p) => assert!(p.has_error_branch),
        other => panic!("expected pipelet, got {:?}", other),
    }
}

#[test]
fn test_relative_transitions_across_segments() {
    let ir = parse(
        r#"<pipeline>
          <branch basename="Show">
            <segment>
              <node><start-node name="Show"/></node>
              <simple-transition/>
              <node>
                <decision-node condition-key="Basket">
                  <branch basename="b2" source-connector="yes">
                    <transition target-connector="in1" target-path="../+1"/>
                  </branch>
                </decision-node>
              </node>
              <transition target-connector="in" target-path="./+1"/>
            </segment>
            <segment>
              <node><join-node/></node>
              <simple-transition/>
              <node><end-node/></node>
            </segment>
          </branch>
        </pipeline>"#,
        "Cart",
    )
    .unwrap();

    assert_eq!(kinds(&ir), vec!["start", "decision", "join", "end"]);
    // both exits land on the first node of /Show.2
    assert_eq!(targets(&ir, 2), vec![(3, Some("yes")), (3, None)]);
    assert_eq!(targets(&ir, 3), vec![(4, None)]);
}

#[test]
fn test_forward_reference_to_later_branch() {
    let ir = parse(
        r#"<pipeline>
          <branch basename="Show">
            <segment>
              <node><start-node name="Show"/></node>
              <transition target-path="/Common.1.2"/>
            </segment>
          </branch>
          <branch basename="Common">
            <segment>
              <node><join-node/></node>
              <simple-transition/>
              <node><end-node/></node>
            </segment>
          </branch>
        </pipeline>"#,
        "Cart",
    )
    .unwrap();

    assert_eq!(targets(&ir, 1), vec![(3, None)]);
}

#[test]
fn test_unresolved_transition_is_dropped() {
    let ir = parse(
        r#"<pipeline>
          <branch basename="Show">
            <segment>
              <node><start-node name="Show"/></node>
              <transition target-path="./+7"/>
            </segment>
          </branch>
        </pipeline>"#,
        "Cart",
    )
    .unwrap();

    assert!(targets(&ir, 1).is_empty());
}

#[test]
fn test_text_nodes_are_skipped() {
    let ir = parse(
        r#"<pipeline>
          <branch basename="_ANONYMOUS_BRANCH_1">
            <segment>
              <node><text-node><description>Note</description></text-node></node>
            </segment>
          </branch>
          <branch basename="Show">
            <segment>
              <node><start-node name="Show"/></node>
              <simple-transition/>
              <node><jump-node start-name-ref="Home-Show"/></node>
            </segment>
          </branch>
        </pipeline>"#,
        "Cart",
    )
    .unwrap();

    assert_eq!(kinds(&ir), vec!["start", "jump"]);
    assert_eq!(ir.start_nodes, vec![NodeId(1)]);
    match &ir.node(NodeId(2)).unwrap().kind {
        NodeKind::Jump(CallTarget::Static { pipeline, start }) => {
            assert_eq!(pipeline, "Home");
            assert_eq!(start, "Show");
        }
        other => panic!("expected jump, got {:?}", other),
    }
}

#[test]
fn test_interaction_continue_handler_branches() {
    let ir = parse(
        r#"<pipeline>
          <branch basename="Login">
            <segment>
              <node><start-node call-mode="public" name="Login"/></node>
              <simple-transition/>
              <node>
                <interaction-continue-node secure-connection-required="true" start-name="LoginForm">
                  <template buffered="false" dynamic="false" name="account/login"/>
                </interaction-continue-node>
                <branch basename="b2" source-connector="login">
                  <segment><node><end-node name="loggedIn"/></node></segment>
                </branch>
                <branch basename="b3" source-connector="register">
                  <segment><node><jump-node start-name-ref="Account-Register"/></node></segment>
                </branch>
              </node>
            </segment>
          </branch>
        </pipeline>"#,
        "Account",
    )
    .unwrap();

    let (node, cont) = ir.continue_nodes().next().unwrap();
    assert_eq!(node.id, NodeId(2));
    assert_eq!(cont.handler, "LoginForm");
    assert_eq!(cont.connectors, vec!["login", "register"]);
    assert_eq!(targets(&ir, 2), vec![(3, Some("login")), (4, Some("register"))]);
}

#[test]
fn test_malformed_xml_is_fatal() {
    let err = parse("<pipeline><branch></pipeline>", "Broken").unwrap_err();
    assert!(matches!(*err, Error::Xml { .. }));
}

#[test]
fn test_wrong_root_is_fatal() {
    let err = parse("<controller/>", "Broken").unwrap_err();
    assert!(matches!(*err, Error::Structure { .. }));
    assert!(err.to_string().contains("<pipeline>"));
}
