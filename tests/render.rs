//! Tests for merging paths into diagrams and the alternative output formats.
mod common;
use common::*;
use wfgraph::model::Activity;
use wfgraph::prelude::*;

fn mermaid(metadata: &WorkflowMetadata, context: &GraphBuildingContext) -> String {
    let paths = generate_paths(metadata, Some(context)).expect("generation succeeds");
    Renderer::new(context)
        .render(&paths, None)
        .expect("rendering succeeds")
}

#[test]
fn test_linear_workflow_diagram() {
    let metadata = create_linear_workflow();
    let diagram = mermaid(&metadata, &GraphBuildingContext::default());

    let expected = "\
flowchart LR
s((Start))
1[Withdraw Funds]
2[Deposit Funds]
3[Send Receipt]
e((End))
s --> 1
1 --> 2
2 --> 3
3 --> e
";
    assert_eq!(diagram, expected);
}

#[test]
fn test_shared_nodes_are_declared_once() {
    let metadata = create_bare_decisions_workflow();
    let diagram = mermaid(&metadata, &GraphBuildingContext::default());

    let expected = "\
flowchart LR
s((Start))
1[Withdraw]
d0{Need To Convert}
d1{Is TFNKnown}
e((End))
s --> 1
1 --> d0
d0 -- no --> d1
d1 -- no --> e
d0 -- yes --> d1
d1 -- yes --> e
";
    assert_eq!(diagram, expected);
}

#[test]
fn test_reconverging_branches() {
    let metadata = create_two_decision_workflow();
    let diagram = mermaid(&metadata, &GraphBuildingContext::default());

    // withdraw=1, currencyConvert=2, notifyAto=3, takeNonResidentTax=4, deposit=5
    assert!(diagram.contains("d0 -- yes --> 2\n"));
    assert!(diagram.contains("d0 -- no --> d1\n"));
    assert!(diagram.contains("2 --> d1\n"));
    assert!(diagram.contains("d1 -- yes --> 3\n"));
    assert!(diagram.contains("d1 -- no --> 4\n"));
    assert_eq!(diagram.matches("--> 5\n").count(), 2);
    assert_eq!(diagram.matches("5 --> e\n").count(), 1);
}

#[test]
fn test_shapes_for_signal_wait_and_child_workflow() {
    let metadata = create_approval_workflow();
    let diagram = mermaid(&metadata, &GraphBuildingContext::default());

    assert!(diagram.contains("sig_approval_12{{Approval}}\n"));
    assert!(diagram.contains("d0{Is Urgent}\n"));
    assert!(diagram.contains("child_expressshipping_15[[Express Shipping]]\n"));
    assert!(diagram.contains("sig_approval_12 -- approved --> d0\n"));
    assert!(diagram.contains("sig_approval_12 -- timeout --> 2\n"));
    assert!(diagram.contains("d0 -- yes --> child_expressshipping_15\n"));
    assert!(diagram.contains("d0 -- no --> 3\n"));
    assert!(diagram.contains("child_expressshipping_15 --> 3\n"));
}

#[test]
fn test_external_signal_with_target_pattern() {
    let metadata = create_signal_workflow(TargetPattern::Wildcard("shipping-{*}".to_string()));
    let context = GraphBuildingContext::builder()
        .with_signal_label_style(SignalLabelStyle::TargetPattern)
        .build()
        .unwrap();
    let diagram = mermaid(&metadata, &context);

    assert!(diagram.contains(
        "ext_sig_ship_order_12[/\"Signal 'ship_order' to shipping-{*}\"\\]\n"
    ));
    assert!(diagram.contains("1 -.signal.-> ext_sig_ship_order_12\n"));
    assert!(diagram.contains("ext_sig_ship_order_12 -.signal.-> 2\n"));
    assert!(diagram.ends_with("style ext_sig_ship_order_12 fill:#fff4e6,stroke:#ff9800\n"));
    assert_eq!(diagram.matches("style ").count(), 1);
}

#[test]
fn test_external_signal_name_only() {
    let metadata = create_signal_workflow(TargetPattern::Wildcard("shipping-{*}".to_string()));
    let diagram = mermaid(&metadata, &GraphBuildingContext::default());

    assert!(diagram.contains("ext_sig_ship_order_12[/\"Signal 'ship_order'\"\\]\n"));
    assert!(!diagram.contains("shipping-{*}"));
}

#[test]
fn test_hidden_external_signals_are_rewired() {
    let metadata = create_signal_workflow(TargetPattern::Dynamic);
    let context = GraphBuildingContext::builder()
        .with_external_signals(false)
        .build()
        .unwrap();
    let diagram = mermaid(&metadata, &context);

    assert!(!diagram.contains("ext_sig"));
    assert!(!diagram.contains("style "));
    assert!(diagram.contains("1 --> 2\n"));
}

#[test]
fn test_hidden_signal_after_branch_keeps_outcome_label() {
    let mut builder = WorkflowMetadata::builder("Notify");
    builder.activity("prepare", 10, Guard::Always);
    let notice = builder.decision("NeedsNotice", 12, Guard::Always);
    builder.external_signal("notify", TargetPattern::Dynamic, 13, Guard::when(notice, true));
    builder.activity("finish", 15, Guard::Always);
    let metadata = builder.finish().unwrap();

    let shown = mermaid(&metadata, &GraphBuildingContext::default());
    assert!(shown.contains("d0 -- yes --> ext_sig_notify_13\n"));

    let context = GraphBuildingContext::builder()
        .with_external_signals(false)
        .build()
        .unwrap();
    let hidden = mermaid(&metadata, &context);
    assert!(!hidden.contains("ext_sig"));
    assert!(hidden.contains("d0 -- yes --> 2\n"));
    assert!(hidden.contains("d0 -- no --> 2\n"));
    assert!(!hidden.contains("d0 --> 2\n"));
}

#[test]
fn test_edge_labels_are_quoted() {
    let metadata = create_bare_decisions_workflow();
    let context = GraphBuildingContext::builder()
        .with_decision_labels("yes (ok)", "no|x")
        .build()
        .unwrap();
    let diagram = mermaid(&metadata, &context);

    assert!(diagram.contains("d0 -- \"yes (ok)\" --> d1\n"));
    assert!(diagram.contains("d0 -- \"no|x\" --> d1\n"));
    assert!(!diagram.contains("-- no|x -->"));
}

#[test]
fn test_word_splitting_toggle() {
    let metadata = create_linear_workflow();

    let split = mermaid(&metadata, &GraphBuildingContext::default());
    assert!(split.contains("1[Withdraw Funds]"));

    let context = GraphBuildingContext::builder()
        .with_split_names_by_words(false)
        .build()
        .unwrap();
    let unsplit = mermaid(&metadata, &context);
    assert!(unsplit.contains("1[withdrawFunds]"));
}

#[test]
fn test_custom_start_end_labels() {
    let metadata = create_linear_workflow();
    let context = GraphBuildingContext::builder()
        .with_node_labels("Begin", "Done")
        .build()
        .unwrap();
    let diagram = mermaid(&metadata, &context);

    assert!(diagram.contains("s((Begin))\n"));
    assert!(diagram.contains("e((Done))\n"));
}

#[test]
fn test_empty_path_list_renders_start_to_end() {
    let context = GraphBuildingContext::default();
    let diagram = Renderer::new(&context).render(&[], None).unwrap();
    assert_eq!(diagram, "flowchart LR\ns((Start))\ne((End))\ns --> e\n");
}

#[test]
fn test_node_id_collision_is_a_render_error() {
    let metadata = WorkflowMetadata::new(
        "Clash",
        vec![Step::Activity(Activity {
            name: "finish".to_string(),
            node_id: "e".to_string(),
            line: 1,
            membership: Membership::unconditional(),
        })],
        vec![],
    );
    let context = GraphBuildingContext::default();
    let paths = generate_paths(&metadata, Some(&context)).unwrap();

    let err = Renderer::new(&context).render(&paths, None).unwrap_err();
    match err {
        RenderError::ConflictingNode {
            node_id,
            existing,
            incoming,
        } => {
            assert_eq!(node_id, "e");
            assert_eq!(existing, "activity");
            assert_eq!(incoming, "end");
        }
        other => panic!("Expected ConflictingNode, got {:?}", other),
    }
}

#[test]
fn test_node_id_collision_fails_path_listing_too() {
    let metadata = WorkflowMetadata::new(
        "Clash",
        vec![Step::Activity(Activity {
            name: "begin".to_string(),
            node_id: "s".to_string(),
            line: 1,
            membership: Membership::unconditional(),
        })],
        vec![],
    );
    let context = context_with_format(OutputFormat::Paths);
    let paths = generate_paths(&metadata, Some(&context)).unwrap();

    let err = Renderer::new(&context).render(&paths, None).unwrap_err();
    assert!(matches!(err, RenderError::ConflictingNode { ref node_id, .. } if node_id == "s"));
}

#[test]
fn test_path_list_format() {
    let metadata = create_two_decision_workflow();
    let context = context_with_format(OutputFormat::Paths);
    let paths = generate_paths(&metadata, Some(&context)).unwrap();
    let listing = Renderer::new(&context).render(&paths, None).unwrap();

    let lines: Vec<&str> = listing.lines().collect();
    assert_eq!(lines[0], "Decision Points: 2 (2^2 = 4 paths)");
    assert_eq!(lines[1], "");
    assert_eq!(
        lines[2],
        "Path 1: Start → Withdraw → Need To Convert (no) → Is TFNKnown (no) → Take Non Resident Tax → Deposit → End"
    );
    assert_eq!(
        lines[3],
        "Path 2: Start → Withdraw → Need To Convert (yes) → Currency Convert → Is TFNKnown (no) → Take Non Resident Tax → Deposit → End"
    );
    assert_eq!(lines.len(), 6);
}

#[test]
fn test_json_format() {
    let metadata = create_bare_decisions_workflow();
    let context = context_with_format(OutputFormat::Json);
    let paths = generate_paths(&metadata, Some(&context)).unwrap();
    let json = Renderer::new(&context).render(&paths, None).unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["total_branch_points"], 2);
    assert_eq!(value["total_paths"], 4);
    assert_eq!(value["nodes"].as_array().unwrap().len(), 5);
    assert_eq!(value["edges"].as_array().unwrap().len(), 6);
    assert_eq!(value["nodes"][2]["kind"], "decision");
    assert_eq!(value["paths"][0]["nodes"], serde_json::json!(["s", "1", "d0", "d1", "e"]));
    assert_eq!(value["paths"][1]["decisions"]["d0"], true);
    assert!(value.get("warnings").is_none());
}
