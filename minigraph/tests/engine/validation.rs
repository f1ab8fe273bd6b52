//! create_graph rejections, one per validation rule.

use minigraph::{GraphError, GraphSpec, ValidationError, END};

use crate::common::engine;

async fn rejection(spec: GraphSpec) -> ValidationError {
    match engine().create_graph(spec).await {
        Err(GraphError::InvalidGraph(e)) => e,
        Err(e) => panic!("expected InvalidGraph, got {}", e),
        Ok(id) => panic!("expected rejection, graph {} was stored", id),
    }
}

/// **Scenario**: No nodes at all.
#[tokio::test]
async fn empty_graph() {
    assert_eq!(
        rejection(GraphSpec::new("a")).await,
        ValidationError::EmptyGraph
    );
}

/// **Scenario**: Edge from an undeclared node.
#[tokio::test]
async fn unknown_edge_source() {
    let mut spec = GraphSpec::new("a");
    spec.add_node("a", "step_a").add_edge("ghost", "a");
    assert_eq!(
        rejection(spec).await,
        ValidationError::UnknownEdgeSource("ghost".into())
    );
}

/// **Scenario**: Edge to an undeclared node.
#[tokio::test]
async fn unknown_edge_target() {
    let mut spec = GraphSpec::new("a");
    spec.add_node("a", "step_a").add_edge("a", "ghost");
    assert_eq!(
        rejection(spec).await,
        ValidationError::UnknownEdgeTarget {
            from: "a".into(),
            to: "ghost".into()
        }
    );
}

/// **Scenario**: Start node not declared.
#[tokio::test]
async fn unknown_start_node() {
    let mut spec = GraphSpec::new("ghost");
    spec.add_node("a", "step_a");
    assert_eq!(
        rejection(spec).await,
        ValidationError::UnknownStartNode("ghost".into())
    );
}

/// **Scenario**: A node may not use the reserved terminal name.
#[tokio::test]
async fn reserved_node_name() {
    let mut spec = GraphSpec::new("a");
    spec.add_node("a", "step_a").add_node(END, "step_b");
    assert_eq!(
        rejection(spec).await,
        ValidationError::ReservedNodeName(END.into())
    );
}

/// **Scenario**: Step name missing from the node registry.
#[tokio::test]
async fn unknown_step() {
    let mut spec = GraphSpec::new("a");
    spec.add_node("a", "not_registered");
    assert_eq!(
        rejection(spec).await,
        ValidationError::UnknownStep {
            node: "a".into(),
            step: "not_registered".into()
        }
    );
}

/// **Scenario**: Graph-level max_steps of zero.
#[tokio::test]
async fn zero_max_steps() {
    let mut spec = GraphSpec::new("a");
    spec.add_node("a", "step_a");
    assert_eq!(
        rejection(spec.with_max_steps(0)).await,
        ValidationError::ZeroMaxSteps
    );
}

/// **Scenario**: A spec deserialized from JSON with compact edge forms is accepted.
#[tokio::test]
async fn json_spec_with_compact_edges() {
    let spec: GraphSpec = serde_json::from_value(serde_json::json!({
        "nodes": {"check": "keep_low", "done": "step_b"},
        "edges": {
            "check": {"field": "quality_score", "op": "<", "value": 80, "true": "check", "false": "done"}
        },
        "start_node": "check",
        "max_steps": 10
    }))
    .unwrap();
    let engine = engine();
    let id = engine.create_graph(spec.clone()).await.unwrap();
    assert_eq!(engine.graph(&id).await.unwrap(), spec);
}
