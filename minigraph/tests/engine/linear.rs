//! Straight-line graphs: ordering, state replacement, log entries, tools.

use minigraph::{GraphSpec, RunOptions, RunOutcome, StepStatus, END};
use serde_json::json;

use crate::common::{engine, state};

/// **Scenario**: a → b runs both nodes in order, logs two entries and stops at b.
#[tokio::test]
async fn two_node_chain_completes() {
    let engine = engine();
    let mut spec = GraphSpec::new("a");
    spec.add_node("a", "step_a")
        .add_node("b", "step_b")
        .add_edge("a", "b");
    let graph_id = engine.create_graph(spec).await.unwrap();

    let run = engine
        .run(&graph_id, state(json!({})), RunOptions::sync())
        .await
        .unwrap();

    assert!(run.finished);
    assert_eq!(run.outcome, RunOutcome::Completed);
    assert_eq!(run.current_node, "b");
    assert_eq!(run.iterations, 2);
    assert_eq!(run.state["visited"], json!(["a", "b"]));

    assert_eq!(run.logs.len(), 2);
    assert_eq!(run.logs[0].step, 1);
    assert_eq!(run.logs[0].node, "a");
    assert_eq!(run.logs[0].message.as_deref(), Some("a done"));
    assert_eq!(run.logs[0].next.as_deref(), Some("b"));
    assert_eq!(run.logs[1].node, "b");
    assert_eq!(run.logs[1].next, None);
    assert!(run.logs.iter().all(|e| e.status == StepStatus::Ok));
    assert!(run.error.is_none());
}

/// **Scenario**: The stored run equals what `run` returned.
#[tokio::test]
async fn get_run_matches_returned_run() {
    let engine = engine();
    let mut spec = GraphSpec::new("a");
    spec.add_node("a", "step_a");
    let graph_id = engine.create_graph(spec).await.unwrap();
    let run = engine
        .run(&graph_id, state(json!({})), RunOptions::sync())
        .await
        .unwrap();

    let stored = engine.get_run(&run.run_id).await.unwrap();
    assert_eq!(stored, run);
    assert_eq!(engine.list_runs().await.unwrap(), vec![run.run_id.clone()]);
}

/// **Scenario**: A node returning an empty state drops every key; no merge happens.
#[tokio::test]
async fn node_output_replaces_state() {
    let engine = engine();
    let mut spec = GraphSpec::new("wipe");
    spec.add_node("wipe", "wipe");
    let graph_id = engine.create_graph(spec).await.unwrap();

    let run = engine
        .run(&graph_id, state(json!({"keep": true, "n": 1})), RunOptions::sync())
        .await
        .unwrap();

    assert!(run.finished);
    assert!(run.state.is_empty());
}

/// **Scenario**: An explicit END edge and an `end()` override both stop the run.
#[tokio::test]
async fn end_edge_and_end_override_stop() {
    let engine = engine();
    let mut spec = GraphSpec::new("a");
    spec.add_node("a", "step_a")
        .add_node("b", "step_b")
        .add_edge("a", END);
    let graph_id = engine.create_graph(spec).await.unwrap();
    let run = engine
        .run(&graph_id, state(json!({})), RunOptions::sync())
        .await
        .unwrap();
    assert_eq!(run.state["visited"], json!(["a"]));
    assert_eq!(run.current_node, "a");

    let mut spec = GraphSpec::new("stop");
    spec.add_node("stop", "stop_here")
        .add_node("b", "step_b")
        .add_edge("stop", "b");
    let graph_id = engine.create_graph(spec).await.unwrap();
    let run = engine
        .run(&graph_id, state(json!({})), RunOptions::sync())
        .await
        .unwrap();
    assert_eq!(run.state["visited"], json!(["stop"]));
    assert_eq!(run.logs.len(), 1);
    assert_eq!(run.outcome, RunOutcome::Completed);
}

/// **Scenario**: An override to a declared node wins over the declared edge.
#[tokio::test]
async fn override_beats_declared_edge() {
    let engine = engine();
    let mut spec = GraphSpec::new("jump");
    spec.add_node("jump", "jump_to_b")
        .add_node("a", "step_a")
        .add_node("b", "step_b")
        .add_edge("jump", "a");
    let graph_id = engine.create_graph(spec).await.unwrap();

    let run = engine
        .run(&graph_id, state(json!({})), RunOptions::sync())
        .await
        .unwrap();

    assert_eq!(run.state["visited"], json!(["b"]));
    assert_eq!(run.logs[0].next.as_deref(), Some("b"));
}

/// **Scenario**: A node calls a registered tool through its context.
#[tokio::test]
async fn node_calls_tool() {
    let engine = engine();
    assert_eq!(engine.list_tools(), vec!["double".to_string()]);

    let mut spec = GraphSpec::new("double");
    spec.add_node("double", "double_via_tool");
    let graph_id = engine.create_graph(spec).await.unwrap();

    let run = engine
        .run(&graph_id, state(json!({"value": 21})), RunOptions::sync())
        .await
        .unwrap();

    assert_eq!(run.outcome, RunOutcome::Completed);
    assert_eq!(run.state["doubled"], json!(42));
    assert_eq!(run.logs[0].message.as_deref(), Some("doubled via tool"));
}
