//! Background runs: immediate snapshot, polling until finished.

use std::time::Duration;

use minigraph::{Branch, Condition, EngineConfig, GraphSpec, RunOptions, RunState, WorkflowEngine};
use serde_json::json;

use crate::common::{engine, engine_with, state};

async fn poll_until_finished(engine: &WorkflowEngine, run_id: &str) -> RunState {
    for _ in 0..200 {
        let run = engine.get_run(run_id).await.unwrap();
        if run.finished {
            return run;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("run {} did not finish", run_id);
}

fn looping_spec() -> GraphSpec {
    let mut spec = GraphSpec::new("check");
    spec.add_node("check", "bump_score")
        .add_node("done", "step_b")
        .add_conditional_edge(
            "check",
            vec![Branch::new(Condition::lt("quality_score", 100), "check")],
            Some("done".into()),
        );
    spec
}

/// **Scenario**: Background run returns the initial snapshot; polling sees it finish.
#[tokio::test]
async fn background_run_finishes_and_is_pollable() {
    let engine = engine();
    let graph_id = engine.create_graph(looping_spec()).await.unwrap();

    let initial = engine
        .run(&graph_id, state(json!({"quality_score": 0})), RunOptions::background())
        .await
        .unwrap();

    assert!(!initial.finished);
    assert!(initial.logs.is_empty());
    assert_eq!(initial.iterations, 0);
    assert_eq!(initial.current_node, "check");

    let done = poll_until_finished(&engine, &initial.run_id).await;
    assert_eq!(done.state["quality_score"], json!(100));
    assert_eq!(done.current_node, "done");
    assert_eq!(done.logs.len(), 11);
    assert_eq!(done.logs.len(), done.iterations);
}

/// **Scenario**: Every polled snapshot has ordered, gap-free log steps.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn polled_snapshots_are_consistent() {
    let engine = engine();
    let graph_id = engine.create_graph(looping_spec()).await.unwrap();
    let initial = engine
        .run(&graph_id, state(json!({"quality_score": 0})), RunOptions::background())
        .await
        .unwrap();

    loop {
        let run = engine.get_run(&initial.run_id).await.unwrap();
        assert_eq!(run.logs.len(), run.iterations);
        for (i, entry) in run.logs.iter().enumerate() {
            assert_eq!(entry.step, i + 1);
        }
        if run.finished {
            break;
        }
        tokio::task::yield_now().await;
    }
}

/// **Scenario**: With background disabled the request runs synchronously.
#[tokio::test]
async fn background_disabled_falls_back_to_sync() {
    let engine = engine_with(EngineConfig::default().with_background(false));
    let graph_id = engine.create_graph(looping_spec()).await.unwrap();

    let run = engine
        .run(&graph_id, state(json!({"quality_score": 90})), RunOptions::background())
        .await
        .unwrap();

    assert!(run.finished);
    assert_eq!(run.current_node, "done");
}
