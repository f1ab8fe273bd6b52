//! Node failures, panics, predicate failures, invalid overrides, store failures and frozen runs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use minigraph::{
    Branch, Condition, EngineConfig, GraphError, GraphSpec, InMemoryGraphStore, InMemoryRunStore,
    RunMutator, RunOptions, RunOutcome, RunState, RunStore, StepStatus, WorkflowEngine,
};
use serde_json::json;

use crate::common::{engine, nodes, state, tools};

fn panicking_spec() -> GraphSpec {
    let mut spec = GraphSpec::new("a");
    spec.add_node("a", "step_a")
        .add_node("bad", "panics")
        .add_edge("a", "bad");
    spec
}

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

/// Run store whose first `update` fails; everything else goes to an in-memory store.
struct FailFirstUpdate {
    inner: InMemoryRunStore,
    failed: AtomicBool,
}

#[async_trait]
impl RunStore for FailFirstUpdate {
    async fn save(&self, run: RunState) -> Result<(), GraphError> {
        self.inner.save(run).await
    }

    async fn get(&self, run_id: &str) -> Result<RunState, GraphError> {
        self.inner.get(run_id).await
    }

    async fn update(&self, run_id: &str, mutator: RunMutator) -> Result<RunState, GraphError> {
        if !self.failed.swap(true, Ordering::SeqCst) {
            return Err(GraphError::Store("disk full".into()));
        }
        self.inner.update(run_id, mutator).await
    }

    async fn list(&self) -> Result<Vec<String>, GraphError> {
        self.inner.list().await
    }
}

/// **Scenario**: A failing node ends the run; earlier steps stay in the logs.
#[tokio::test]
async fn node_failure_ends_run() {
    let engine = engine();
    let mut spec = GraphSpec::new("a");
    spec.add_node("a", "step_a")
        .add_node("boom", "boom")
        .add_node("b", "step_b")
        .add_edge("a", "boom")
        .add_edge("boom", "b");
    let graph_id = engine.create_graph(spec).await.unwrap();

    let run = engine
        .run(&graph_id, state(json!({})), RunOptions::sync())
        .await
        .unwrap();

    assert!(run.finished);
    assert!(run.is_failed());
    assert_eq!(run.current_node, "boom");
    assert_eq!(run.logs.len(), 2);
    assert_eq!(run.logs[0].status, StepStatus::Ok);
    match &run.logs[1].status {
        StepStatus::Failed { error } => assert!(error.contains("exploded"), "{}", error),
        other => panic!("expected Failed, got {:?}", other),
    }
    match &run.outcome {
        RunOutcome::Failed { node, .. } => assert_eq!(node, "boom"),
        other => panic!("expected Failed outcome, got {:?}", other),
    }
    assert!(run.error.as_deref().unwrap_or_default().contains("boom"));
    // State is the last successful node's output.
    assert_eq!(run.state["visited"], json!(["a"]));
}

/// **Scenario**: A panicking node fails the run like any other node error.
#[tokio::test]
async fn node_panic_fails_sync_run() {
    let engine = engine();
    let graph_id = engine.create_graph(panicking_spec()).await.unwrap();

    let run = engine
        .run(&graph_id, state(json!({})), RunOptions::sync())
        .await
        .unwrap();

    assert!(run.finished && run.is_failed());
    assert_eq!(run.current_node, "bad");
    assert_eq!(run.logs.len(), 2);
    assert!(
        run.error.as_deref().unwrap_or_default().contains("panicked"),
        "{:?}",
        run.error
    );
    assert_eq!(run.state["visited"], json!(["a"]));
}

/// **Scenario**: A node panic in a background run still reaches a finished, failed snapshot.
#[tokio::test]
async fn node_panic_finishes_background_run() {
    let engine = engine();
    let graph_id = engine.create_graph(panicking_spec()).await.unwrap();

    let initial = engine
        .run(&graph_id, state(json!({})), RunOptions::background())
        .await
        .unwrap();
    assert!(!initial.finished);

    let done = poll_until_finished(&engine, &initial.run_id).await;
    assert!(done.is_failed());
    assert_eq!(done.iterations, 2);
    match &done.outcome {
        RunOutcome::Failed { node, error } => {
            assert_eq!(node, "bad");
            assert!(error.contains("panicked"), "{}", error);
        }
        other => panic!("expected Failed outcome, got {:?}", other),
    }
}

/// **Scenario**: A store failure mid-run marks the background run failed instead of leaving it
/// running.
#[tokio::test]
async fn store_failure_finishes_background_run() {
    let runs = Arc::new(FailFirstUpdate {
        inner: InMemoryRunStore::new(),
        failed: AtomicBool::new(false),
    });
    let engine = WorkflowEngine::with_stores(
        Arc::new(nodes()),
        Arc::new(tools()),
        Arc::new(InMemoryGraphStore::new()),
        runs,
        EngineConfig::default(),
    );
    let mut spec = GraphSpec::new("a");
    spec.add_node("a", "step_a")
        .add_node("b", "step_b")
        .add_edge("a", "b");
    let graph_id = engine.create_graph(spec).await.unwrap();

    let initial = engine
        .run(&graph_id, state(json!({})), RunOptions::background())
        .await
        .unwrap();

    let done = poll_until_finished(&engine, &initial.run_id).await;
    assert!(done.is_failed());
    assert!(
        done.error.as_deref().unwrap_or_default().contains("disk full"),
        "{:?}",
        done.error
    );
}

/// **Scenario**: An override to an undeclared node fails the run with the node named.
#[tokio::test]
async fn override_to_undeclared_node_fails() {
    let engine = engine();
    let mut spec = GraphSpec::new("jump");
    spec.add_node("jump", "jump_nowhere");
    let graph_id = engine.create_graph(spec).await.unwrap();

    let run = engine
        .run(&graph_id, state(json!({})), RunOptions::sync())
        .await
        .unwrap();

    assert!(run.is_failed());
    assert_eq!(run.logs.len(), 1);
    assert!(run.error.as_deref().unwrap_or_default().contains("ghost"));
}

/// **Scenario**: A predicate comparing a string with a number fails the run.
#[tokio::test]
async fn predicate_error_fails_run() {
    let engine = engine();
    let mut spec = GraphSpec::new("check");
    spec.add_node("check", "keep_low")
        .add_node("done", "step_b")
        .add_conditional_edge(
            "check",
            vec![Branch::new(Condition::lt("quality_score", 80), "check")],
            Some("done".into()),
        );
    let graph_id = engine.create_graph(spec).await.unwrap();

    let run = engine
        .run(&graph_id, state(json!({"quality_score": "high"})), RunOptions::sync())
        .await
        .unwrap();

    assert!(run.is_failed());
    assert_eq!(run.iterations, 1);
    assert!(run
        .error
        .as_deref()
        .unwrap_or_default()
        .contains("predicate"));
}

/// **Scenario**: Unknown graph id is an error and creates no run.
#[tokio::test]
async fn unknown_graph_creates_no_run() {
    let engine = engine();
    let err = engine
        .run("no-such-graph", state(json!({})), RunOptions::sync())
        .await
        .unwrap_err();
    assert!(matches!(err, GraphError::GraphNotFound(id) if id == "no-such-graph"));
    assert!(engine.list_runs().await.unwrap().is_empty());

    assert!(matches!(
        engine.get_run("no-such-run").await,
        Err(GraphError::RunNotFound(_))
    ));
}

/// **Scenario**: A finished run keeps returning the same snapshot and rejects updates.
#[tokio::test]
async fn finished_run_is_frozen() {
    let runs = Arc::new(InMemoryRunStore::new());
    let engine = WorkflowEngine::with_stores(
        Arc::new(nodes()),
        Arc::new(tools()),
        Arc::new(InMemoryGraphStore::new()),
        runs.clone(),
        EngineConfig::default(),
    );
    let mut spec = GraphSpec::new("a");
    spec.add_node("a", "step_a");
    let graph_id = engine.create_graph(spec).await.unwrap();
    let run = engine
        .run(&graph_id, state(json!({})), RunOptions::sync())
        .await
        .unwrap();

    let mutator: RunMutator = Box::new(|r: &mut RunState| r.iterations = 99);
    assert!(matches!(
        runs.update(&run.run_id, mutator).await,
        Err(GraphError::RunFinished(_))
    ));
    assert!(matches!(
        runs.save(run.clone()).await,
        Err(GraphError::RunFinished(_))
    ));

    let first = engine.get_run(&run.run_id).await.unwrap();
    let second = engine.get_run(&run.run_id).await.unwrap();
    assert_eq!(first, run);
    assert_eq!(second, run);
}
