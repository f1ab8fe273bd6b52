//! Structured logging for graph creation and run execution.
//!
//! Thin wrappers over `tracing` so the run loop reads as a sequence of steps and every event
//! carries the same fields (`run_id`, `node`, ...).

use crate::error::GraphError;

/// Log graph registration.
pub fn log_graph_created(graph_id: &str, nodes: usize) {
    tracing::info!(graph_id, nodes, "graph created");
}

/// Log run start.
pub fn log_run_start(run_id: &str, graph_id: &str, iteration_limit: usize, background: bool) {
    tracing::info!(
        run_id,
        graph_id,
        iteration_limit,
        background,
        "starting run"
    );
}

/// Log node execution start.
pub fn log_node_start(run_id: &str, node: &str, step: usize) {
    tracing::debug!(run_id, node, step, "starting node");
}

/// Log node completion and the resolved next node.
pub fn log_node_complete(run_id: &str, node: &str, next: Option<&str>) {
    tracing::debug!(run_id, node, next = next.unwrap_or("<end>"), "node complete");
}

/// Log a terminal node failure.
pub fn log_node_failed(run_id: &str, error: &GraphError) {
    tracing::warn!(run_id, %error, "node failed; run stopped");
}

/// Log a run stopped by its iteration limit.
pub fn log_loop_limit(run_id: &str, node: &str, limit: usize) {
    tracing::warn!(run_id, pending = node, limit, "iteration limit reached; run stopped");
}

/// Log normal run completion.
pub fn log_run_complete(run_id: &str, node: &str, iterations: usize) {
    tracing::info!(run_id, last_node = node, iterations, "run complete");
}

/// Log a store failure that aborted a background run.
pub fn log_run_error(run_id: &str, error: &GraphError) {
    tracing::error!(run_id, %error, "run aborted");
}
