//! Prebuilt code-review graph and sample input.

use minigraph::{EngineConfig, GraphError, GraphSpec, NodeRegistry, State, ToolRegistry, WorkflowEngine};
use serde_json::json;

use super::nodes::register_nodes;
use crate::tools::register_tools;

/// Iteration limit of the prebuilt graph.
pub const MAX_STEPS: usize = 50;

/// Two small functions with a TODO, prints and a few branches. Scores 45.
pub const SAMPLE_CODE: &str = "def foo(x):\n    # TODO: fix this\n    if x > 0:\n        print(x)\n\ndef bar(y):\n    for i in range(y):\n        if i % 2 == 0:\n            print(i)\n";

pub const SAMPLE_THRESHOLD: u64 = 85;

/// `extract → check_complexity → detect_issues → suggest → check_done`, with `check_done`
/// jumping back to `check_complexity` while the score is below the threshold.
pub fn code_review_graph() -> GraphSpec {
    let mut spec = GraphSpec::new("extract");
    spec.add_node("extract", "extract_functions")
        .add_node("check_complexity", "check_complexity")
        .add_node("detect_issues", "detect_basic_issues")
        .add_node("suggest", "suggest_improvements")
        .add_node("check_done", "check_done")
        .add_edge("extract", "check_complexity")
        .add_edge("check_complexity", "detect_issues")
        .add_edge("detect_issues", "suggest")
        .add_edge("suggest", "check_done");
    spec.with_max_steps(MAX_STEPS)
}

/// Initial state for reviewing `code` against `threshold`.
pub fn review_state(code: impl Into<String>, threshold: Option<f64>) -> State {
    let mut state = State::new();
    state.insert("code".into(), json!(code.into()));
    if let Some(t) = threshold {
        state.insert("threshold".into(), json!(t));
    }
    state
}

/// [`SAMPLE_CODE`] with threshold [`SAMPLE_THRESHOLD`].
pub fn sample_state() -> State {
    let mut state = review_state(SAMPLE_CODE, None);
    state.insert("threshold".into(), json!(SAMPLE_THRESHOLD));
    state
}

/// Engine with the review nodes and tools registered.
pub fn code_review_engine(config: EngineConfig) -> Result<WorkflowEngine, GraphError> {
    let mut nodes = NodeRegistry::new();
    register_nodes(&mut nodes)?;
    let mut tools = ToolRegistry::new();
    register_tools(&mut tools)?;
    tracing::debug!(nodes = ?nodes.names(), tools = ?tools.list(), "code review engine ready");
    Ok(WorkflowEngine::new(nodes, tools, config))
}
