//! Shared nodes and engine setup for engine integration tests.

use std::sync::Arc;

use async_trait::async_trait;
use minigraph::{
    EngineConfig, Node, NodeContext, NodeError, NodeRegistry, NodeResult, State, ToolRegistry,
    WorkflowEngine,
};
use serde_json::{json, Value};

/// Appends its node name to `state.visited`.
fn visit(mut state: State, name: &str) -> State {
    let mut visited = state
        .get("visited")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    visited.push(json!(name));
    state.insert("visited".into(), Value::Array(visited));
    state
}

/// Node that calls the `double` tool on `state.value` and stores the result in `state.doubled`.
pub struct DoubleViaTool;

#[async_trait]
impl Node for DoubleViaTool {
    fn name(&self) -> &str {
        "double_via_tool"
    }

    async fn run(&self, mut state: State, ctx: &NodeContext) -> Result<NodeResult, NodeError> {
        let value = state.get("value").cloned().unwrap_or(Value::Null);
        let out = ctx.call_tool("double", json!({ "value": value })).await?;
        state.insert("doubled".into(), out);
        Ok(NodeResult::new(state).with_log("doubled via tool"))
    }
}

/// Registry with the steps used across the integration tests.
///
/// - `step_a` / `step_b`: append their name to `visited`
/// - `bump_score`: adds 10 to `quality_score`
/// - `keep_low`: leaves `quality_score` unchanged
/// - `wipe`: returns an empty state
/// - `boom`: always fails
/// - `panics`: panics instead of returning
/// - `jump_nowhere`: overrides to an undeclared node
/// - `jump_to_b`: overrides to `b`
/// - `stop_here`: ends the run by override
/// - `double_via_tool`: see [`DoubleViaTool`]
pub fn nodes() -> NodeRegistry {
    let mut nodes = NodeRegistry::new();
    nodes
        .register_fn("step_a", |s: State| Ok(NodeResult::new(visit(s, "a")).with_log("a done")))
        .unwrap()
        .register_fn("step_b", |s: State| Ok(NodeResult::new(visit(s, "b")).with_log("b done")))
        .unwrap()
        .register_fn("bump_score", |mut s: State| {
            let score = s.get("quality_score").and_then(Value::as_i64).unwrap_or(0) + 10;
            s.insert("quality_score".into(), json!(score));
            Ok(NodeResult::new(s).with_log(format!("score {}", score)))
        })
        .unwrap()
        .register_fn("keep_low", |s: State| Ok(NodeResult::new(s)))
        .unwrap()
        .register_fn("wipe", |_s: State| Ok(NodeResult::new(State::new())))
        .unwrap()
        .register_fn("boom", |_s: State| Err(NodeError::failed("exploded")))
        .unwrap()
        .register_fn("panics", |s: State| {
            let empty: Vec<u64> = Vec::new();
            let first = empty[s.len()];
            Ok(NodeResult::new(s).with_log(format!("got {}", first)))
        })
        .unwrap()
        .register_fn("jump_nowhere", |s: State| Ok(NodeResult::new(s).goto("ghost")))
        .unwrap()
        .register_fn("jump_to_b", |s: State| Ok(NodeResult::new(s).goto("b")))
        .unwrap()
        .register_fn("stop_here", |s: State| Ok(NodeResult::new(visit(s, "stop")).end()))
        .unwrap();
    nodes.register(Arc::new(DoubleViaTool)).unwrap();
    nodes
}

/// Registry with a `double` tool: `{"value": n}` -> `n * 2`.
pub fn tools() -> ToolRegistry {
    let mut tools = ToolRegistry::new();
    tools
        .register_fn("double", |args: Value| {
            let n = args.get("value").and_then(Value::as_i64).ok_or_else(|| {
                minigraph::ToolError::InvalidArguments {
                    tool: "double".into(),
                    message: "value must be an integer".into(),
                }
            })?;
            Ok(json!(n * 2))
        })
        .unwrap();
    tools
}

pub fn engine() -> WorkflowEngine {
    engine_with(EngineConfig::default())
}

pub fn engine_with(config: EngineConfig) -> WorkflowEngine {
    WorkflowEngine::new(nodes(), tools(), config)
}

pub fn state(value: Value) -> State {
    minigraph::state::from_value(value)
}
