//! Review nodes. The analysis nodes call the `compute_complexity` / `detect_smells` tools
//! through their context; `check_done` decides whether to loop.

use std::sync::Arc;

use async_trait::async_trait;
use minigraph::{GraphError, Node, NodeContext, NodeError, NodeRegistry, NodeResult, State};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};

use crate::tools::{COMPUTE_COMPLEXITY, DETECT_SMELLS};

/// Quality threshold used when the state carries none.
pub const DEFAULT_THRESHOLD: f64 = 80.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Function {
    name: String,
    code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ComplexityEntry {
    name: String,
    complexity: u64,
}

/// Reads `key` as `T`, or `T::default()` when absent or null.
fn read<T: DeserializeOwned + Default>(state: &State, key: &str) -> Result<T, NodeError> {
    match state.get(key) {
        None | Some(Value::Null) => Ok(T::default()),
        Some(v) => serde_json::from_value(v.clone())
            .map_err(|e| NodeError::failed(format!("invalid `{}` in state: {}", key, e))),
    }
}

fn read_number(state: &State, key: &str, default: f64) -> Result<f64, NodeError> {
    match state.get(key) {
        None | Some(Value::Null) => Ok(default),
        Some(v) => v
            .as_f64()
            .ok_or_else(|| NodeError::failed(format!("`{}` must be a number, got {}", key, v))),
    }
}

fn to_value<T: Serialize>(value: &T) -> Result<Value, NodeError> {
    serde_json::to_value(value).map_err(|e| NodeError::failed(e.to_string()))
}

/// Reads the integer field `field` out of a tool result.
fn tool_count(tool: &str, out: &Value, field: &str) -> Result<u64, NodeError> {
    out.get(field).and_then(Value::as_u64).ok_or_else(|| {
        NodeError::failed(format!("tool `{}` returned no `{}`: {}", tool, field, out))
    })
}

/// Splits `code` on top-level `def` boundaries. Text before the first `def` is skipped.
fn split_functions(code: &str) -> Vec<Function> {
    code.split("\ndef ")
        .enumerate()
        .filter(|(i, part)| *i > 0 || part.trim_start().starts_with("def "))
        .map(|(_, part)| {
            let part = part.trim();
            let text = if part.starts_with("def ") {
                part.to_string()
            } else {
                format!("def {}", part)
            };
            let header = text.lines().next().unwrap_or_default();
            let name = header
                .split('(')
                .next()
                .unwrap_or_default()
                .replacen("def ", "", 1)
                .trim()
                .to_string();
            Function { name, code: text }
        })
        .collect()
}

/// `code` → `functions`.
pub struct ExtractFunctions;

#[async_trait]
impl Node for ExtractFunctions {
    fn name(&self) -> &str {
        "extract_functions"
    }

    async fn run(&self, mut state: State, _ctx: &NodeContext) -> Result<NodeResult, NodeError> {
        let code: String = read(&state, "code")?;
        let functions = split_functions(&code);
        let log = format!("extracted {} function(s)", functions.len());
        state.insert("functions".into(), to_value(&functions)?);
        Ok(NodeResult::new(state).with_log(log))
    }
}

/// `functions` → `complexity_report`, one `compute_complexity` call per function.
pub struct CheckComplexity;

#[async_trait]
impl Node for CheckComplexity {
    fn name(&self) -> &str {
        "check_complexity"
    }

    async fn run(&self, mut state: State, ctx: &NodeContext) -> Result<NodeResult, NodeError> {
        let functions: Vec<Function> = read(&state, "functions")?;
        let mut report = Vec::with_capacity(functions.len());
        for f in functions {
            let out = ctx
                .call_tool(COMPUTE_COMPLEXITY, json!({ "code": f.code }))
                .await?;
            report.push(ComplexityEntry {
                complexity: tool_count(COMPUTE_COMPLEXITY, &out, "complexity")?,
                name: f.name,
            });
        }
        state.insert("complexity_report".into(), to_value(&report)?);
        Ok(NodeResult::new(state).with_log("computed complexity"))
    }
}

/// `functions` → `issues = {total, detail}`, one `detect_smells` call per function.
pub struct DetectBasicIssues;

#[async_trait]
impl Node for DetectBasicIssues {
    fn name(&self) -> &str {
        "detect_basic_issues"
    }

    async fn run(&self, mut state: State, ctx: &NodeContext) -> Result<NodeResult, NodeError> {
        let functions: Vec<Function> = read(&state, "functions")?;
        let mut total = 0;
        let mut detail = Vec::with_capacity(functions.len());
        for f in functions {
            let out = ctx
                .call_tool(DETECT_SMELLS, json!({ "code": f.code }))
                .await?;
            let issues = tool_count(DETECT_SMELLS, &out, "issues")?;
            total += issues;
            detail.push(json!({ "name": f.name, "issues": issues }));
        }
        state.insert("issues".into(), json!({ "total": total, "detail": detail }));
        Ok(NodeResult::new(state).with_log(format!("detected {} issues", total)))
    }
}

/// `complexity_report`, `issues.total` → `quality_score`, `suggestions`.
///
/// `quality_score = max(0, 100 - 5 * total_complexity - 10 * issues)`.
pub struct SuggestImprovements;

#[async_trait]
impl Node for SuggestImprovements {
    fn name(&self) -> &str {
        "suggest_improvements"
    }

    async fn run(&self, mut state: State, _ctx: &NodeContext) -> Result<NodeResult, NodeError> {
        let report: Vec<ComplexityEntry> = read(&state, "complexity_report")?;
        let total_complexity: u64 = report.iter().map(|e| e.complexity).sum();
        let issues = minigraph::state::lookup(&state, "issues.total")
            .and_then(Value::as_u64)
            .unwrap_or(0);

        let penalty = total_complexity
            .saturating_mul(5)
            .saturating_add(issues.saturating_mul(10));
        let quality_score = 100u64.saturating_sub(penalty);

        let mut suggestions = Vec::new();
        if issues > 0 {
            suggestions.push("Fix TODOs and prints");
        }
        if total_complexity > 10 {
            suggestions.push("Refactor complex functions into smaller pieces");
        }

        state.insert("quality_score".into(), json!(quality_score));
        state.insert("suggestions".into(), json!(suggestions));
        Ok(NodeResult::new(state)
            .with_log(format!("suggested improvements; score={}", quality_score)))
    }
}

/// Loops back to `loop_to` while `quality_score < threshold`; otherwise follows declared edges
/// (none in the prebuilt graph, so the run completes).
pub struct CheckDone {
    loop_to: String,
}

impl CheckDone {
    /// Loops back to `check_complexity`.
    pub fn new() -> Self {
        Self::looping_to("check_complexity")
    }

    pub fn looping_to(node: impl Into<String>) -> Self {
        Self {
            loop_to: node.into(),
        }
    }
}

impl Default for CheckDone {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Node for CheckDone {
    fn name(&self) -> &str {
        "check_done"
    }

    async fn run(&self, state: State, _ctx: &NodeContext) -> Result<NodeResult, NodeError> {
        let threshold = read_number(&state, "threshold", DEFAULT_THRESHOLD)?;
        let quality = read_number(&state, "quality_score", 0.0)?;
        if quality >= threshold {
            let log = format!("quality {} >= threshold {}", quality, threshold);
            Ok(NodeResult::new(state).with_log(log))
        } else {
            let log = format!("quality {} < threshold {}; looping", quality, threshold);
            Ok(NodeResult::new(state).with_log(log).goto(self.loop_to.clone()))
        }
    }
}

/// Registers the five review nodes under their step names.
pub fn register_nodes(registry: &mut NodeRegistry) -> Result<(), GraphError> {
    registry
        .register(Arc::new(ExtractFunctions))?
        .register(Arc::new(CheckComplexity))?
        .register(Arc::new(DetectBasicIssues))?
        .register(Arc::new(SuggestImprovements))?
        .register(Arc::new(CheckDone::new()))?;
    Ok(())
}
