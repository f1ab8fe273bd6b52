//! Rule-based analysis tools: `compute_complexity` and `detect_smells`.
//!
//! Both take `{"code": "<source>"}`. The plain functions are exported so callers can use the
//! heuristics without going through a registry.

use minigraph::{ToolError, ToolRegistry};
use serde_json::{json, Value};

pub const COMPUTE_COMPLEXITY: &str = "compute_complexity";
pub const DETECT_SMELLS: &str = "detect_smells";

/// Branching keywords, each occurrence adds one to the complexity score.
const BRANCH_KEYWORDS: [&str; 5] = ["if ", "for ", "while ", "try:", "except"];

/// Line count above which a snippet counts as two extra smells.
const LONG_CODE_LINES: usize = 200;

/// 1 plus the number of branching keyword occurrences.
pub fn compute_complexity(code: &str) -> u64 {
    1 + BRANCH_KEYWORDS
        .iter()
        .map(|kw| code.matches(kw).count() as u64)
        .sum::<u64>()
}

/// One point for a TODO, one for a `print(` call, two for code longer than 200 lines.
pub fn detect_smells(code: &str) -> u64 {
    let mut issues = 0;
    if code.contains("TODO") {
        issues += 1;
    }
    if code.contains("print(") {
        issues += 1;
    }
    if code.lines().count() > LONG_CODE_LINES {
        issues += 2;
    }
    issues
}

/// Registers both tools. Fails with `DuplicateTool` if either name is taken.
pub fn register_tools(registry: &mut ToolRegistry) -> Result<(), ToolError> {
    registry
        .register_fn(COMPUTE_COMPLEXITY, |args: Value| {
            let code = code_arg(COMPUTE_COMPLEXITY, &args)?;
            Ok(json!({ "complexity": compute_complexity(code) }))
        })?
        .register_fn(DETECT_SMELLS, |args: Value| {
            let code = code_arg(DETECT_SMELLS, &args)?;
            Ok(json!({ "issues": detect_smells(code) }))
        })?;
    Ok(())
}

fn code_arg<'a>(tool: &str, args: &'a Value) -> Result<&'a str, ToolError> {
    args.get("code")
        .and_then(Value::as_str)
        .ok_or_else(|| ToolError::InvalidArguments {
            tool: tool.to_string(),
            message: "expected {\"code\": string}".to_string(),
        })
}
