//! Review runs and report rendering.

use std::fmt::Write as _;
use std::path::PathBuf;

use minigraph::{EngineConfig, RunOptions, RunOutcome, RunState};
use minigraph_workflows::{code_review_engine, code_review_graph, review_state};
use serde_json::Value;

use crate::error::Error;

/// What to review and how.
#[derive(Debug, Clone)]
pub struct ReviewConfig {
    pub path: PathBuf,
    /// Quality threshold; the workflow default (80) applies when `None`.
    pub threshold: Option<f64>,
    /// Iteration limit for the run; the graph's `max_steps` applies when `None`.
    pub max_steps: Option<usize>,
    pub engine: EngineConfig,
}

impl ReviewConfig {
    /// Review of `path` with engine settings from env.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            threshold: None,
            max_steps: None,
            engine: EngineConfig::from_env(),
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }
}

/// Reads `config.path` and reviews its contents.
pub async fn review_file(config: &ReviewConfig) -> Result<RunState, Error> {
    let code = tokio::fs::read_to_string(&config.path)
        .await
        .map_err(|source| Error::Read {
            path: config.path.clone(),
            source,
        })?;
    tracing::debug!(path = %config.path.display(), bytes = code.len(), "reviewing file");
    review_source(&code, config).await
}

/// Runs the code-review graph synchronously over `code`.
pub async fn review_source(code: &str, config: &ReviewConfig) -> Result<RunState, Error> {
    let engine = code_review_engine(config.engine.clone())?;
    let graph_id = engine.create_graph(code_review_graph()).await?;
    let mut options = RunOptions::sync();
    options.iteration_limit = config.max_steps;
    let run = engine
        .run(&graph_id, review_state(code, config.threshold), options)
        .await?;
    Ok(run)
}

/// Names of the tools the review engine registers.
pub fn tool_names() -> Result<Vec<String>, Error> {
    Ok(code_review_engine(EngineConfig::default())?.list_tools())
}

/// Human-readable report: step log, score, suggestions and outcome.
pub fn render_report(run: &RunState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "run {}", run.run_id);
    for entry in &run.logs {
        let _ = writeln!(out, "  {}", entry);
    }
    let _ = writeln!(out, "---");
    if let Some(score) = run.state.get("quality_score") {
        let _ = writeln!(out, "quality score: {}", score);
    }
    if let Some(Value::Array(suggestions)) = run.state.get("suggestions") {
        for s in suggestions.iter().filter_map(Value::as_str) {
            let _ = writeln!(out, "suggestion: {}", s);
        }
    }
    let status = match &run.outcome {
        RunOutcome::Running => "running".to_string(),
        RunOutcome::Completed => format!("completed after {} steps", run.iterations),
        RunOutcome::LoopLimitExceeded { limit } => {
            format!("stopped at iteration limit {} (threshold not reached)", limit)
        }
        RunOutcome::Failed { node, error } => format!("failed at `{}`: {}", node, error),
    };
    let _ = writeln!(out, "status: {}", status);
    out
}
