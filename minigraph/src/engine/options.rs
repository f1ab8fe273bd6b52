//! Per-run options: iteration limit override and execution mode.

use serde::{Deserialize, Serialize};

/// Whether `run` blocks until the run stops or returns right after scheduling it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    #[default]
    Sync,
    /// Execute on the tokio runtime; `run` returns the initial snapshot and callers poll
    /// `get_run`. Falls back to `Sync` when the engine config disables background runs.
    Background,
}

/// Options for one `WorkflowEngine::run` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Overrides the graph's `max_steps` and the engine default. Must be at least 1.
    pub iteration_limit: Option<usize>,
    pub mode: ExecutionMode,
}

impl RunOptions {
    pub fn sync() -> Self {
        Self::default()
    }

    pub fn background() -> Self {
        Self {
            mode: ExecutionMode::Background,
            ..Self::default()
        }
    }

    pub fn with_iteration_limit(mut self, limit: usize) -> Self {
        self.iteration_limit = Some(limit);
        self
    }
}
