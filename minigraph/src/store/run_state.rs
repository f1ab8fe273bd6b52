//! Run record and step log types.
//!
//! A [`RunState`] is created when a run starts and rewritten by the engine after every step.
//! Once `finished` is true it never changes again.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::State;

/// How one step ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepStatus {
    Ok,
    /// The node failed, or its next node could not be resolved. Terminal for the run.
    Failed { error: String },
    /// This was the last step allowed by the iteration limit and another node was pending.
    LoopLimitExceeded { limit: usize },
}

/// One entry per node invocation, appended in execution order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// 1-based step index within the run.
    pub step: usize,
    pub node: String,
    pub timestamp: DateTime<Utc>,
    /// Message supplied by the node, if any.
    pub message: Option<String>,
    /// Node resolved to run next; `None` when the run stopped here.
    pub next: Option<String>,
    #[serde(flatten)]
    pub status: StepStatus,
}

impl LogEntry {
    pub fn ok(step: usize, node: &str, message: Option<String>, next: Option<String>) -> Self {
        Self {
            step,
            node: node.to_string(),
            timestamp: Utc::now(),
            message,
            next,
            status: StepStatus::Ok,
        }
    }

    pub fn failed(step: usize, node: &str, message: Option<String>, error: String) -> Self {
        Self {
            step,
            node: node.to_string(),
            timestamp: Utc::now(),
            message,
            next: None,
            status: StepStatus::Failed { error },
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.step, self.node)?;
        if let Some(msg) = &self.message {
            write!(f, ": {}", msg)?;
        }
        match &self.next {
            Some(next) => write!(f, " -> {}", next)?,
            None => write!(f, " -> end")?,
        }
        match &self.status {
            StepStatus::Ok => Ok(()),
            StepStatus::Failed { error } => write!(f, " (failed: {})", error),
            StepStatus::LoopLimitExceeded { limit } => {
                write!(f, " (loop limit {} exceeded)", limit)
            }
        }
    }
}

/// Where a run stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunOutcome {
    Running,
    /// Reached a node with no resolvable next node.
    Completed,
    /// Stopped at the iteration limit with a node still pending.
    LoopLimitExceeded { limit: usize },
    Failed { node: String, error: String },
}

/// Observable record of one run.
///
/// **Interaction**: Created by `WorkflowEngine::run`, persisted through `RunStore`, returned by
/// `run` (final or initial snapshot) and `get_run` (latest snapshot).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    pub run_id: String,
    pub graph_id: String,
    pub state: State,
    /// Node about to execute, or the last one executed once the run is finished.
    pub current_node: String,
    pub logs: Vec<LogEntry>,
    pub finished: bool,
    /// Node invocations so far (equals `logs.len()`).
    pub iterations: usize,
    pub iteration_limit: usize,
    pub outcome: RunOutcome,
    /// Failure message when the outcome is `Failed`.
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RunState {
    /// Fresh run positioned at `start_node`.
    pub fn new(
        run_id: impl Into<String>,
        graph_id: impl Into<String>,
        state: State,
        start_node: impl Into<String>,
        iteration_limit: usize,
    ) -> Self {
        let now = Utc::now();
        Self {
            run_id: run_id.into(),
            graph_id: graph_id.into(),
            state,
            current_node: start_node.into(),
            logs: Vec::new(),
            finished: false,
            iterations: 0,
            iteration_limit,
            outcome: RunOutcome::Running,
            error: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// True when the run stopped at its iteration limit rather than completing.
    pub fn is_loop_limit_exceeded(&self) -> bool {
        matches!(self.outcome, RunOutcome::LoopLimitExceeded { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, RunOutcome::Failed { .. })
    }

    /// Marks the run finished with `outcome`. No-op if already finished.
    pub(crate) fn finish(&mut self, outcome: RunOutcome) {
        if self.finished {
            return;
        }
        if let RunOutcome::Failed { error, .. } = &outcome {
            self.error = Some(error.clone());
        }
        self.outcome = outcome;
        self.finished = true;
        self.updated_at = Utc::now();
    }
}
