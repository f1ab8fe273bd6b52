//! RunStore trait: where run records live while and after they execute.

use async_trait::async_trait;

use crate::error::GraphError;

use super::RunState;

/// In-place change applied to a stored run under the store's per-run lock.
pub type RunMutator = Box<dyn FnOnce(&mut RunState) + Send>;

/// Storage for run records.
///
/// Implementations must serialize `update` calls for the same run id and must refuse to modify
/// a run whose `finished` flag is already set (`GraphError::RunFinished`).
///
/// **Interaction**: Written by the engine after every step; read by `WorkflowEngine::get_run`.
#[async_trait]
pub trait RunStore: Send + Sync {
    /// Inserts or replaces a run. Replacing a finished run fails with `RunFinished`.
    async fn save(&self, run: RunState) -> Result<(), GraphError>;

    /// Latest snapshot. `RunNotFound` if absent.
    async fn get(&self, run_id: &str) -> Result<RunState, GraphError>;

    /// Applies `mutator` to the stored run and returns the updated snapshot.
    async fn update(&self, run_id: &str, mutator: RunMutator) -> Result<RunState, GraphError>;

    /// All run ids, sorted.
    async fn list(&self) -> Result<Vec<String>, GraphError>;
}
