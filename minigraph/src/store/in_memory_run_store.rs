//! In-memory RunStore backed by a sharded concurrent map.
//!
//! Each run id maps to one entry; `update` holds that entry's write guard while the mutator
//! runs, so updates to one run are serialized while different runs proceed in parallel.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::error::GraphError;

use super::{RunMutator, RunState, RunStore};

/// In-memory run store. Runs are kept until the store is dropped.
///
/// **Interaction**: Default `RunStore` of `WorkflowEngine::new`.
pub struct InMemoryRunStore {
    runs: DashMap<String, RunState>,
}

impl InMemoryRunStore {
    pub fn new() -> Self {
        Self {
            runs: DashMap::new(),
        }
    }
}

impl Default for InMemoryRunStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RunStore for InMemoryRunStore {
    async fn save(&self, run: RunState) -> Result<(), GraphError> {
        match self.runs.entry(run.run_id.clone()) {
            Entry::Occupied(mut existing) => {
                if existing.get().finished {
                    return Err(GraphError::RunFinished(run.run_id));
                }
                existing.insert(run);
            }
            Entry::Vacant(slot) => {
                slot.insert(run);
            }
        }
        Ok(())
    }

    async fn get(&self, run_id: &str) -> Result<RunState, GraphError> {
        self.runs
            .get(run_id)
            .map(|r| r.value().clone())
            .ok_or_else(|| GraphError::RunNotFound(run_id.to_string()))
    }

    async fn update(&self, run_id: &str, mutator: RunMutator) -> Result<RunState, GraphError> {
        let mut run = self
            .runs
            .get_mut(run_id)
            .ok_or_else(|| GraphError::RunNotFound(run_id.to_string()))?;
        if run.finished {
            return Err(GraphError::RunFinished(run_id.to_string()));
        }
        mutator(run.value_mut());
        run.updated_at = Utc::now();
        Ok(run.value().clone())
    }

    async fn list(&self) -> Result<Vec<String>, GraphError> {
        let mut ids: Vec<String> = self.runs.iter().map(|r| r.key().clone()).collect();
        ids.sort();
        Ok(ids)
    }
}
