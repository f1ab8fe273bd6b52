//! In-memory GraphStore. Not persistent.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::GraphError;
use crate::graph::CompiledGraph;

use super::GraphStore;

/// In-memory graph store. Graphs live until the store is dropped.
///
/// **Interaction**: Default `GraphStore` of `WorkflowEngine::new`.
pub struct InMemoryGraphStore {
    inner: Arc<RwLock<HashMap<String, Arc<CompiledGraph>>>>,
}

impl InMemoryGraphStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryGraphStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GraphStore for InMemoryGraphStore {
    async fn insert(&self, graph: Arc<CompiledGraph>) -> Result<(), GraphError> {
        let mut guard = self.inner.write().await;
        if guard.contains_key(graph.id()) {
            return Err(GraphError::Store(format!(
                "graph id already exists: {}",
                graph.id()
            )));
        }
        guard.insert(graph.id().to_string(), graph);
        Ok(())
    }

    async fn get(&self, graph_id: &str) -> Result<Arc<CompiledGraph>, GraphError> {
        self.inner
            .read()
            .await
            .get(graph_id)
            .cloned()
            .ok_or_else(|| GraphError::GraphNotFound(graph_id.to_string()))
    }

    async fn list(&self) -> Result<Vec<String>, GraphError> {
        let mut ids: Vec<String> = self.inner.read().await.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}
