//! GraphStore trait: compiled graphs by id.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::GraphError;
use crate::graph::CompiledGraph;

/// Storage for compiled graphs. Graphs are immutable once inserted.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Stores a graph under its id. Fails with `Store` if the id is taken.
    async fn insert(&self, graph: Arc<CompiledGraph>) -> Result<(), GraphError>;

    /// `GraphNotFound` if absent.
    async fn get(&self, graph_id: &str) -> Result<Arc<CompiledGraph>, GraphError>;

    /// All graph ids, sorted.
    async fn list(&self) -> Result<Vec<String>, GraphError>;
}
