//! Step name → node mapping.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{GraphError, NodeError};
use crate::state::State;

use super::node::{FnNode, Node, NodeResult};

/// Registry of executable steps, keyed by step name.
///
/// Populated at startup; graph specs refer to steps by name and are rejected at validation if a
/// name is missing here.
#[derive(Default)]
pub struct NodeRegistry {
    nodes: HashMap<String, Arc<dyn Node>>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a node under its own name. Fails with `DuplicateNode` if the name is taken.
    pub fn register(&mut self, node: Arc<dyn Node>) -> Result<&mut Self, GraphError> {
        let name = node.name().to_string();
        if self.nodes.contains_key(&name) {
            return Err(GraphError::DuplicateNode(name));
        }
        self.nodes.insert(name, node);
        Ok(self)
    }

    /// Registers a synchronous closure as a step.
    pub fn register_fn<F>(&mut self, name: impl Into<String>, f: F) -> Result<&mut Self, GraphError>
    where
        F: Fn(State) -> Result<NodeResult, NodeError> + Send + Sync + 'static,
    {
        self.register(Arc::new(FnNode::new(name, f)))
    }

    pub fn get(&self, step: &str) -> Option<Arc<dyn Node>> {
        self.nodes.get(step).cloned()
    }

    pub fn contains(&self, step: &str) -> bool {
        self.nodes.contains_key(step)
    }

    /// Registered step names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.nodes.keys().cloned().collect();
        names.sort();
        names
    }
}
