//! Compiled graph: a validated spec with every step resolved to a node.
//!
//! Built by [`CompiledGraph::compile`]; immutable afterwards and shared by all runs of the graph.
//! Holds the routing logic the engine applies after each node.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::NodeError;
use crate::state::State;

use super::node::Node;
use super::spec::{GraphSpec, END};
use super::validation_error::ValidationError;
use super::{Edge, Next, NodeRegistry};

/// Validated graph ready to run.
///
/// **Interaction**: Created by `WorkflowEngine::create_graph`, kept in a `GraphStore` as
/// `Arc<CompiledGraph>`, read by the run loop.
#[derive(Clone)]
pub struct CompiledGraph {
    id: String,
    spec: GraphSpec,
    /// Graph node name → resolved step.
    nodes: HashMap<String, Arc<dyn Node>>,
}

impl CompiledGraph {
    /// Validates `spec` against `registry` and resolves each node's step.
    pub fn compile(
        id: impl Into<String>,
        spec: GraphSpec,
        registry: &NodeRegistry,
    ) -> Result<Self, ValidationError> {
        spec.validate(registry)?;
        let mut nodes = HashMap::with_capacity(spec.nodes.len());
        for (name, step) in &spec.nodes {
            let node = registry
                .get(step)
                .ok_or_else(|| ValidationError::UnknownStep {
                    node: name.clone(),
                    step: step.clone(),
                })?;
            nodes.insert(name.clone(), node);
        }
        Ok(Self {
            id: id.into(),
            spec,
            nodes,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn spec(&self) -> &GraphSpec {
        &self.spec
    }

    pub fn start_node(&self) -> &str {
        &self.spec.start_node
    }

    pub fn max_steps(&self) -> Option<usize> {
        self.spec.max_steps
    }

    pub fn node(&self, name: &str) -> Option<&Arc<dyn Node>> {
        self.nodes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    pub fn edge(&self, from: &str) -> Option<&Edge> {
        self.spec.edges.get(from)
    }

    /// Decides which node runs after `current`. `Ok(None)` ends the run.
    ///
    /// An explicit override wins over declared edges and must name a declared node (or `END`).
    /// Otherwise the edge from `current` is resolved against `state`; no edge means end.
    pub fn resolve_next(
        &self,
        current: &str,
        next: &Next,
        state: &State,
    ) -> Result<Option<String>, NodeError> {
        match next {
            Next::End => Ok(None),
            Next::Node(target) if target == END => Ok(None),
            Next::Node(target) => {
                if self.contains(target) {
                    Ok(Some(target.clone()))
                } else {
                    Err(NodeError::InvalidNext(target.clone()))
                }
            }
            Next::Continue => match self.edge(current) {
                None => Ok(None),
                Some(edge) => edge
                    .resolve(state)
                    .map(|t| t.map(str::to_string))
                    .map_err(|e| NodeError::Predicate(e.to_string())),
            },
        }
    }
}
