//! Graph spec: nodes (name → step), edges (name → edge) and a start node.
//!
//! Build in code with `add_node` / `add_edge` / `add_conditional_edge`, or deserialize from
//! JSON. `validate` checks the structure against a node registry; the engine stores only
//! validated, compiled graphs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::edge::{Branch, Edge};
use super::registry::NodeRegistry;
use super::validation_error::ValidationError;

/// Reserved terminal marker. Use as an edge target to end the graph explicitly; no node may
/// carry this name.
pub const END: &str = "__end__";

/// Declarative graph: which steps run, how they connect, where to begin.
///
/// Maps are ordered so validation reports the same first violation on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSpec {
    /// Node name → step name registered in the node registry.
    pub nodes: BTreeMap<String, String>,
    /// Node name → outgoing edge. Nodes without an entry end the graph.
    #[serde(default)]
    pub edges: BTreeMap<String, Edge>,
    pub start_node: String,
    /// Iteration limit for runs of this graph that do not pass their own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_steps: Option<usize>,
}

impl GraphSpec {
    /// Creates an empty spec starting at `start_node`.
    pub fn new(start_node: impl Into<String>) -> Self {
        Self {
            nodes: BTreeMap::new(),
            edges: BTreeMap::new(),
            start_node: start_node.into(),
            max_steps: None,
        }
    }

    /// Declares node `name` running step `step`. Replaces if same name.
    pub fn add_node(&mut self, name: impl Into<String>, step: impl Into<String>) -> &mut Self {
        self.nodes.insert(name.into(), step.into());
        self
    }

    /// Unconditional edge `from → to`. Replaces any edge already declared from `from`.
    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) -> &mut Self {
        self.edges.insert(from.into(), Edge::to(to));
        self
    }

    /// Conditional edge from `from`: branches in order, then `default`.
    pub fn add_conditional_edge(
        &mut self,
        from: impl Into<String>,
        branches: Vec<Branch>,
        default: Option<String>,
    ) -> &mut Self {
        self.edges
            .insert(from.into(), Edge::conditional(branches, default));
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    /// Checks, in order: at least one node is declared; edge sources are declared; edge targets
    /// are declared (or `END`); the start node is declared; no node uses the reserved name;
    /// every step is registered; `max_steps`, when set, is at least 1. Returns the first
    /// violation.
    pub fn validate(&self, registry: &NodeRegistry) -> Result<(), ValidationError> {
        if self.nodes.is_empty() {
            return Err(ValidationError::EmptyGraph);
        }

        for from in self.edges.keys() {
            if !self.nodes.contains_key(from) {
                return Err(ValidationError::UnknownEdgeSource(from.clone()));
            }
        }

        for (from, edge) in &self.edges {
            for to in edge.targets() {
                if to != END && !self.nodes.contains_key(to) {
                    return Err(ValidationError::UnknownEdgeTarget {
                        from: from.clone(),
                        to: to.to_string(),
                    });
                }
            }
        }

        if !self.nodes.contains_key(&self.start_node) {
            return Err(ValidationError::UnknownStartNode(self.start_node.clone()));
        }

        if self.nodes.contains_key(END) {
            return Err(ValidationError::ReservedNodeName(END.to_string()));
        }

        for (node, step) in &self.nodes {
            if !registry.contains(step) {
                return Err(ValidationError::UnknownStep {
                    node: node.clone(),
                    step: step.clone(),
                });
            }
        }

        if self.max_steps == Some(0) {
            return Err(ValidationError::ZeroMaxSteps);
        }

        Ok(())
    }
}
