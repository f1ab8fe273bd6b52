//! Graph validation error.
//!
//! Returned by `GraphSpec::validate` and `CompiledGraph::compile` when a graph spec references
//! undeclared nodes, a reserved name, or a step the node registry does not know.

use thiserror::Error;

/// First structural problem found in a graph spec.
///
/// Checks run in a fixed order (empty node map, edge sources, edge targets, start node, reserved names,
/// step references, max_steps); only the first violation is reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("graph declares no nodes")]
    EmptyGraph,

    /// An edge is declared from a node that is not in `nodes`.
    #[error("edge source is not a declared node: {0}")]
    UnknownEdgeSource(String),

    /// An edge (direct, branch or default) targets a node that is not in `nodes`.
    #[error("edge from `{from}` targets undeclared node `{to}`")]
    UnknownEdgeTarget { from: String, to: String },

    #[error("start node is not a declared node: {0}")]
    UnknownStartNode(String),

    /// A node is named after the reserved terminal marker.
    #[error("node name is reserved: {0}")]
    ReservedNodeName(String),

    /// A node refers to a step name missing from the node registry.
    #[error("node `{node}` refers to unregistered step `{step}`")]
    UnknownStep { node: String, step: String },

    #[error("max_steps must be at least 1")]
    ZeroMaxSteps,
}
