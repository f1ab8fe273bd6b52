//! Error types for graph creation, run execution and lookups.
//!
//! [`GraphError`] is what engine and store operations return. [`NodeError`] is what a single
//! node invocation returns; the engine wraps it as [`GraphError::NodeExecution`] and records it
//! in the run's logs instead of returning it to the caller.

use thiserror::Error;

use crate::graph::ValidationError;
use crate::tools::ToolError;

/// Failure raised by one node step.
///
/// Returned by `Node::run`; also produced by the engine when resolving the next node fails
/// (predicate evaluation error, override naming an undeclared node). Always terminal for the run.
#[derive(Debug, Error)]
pub enum NodeError {
    /// The node itself failed (bad input in state, domain error).
    #[error("{0}")]
    Failed(String),

    /// A tool called by the node failed; the tool error is kept unchanged.
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// A conditional edge predicate could not be evaluated against the state.
    #[error("predicate evaluation failed: {0}")]
    Predicate(String),

    /// The node asked to jump to a node the graph does not declare.
    #[error("next node is not declared in the graph: {0}")]
    InvalidNext(String),
}

impl NodeError {
    /// Shorthand for [`NodeError::Failed`].
    pub fn failed(msg: impl Into<String>) -> Self {
        NodeError::Failed(msg.into())
    }
}

/// Engine and store error.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Structural validation failed; the graph was not stored.
    #[error("invalid graph: {0}")]
    InvalidGraph(#[from] ValidationError),

    #[error("graph not found: {0}")]
    GraphNotFound(String),

    #[error("run not found: {0}")]
    RunNotFound(String),

    /// A finished run is frozen; updates and re-saves are rejected.
    #[error("run already finished: {0}")]
    RunFinished(String),

    /// An iteration limit of zero was requested.
    #[error("iteration limit must be at least 1")]
    InvalidIterationLimit,

    /// A node failed during a run. Recorded in the run's logs, never returned by `run`.
    #[error("node `{node}` failed: {source}")]
    NodeExecution {
        node: String,
        #[source]
        source: NodeError,
    },

    /// A step name was registered twice in the node registry.
    #[error("duplicate node step: {0}")]
    DuplicateNode(String),

    #[error(transparent)]
    Tool(#[from] ToolError),

    /// Backend storage failure. Message is opaque to keep backend types out of the API.
    #[error("store: {0}")]
    Store(String),
}
