//! Node contract: one step over the shared state.

use async_trait::async_trait;

use crate::error::NodeError;
use crate::state::State;

use super::{Next, NodeContext};

/// What a node returns: the full replacement state, a routing decision and an optional log line.
///
/// The engine replaces the run's state with `state` wholesale; a node that wants to keep keys
/// it did not touch must return them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeResult {
    pub state: State,
    pub next: Next,
    pub log: Option<String>,
}

impl NodeResult {
    /// Result that follows declared edges and carries no log message.
    pub fn new(state: State) -> Self {
        Self {
            state,
            next: Next::Continue,
            log: None,
        }
    }

    pub fn with_log(mut self, log: impl Into<String>) -> Self {
        self.log = Some(log.into());
        self
    }

    /// Overrides the declared edges: run `node` next.
    pub fn goto(mut self, node: impl Into<String>) -> Self {
        self.next = Next::Node(node.into());
        self
    }

    /// Stops the run after this node.
    pub fn end(mut self) -> Self {
        self.next = Next::End;
        self
    }
}

/// One executable step: state in, [`NodeResult`] out.
///
/// **Interaction**: Registered by step name in `NodeRegistry`; resolved when a graph is
/// compiled; invoked by the engine with a copy of the run state.
#[async_trait]
pub trait Node: Send + Sync {
    /// Step name used as the registry key (e.g. `"extract_functions"`).
    fn name(&self) -> &str;

    async fn run(&self, state: State, ctx: &NodeContext) -> Result<NodeResult, NodeError>;
}

/// Adapts a synchronous closure into a [`Node`]. The closure does not see the context.
pub struct FnNode<F> {
    name: String,
    f: F,
}

impl<F> FnNode<F>
where
    F: Fn(State) -> Result<NodeResult, NodeError> + Send + Sync + 'static,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

#[async_trait]
impl<F> Node for FnNode<F>
where
    F: Fn(State) -> Result<NodeResult, NodeError> + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, state: State, _ctx: &NodeContext) -> Result<NodeResult, NodeError> {
        (self.f)(state)
    }
}
