//! Context passed into nodes for the current step.
//!
//! Holds the run and node identity plus the shared tool registry.

use std::sync::Arc;

use serde_json::Value;

use crate::tools::{ToolError, ToolRegistry};

/// Per-step context available to a node.
///
/// **Interaction**: Built by the engine before each node invocation; nodes use
/// [`call_tool`](Self::call_tool) to reach the registry.
#[derive(Clone)]
pub struct NodeContext {
    /// Id of the run this step belongs to.
    pub run_id: String,
    /// Name of the node being executed (graph node name, not step name).
    pub node: String,
    /// 1-based index of this step within the run.
    pub step: usize,
    tools: Arc<ToolRegistry>,
}

impl NodeContext {
    pub fn new(
        run_id: impl Into<String>,
        node: impl Into<String>,
        step: usize,
        tools: Arc<ToolRegistry>,
    ) -> Self {
        Self {
            run_id: run_id.into(),
            node: node.into(),
            step,
            tools,
        }
    }

    /// Context with an empty tool registry, for calling nodes directly in tests.
    pub fn detached(node: impl Into<String>) -> Self {
        Self::new("detached", node, 1, Arc::new(ToolRegistry::new()))
    }

    /// Invokes a registered tool.
    pub async fn call_tool(&self, name: &str, args: Value) -> Result<Value, ToolError> {
        self.tools.invoke(name, args).await
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }
}
