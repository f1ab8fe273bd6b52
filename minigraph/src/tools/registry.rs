//! Name → tool mapping with registration order preserved.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use super::r#trait::{FnTool, Tool, ToolError};

/// Registry of tools, keyed by name.
///
/// Populated at process start, then wrapped in `Arc` and treated as read-only. `list()` returns
/// names in registration order.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
    order: Vec<String>,
}

impl ToolRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool under its own name. Fails with `DuplicateTool` if the name is taken.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<&mut Self, ToolError> {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(ToolError::DuplicateTool(name));
        }
        self.order.push(name.clone());
        self.tools.insert(name, tool);
        Ok(self)
    }

    /// Registers a synchronous closure as a tool.
    pub fn register_fn<F>(&mut self, name: impl Into<String>, f: F) -> Result<&mut Self, ToolError>
    where
        F: Fn(Value) -> Result<Value, ToolError> + Send + Sync + 'static,
    {
        self.register(Arc::new(FnTool::new(name, f)))
    }

    /// Invokes the named tool. Fails with `UnknownTool` if absent; tool failures pass through.
    pub async fn invoke(&self, name: &str, args: Value) -> Result<Value, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        tracing::debug!(tool = name, "invoking tool");
        tool.call(args).await
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Registered tool names in registration order.
    pub fn list(&self) -> Vec<String> {
        self.order.clone()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
