//! Tool trait, closure adapter and tool errors.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Tool registry or tool invocation failure.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("tool already registered: {0}")]
    DuplicateTool(String),

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// Arguments did not have the shape the tool expects.
    #[error("invalid arguments for tool `{tool}`: {message}")]
    InvalidArguments { tool: String, message: String },

    /// The tool ran and failed.
    #[error("tool `{tool}` failed: {message}")]
    Failed { tool: String, message: String },
}

/// A named callable taking JSON arguments and returning a JSON result.
///
/// **Interaction**: Registered in [`ToolRegistry`](super::ToolRegistry); called by nodes through
/// `NodeContext::call_tool`.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Registry key. Must be unique within a registry.
    fn name(&self) -> &str;

    async fn call(&self, args: Value) -> Result<Value, ToolError>;
}

/// Adapts a synchronous closure into a [`Tool`].
pub struct FnTool<F> {
    name: String,
    f: F,
}

impl<F> FnTool<F>
where
    F: Fn(Value) -> Result<Value, ToolError> + Send + Sync + 'static,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

#[async_trait]
impl<F> Tool for FnTool<F>
where
    F: Fn(Value) -> Result<Value, ToolError> + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn call(&self, args: Value) -> Result<Value, ToolError> {
        (self.f)(args)
    }
}
