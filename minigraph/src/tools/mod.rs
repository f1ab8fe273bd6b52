//! Tool registry: named callables that nodes invoke during a run.
//!
//! The registry is built once at startup (`register` takes `&mut self`), then shared read-only
//! behind `Arc` by the engine and every node context. Tools are opaque: their failures are
//! returned to the calling node unchanged.

mod registry;
mod r#trait;

pub use r#trait::{FnTool, Tool, ToolError};
pub use registry::ToolRegistry;
