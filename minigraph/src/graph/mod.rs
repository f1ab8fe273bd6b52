//! Workflow graphs: specs, edges and conditions, node contract, validation and compilation.
//!
//! A [`GraphSpec`] names nodes (each pointing at a step registered in the [`NodeRegistry`]),
//! edges between them and a start node. [`CompiledGraph::compile`] validates the spec and
//! resolves every step; the engine runs compiled graphs only.

mod compiled;
mod condition;
mod context;
mod edge;
mod next;
mod node;
mod registry;
mod spec;
mod validation_error;

pub use compiled::CompiledGraph;
pub use condition::{CompareOp, Condition, ConditionError};
pub use context::NodeContext;
pub use edge::{Branch, Edge};
pub use next::Next;
pub use node::{FnNode, Node, NodeResult};
pub use registry::NodeRegistry;
pub use spec::{GraphSpec, END};
pub use validation_error::ValidationError;
