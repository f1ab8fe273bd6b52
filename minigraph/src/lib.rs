//! # minigraph
//!
//! A small workflow graph engine: named steps ("nodes") run over one shared JSON state,
//! connected by unconditional or predicate-guarded edges, with bounded loops, per-run logs and
//! a tool registry nodes can call.
//!
//! ## Design Principles
//!
//! - **Full-replace state**: each node receives a copy of the state and returns the complete
//!   new state. There are no reducers or partial updates.
//! - **Routing by data**: after a node runs, its explicit override (if any) wins; otherwise the
//!   edge from that node is resolved against the new state.
//! - **Bounded runs**: every run has an iteration limit. Loops are ordinary edges back to an
//!   earlier node; the limit is what guarantees termination.
//! - **Failures stay inside the run**: a failing node ends its run with `finished = true` and the
//!   error in the logs. `run` itself only fails for lookups, bad limits and store errors.
//!
//! ## Main Modules
//!
//! - [`graph`]: `GraphSpec`, `Edge`, `Condition`, `Node`, `NodeRegistry`, `CompiledGraph`.
//! - [`engine`]: `WorkflowEngine`, `RunOptions`, `ExecutionMode`.
//! - [`store`]: `RunState`, `LogEntry`, `RunStore` / `GraphStore` and in-memory implementations.
//! - [`tools`]: `Tool`, `ToolRegistry`.
//! - [`config`]: `EngineConfig` (default iteration limit, background runs).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use minigraph::{EngineConfig, GraphSpec, NodeRegistry, NodeResult, RunOptions, State, ToolRegistry, WorkflowEngine};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), minigraph::GraphError> {
//! let mut nodes = NodeRegistry::new();
//! nodes.register_fn("hello", |mut s: State| {
//!     s.insert("greeting".into(), "hi".into());
//!     Ok(NodeResult::new(s).with_log("greeted"))
//! })?;
//!
//! let engine = WorkflowEngine::new(nodes, ToolRegistry::new(), EngineConfig::default());
//! let mut spec = GraphSpec::new("greet");
//! spec.add_node("greet", "hello");
//! let graph_id = engine.create_graph(spec).await?;
//! let run = engine.run(&graph_id, State::new(), RunOptions::sync()).await?;
//! assert!(run.finished);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod graph;
pub mod state;
pub mod store;
pub mod tools;

pub use config::{EngineConfig, DEFAULT_ITERATION_LIMIT};
pub use engine::{ExecutionMode, RunOptions, WorkflowEngine};
pub use error::{GraphError, NodeError};
pub use graph::{
    Branch, CompareOp, CompiledGraph, Condition, ConditionError, Edge, FnNode, GraphSpec, Next,
    Node, NodeContext, NodeRegistry, NodeResult, ValidationError, END,
};
pub use state::State;
pub use store::{
    GraphStore, InMemoryGraphStore, InMemoryRunStore, LogEntry, RunMutator, RunOutcome, RunState,
    RunStore, StepStatus,
};
pub use tools::{FnTool, Tool, ToolError, ToolRegistry};
