//! # Store: graphs and runs
//!
//! Persistence is an injected key-value seam. The engine talks to two traits:
//!
//! 1. [`GraphStore`]: compiled graphs by graph id. Insert once, read many.
//! 2. [`RunStore`]: run records by run id. The engine saves a run when it starts and updates it
//!    after every step, so readers polling a background run see the latest snapshot.
//!
//! ## Implementations
//!
//! | Type                    | Persistence | Concurrency                         |
//! |-------------------------|-------------|-------------------------------------|
//! | [`InMemoryGraphStore`]  | In-memory   | `tokio::sync::RwLock` over a map    |
//! | [`InMemoryRunStore`]    | In-memory   | Sharded map, per-run write guard    |
//!
//! ## Run record rules
//!
//! - `logs` only grows; entries are never reordered.
//! - `finished` goes false → true once. After that the store rejects `update` and `save` with
//!   `GraphError::RunFinished`, so `get` keeps returning the same snapshot.

mod graph_store;
mod in_memory_graph_store;
mod in_memory_run_store;
mod run_state;
mod run_store;

pub use graph_store::GraphStore;
pub use in_memory_graph_store::InMemoryGraphStore;
pub use in_memory_run_store::InMemoryRunStore;
pub use run_state::{LogEntry, RunOutcome, RunState, StepStatus};
pub use run_store::{RunMutator, RunStore};
