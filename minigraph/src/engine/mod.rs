//! Execution engine: graph registration, run scheduling and the step loop.
//!
//! [`WorkflowEngine`] is the entry point. It compiles and stores graphs, creates run records,
//! and drives each run through the run loop either on the caller's task (sync) or on a spawned
//! tokio task (background).

mod logging;
mod options;
mod run_loop;
mod workflow_engine;

pub use options::{ExecutionMode, RunOptions};
pub use workflow_engine::WorkflowEngine;
