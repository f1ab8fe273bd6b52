//! WorkflowEngine: create graphs, start runs, query runs and tools.

use std::sync::Arc;

use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::GraphError;
use crate::graph::{CompiledGraph, GraphSpec, NodeRegistry};
use crate::state::State;
use crate::store::{GraphStore, InMemoryGraphStore, InMemoryRunStore, RunState, RunStore};
use crate::tools::ToolRegistry;

use super::logging;
use super::options::{ExecutionMode, RunOptions};
use super::run_loop::RunExecutor;

/// Graph execution engine.
///
/// Holds the node and tool registries (read-only after construction), the graph and run stores,
/// and the engine config. Cheap to clone; clones share everything.
///
/// **Interaction**: Used by `minigraph-server` route handlers and `minigraph-cli`.
#[derive(Clone)]
pub struct WorkflowEngine {
    nodes: Arc<NodeRegistry>,
    tools: Arc<ToolRegistry>,
    graphs: Arc<dyn GraphStore>,
    runs: Arc<dyn RunStore>,
    config: EngineConfig,
}

impl WorkflowEngine {
    /// Engine with in-memory graph and run stores.
    pub fn new(nodes: NodeRegistry, tools: ToolRegistry, config: EngineConfig) -> Self {
        Self::with_stores(
            Arc::new(nodes),
            Arc::new(tools),
            Arc::new(InMemoryGraphStore::new()),
            Arc::new(InMemoryRunStore::new()),
            config,
        )
    }

    /// Engine with injected stores.
    pub fn with_stores(
        nodes: Arc<NodeRegistry>,
        tools: Arc<ToolRegistry>,
        graphs: Arc<dyn GraphStore>,
        runs: Arc<dyn RunStore>,
        config: EngineConfig,
    ) -> Self {
        Self {
            nodes,
            tools,
            graphs,
            runs,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn tools(&self) -> &Arc<ToolRegistry> {
        &self.tools
    }

    /// Validates and stores `spec`; returns the new graph id.
    ///
    /// Fails with `InvalidGraph` naming the first violation; nothing is stored in that case.
    pub async fn create_graph(&self, spec: GraphSpec) -> Result<String, GraphError> {
        let graph_id = Uuid::new_v4().to_string();
        let nodes = spec.nodes.len();
        let compiled = CompiledGraph::compile(graph_id.clone(), spec, &self.nodes)?;
        self.graphs.insert(Arc::new(compiled)).await?;
        logging::log_graph_created(&graph_id, nodes);
        Ok(graph_id)
    }

    /// Spec of a stored graph.
    pub async fn graph(&self, graph_id: &str) -> Result<GraphSpec, GraphError> {
        Ok(self.graphs.get(graph_id).await?.spec().clone())
    }

    pub async fn list_graphs(&self) -> Result<Vec<String>, GraphError> {
        self.graphs.list().await
    }

    /// Starts a run of `graph_id` over `initial_state`.
    ///
    /// The iteration limit is taken from `options`, else the graph's `max_steps`, else the
    /// engine default. Sync mode returns the finished run; background mode returns the initial
    /// snapshot (unfinished, no logs) and continues on a spawned task.
    ///
    /// Errors: `GraphNotFound` (no run is created), `InvalidIterationLimit` for a zero limit,
    /// store failures. Node failures and the loop limit are reported inside the returned run.
    pub async fn run(
        &self,
        graph_id: &str,
        initial_state: State,
        options: RunOptions,
    ) -> Result<RunState, GraphError> {
        let graph = self.graphs.get(graph_id).await?;
        let limit = options
            .iteration_limit
            .or(graph.max_steps())
            .unwrap_or(self.config.default_iteration_limit);
        if limit == 0 {
            return Err(GraphError::InvalidIterationLimit);
        }

        let background = match options.mode {
            ExecutionMode::Background if self.config.background_enabled => true,
            ExecutionMode::Background => {
                tracing::warn!(graph_id, "background runs disabled; running synchronously");
                false
            }
            ExecutionMode::Sync => false,
        };

        let run = RunState::new(
            Uuid::new_v4().to_string(),
            graph.id(),
            initial_state,
            graph.start_node(),
            limit,
        );
        self.runs.save(run.clone()).await?;
        logging::log_run_start(&run.run_id, graph.id(), limit, background);

        let executor = RunExecutor {
            graph,
            tools: self.tools.clone(),
            runs: self.runs.clone(),
        };

        if background {
            let snapshot = run.clone();
            tokio::spawn(async move {
                let run_id = run.run_id.clone();
                if let Err(e) = executor.execute(run).await {
                    logging::log_run_error(&run_id, &e);
                    executor.abort(&run_id, &e).await;
                }
            });
            Ok(snapshot)
        } else {
            executor.execute(run).await
        }
    }

    /// Latest snapshot of a run. `RunNotFound` if absent.
    pub async fn get_run(&self, run_id: &str) -> Result<RunState, GraphError> {
        self.runs.get(run_id).await
    }

    pub async fn list_runs(&self) -> Result<Vec<String>, GraphError> {
        self.runs.list().await
    }

    /// Registered tool names in registration order.
    pub fn list_tools(&self) -> Vec<String> {
        self.tools.list()
    }
}
