//! The step loop: invoke the current node, replace state, log, route, persist.

use std::any::Any;
use std::sync::Arc;

use crate::error::{GraphError, NodeError};
use crate::graph::{CompiledGraph, Node, NodeContext, NodeResult};
use crate::state::State;
use crate::store::{LogEntry, RunMutator, RunOutcome, RunState, RunStore, StepStatus};
use crate::tools::ToolRegistry;

use super::logging;

/// Everything one run needs, cloned out of the engine so it can move onto a spawned task.
#[derive(Clone)]
pub(crate) struct RunExecutor {
    pub(crate) graph: Arc<CompiledGraph>,
    pub(crate) tools: Arc<ToolRegistry>,
    pub(crate) runs: Arc<dyn RunStore>,
}

impl RunExecutor {
    /// Runs `run` until a terminal node, the iteration limit, or a node failure.
    ///
    /// Node failures and the loop limit are recorded in the returned run, never returned as
    /// errors. The only errors are store failures while persisting a step.
    pub(crate) async fn execute(&self, mut run: RunState) -> Result<RunState, GraphError> {
        loop {
            let current = run.current_node.clone();
            let step = run.iterations + 1;
            logging::log_node_start(&run.run_id, &current, step);

            let node = self.graph.node(&current).cloned();
            let ctx = NodeContext::new(run.run_id.clone(), current.clone(), step, self.tools.clone());
            let result = match node {
                Some(node) => invoke(node, run.state.clone(), ctx).await,
                // Compiled graphs resolve every node and overrides are checked before a jump.
                None => Err(NodeError::InvalidNext(current.clone())),
            };
            run.iterations = step;

            match result {
                Err(source) => {
                    let error = GraphError::NodeExecution {
                        node: current.clone(),
                        source,
                    };
                    fail(&mut run, &current, None, error);
                }
                Ok(output) => {
                    run.state = output.state;
                    match self.graph.resolve_next(&current, &output.next, &run.state) {
                        Err(source) => {
                            let error = GraphError::NodeExecution {
                                node: current.clone(),
                                source,
                            };
                            fail(&mut run, &current, output.log, error);
                        }
                        Ok(None) => {
                            logging::log_node_complete(&run.run_id, &current, None);
                            run.logs.push(LogEntry::ok(step, &current, output.log, None));
                            logging::log_run_complete(&run.run_id, &current, run.iterations);
                            run.finish(RunOutcome::Completed);
                        }
                        Ok(Some(next)) => {
                            logging::log_node_complete(&run.run_id, &current, Some(next.as_str()));
                            let mut entry =
                                LogEntry::ok(step, &current, output.log, Some(next.clone()));
                            run.current_node = next;
                            if run.iterations >= run.iteration_limit {
                                let limit = run.iteration_limit;
                                logging::log_loop_limit(&run.run_id, &run.current_node, limit);
                                entry.status = StepStatus::LoopLimitExceeded { limit };
                                run.logs.push(entry);
                                run.finish(RunOutcome::LoopLimitExceeded { limit });
                            } else {
                                run.logs.push(entry);
                            }
                        }
                    }
                }
            }

            run = self.persist(run).await?;
            if run.finished {
                return Ok(run);
            }
        }
    }

    /// Best-effort terminal write after `execute` returned an error, so pollers of a background
    /// run still see it finish.
    pub(crate) async fn abort(&self, run_id: &str, error: &GraphError) {
        let text = error.to_string();
        let mutator: RunMutator = Box::new(move |stored: &mut RunState| {
            let node = stored.current_node.clone();
            stored.finish(RunOutcome::Failed { node, error: text });
        });
        if let Err(e) = self.runs.update(run_id, mutator).await {
            logging::log_run_error(run_id, &e);
        }
    }

    /// Writes the snapshot to the run store and returns the stored copy.
    async fn persist(&self, run: RunState) -> Result<RunState, GraphError> {
        let run_id = run.run_id.clone();
        let mutator: RunMutator = Box::new(move |stored: &mut RunState| *stored = run);
        self.runs.update(&run_id, mutator).await
    }
}

/// Runs one node on its own task so a panic becomes a `NodeError` instead of killing the run.
async fn invoke(
    node: Arc<dyn Node>,
    state: State,
    ctx: NodeContext,
) -> Result<NodeResult, NodeError> {
    let handle = tokio::spawn(async move { node.run(state, &ctx).await });
    match handle.await {
        Ok(result) => result,
        Err(e) if e.is_panic() => Err(NodeError::failed(format!(
            "node panicked: {}",
            panic_message(e.into_panic().as_ref())
        ))),
        Err(e) => Err(NodeError::failed(format!("node task cancelled: {}", e))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Records a terminal failure on the current step.
fn fail(run: &mut RunState, node: &str, message: Option<String>, error: GraphError) {
    logging::log_node_failed(&run.run_id, &error);
    let text = error.to_string();
    run.logs
        .push(LogEntry::failed(run.iterations, node, message, text.clone()));
    run.finish(RunOutcome::Failed {
        node: node.to_string(),
        error: text,
    });
}
