//! Route handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use minigraph::{ExecutionMode, GraphSpec, RunOptions, RunState};
use minigraph_workflows::{code_review_graph, sample_state};
use serde::{Deserialize, Serialize};

use crate::error::ServerError;
use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateGraphResponse {
    pub graph_id: String,
}

/// Body of `POST /graph/run`.
#[derive(Debug, Deserialize)]
pub struct RunRequest {
    pub graph_id: String,
    #[serde(default)]
    pub initial_state: minigraph::State,
    #[serde(default)]
    pub run_in_background: bool,
    #[serde(default)]
    pub iteration_limit: Option<usize>,
}

impl RunRequest {
    fn options(&self) -> RunOptions {
        RunOptions {
            iteration_limit: self.iteration_limit,
            mode: if self.run_in_background {
                ExecutionMode::Background
            } else {
                ExecutionMode::Sync
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToolsResponse {
    pub tools: Vec<String>,
}

/// POST /graph/create
pub async fn create_graph(
    State(state): State<Arc<AppState>>,
    Json(spec): Json<GraphSpec>,
) -> Result<Json<CreateGraphResponse>, ServerError> {
    let graph_id = state.engine.create_graph(spec).await?;
    Ok(Json(CreateGraphResponse { graph_id }))
}

/// POST /graph/run. Sync runs return the finished run; background runs the initial snapshot.
pub async fn run_graph(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RunRequest>,
) -> Result<Json<RunState>, ServerError> {
    let options = req.options();
    let run = state
        .engine
        .run(&req.graph_id, req.initial_state, options)
        .await?;
    Ok(Json(run))
}

/// GET /graph/state/:run_id
pub async fn run_state(
    State(state): State<Arc<AppState>>,
    Path(run_id): Path<String>,
) -> Result<Json<RunState>, ServerError> {
    Ok(Json(state.engine.get_run(&run_id).await?))
}

/// GET /tools
pub async fn list_tools(State(state): State<Arc<AppState>>) -> Json<ToolsResponse> {
    Json(ToolsResponse {
        tools: state.engine.list_tools(),
    })
}

/// POST /example/run-code-review. Creates the code-review graph and runs it synchronously over
/// the posted state, or the sample code when no JSON body is sent.
pub async fn run_code_review(
    State(state): State<Arc<AppState>>,
    body: Option<Json<minigraph::State>>,
) -> Result<Json<RunState>, ServerError> {
    let initial = match body {
        Some(Json(s)) if !s.is_empty() => s,
        _ => sample_state(),
    };
    let graph_id = state.engine.create_graph(code_review_graph()).await?;
    let run = state
        .engine
        .run(&graph_id, initial, RunOptions::sync())
        .await?;
    Ok(Json(run))
}
