//! HTTP surface over a [`WorkflowEngine`].
//!
//! | Method & path                  | Handler                           |
//! |--------------------------------|-----------------------------------|
//! | `POST /graph/create`           | [`routes::create_graph`]          |
//! | `POST /graph/run`              | [`routes::run_graph`]             |
//! | `GET /graph/state/:run_id`     | [`routes::run_state`]             |
//! | `GET /tools`                   | [`routes::list_tools`]            |
//! | `POST /example/run-code-review`| [`routes::run_code_review`]       |

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::Request,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use minigraph::WorkflowEngine;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info_span;

pub use error::ServerError;

/// Shared state for all routes.
pub struct AppState {
    pub engine: WorkflowEngine,
}

/// Max request body size to buffer (bytes). Larger requests get 413.
const BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Middleware that logs method, URI and body size at debug, then forwards the request.
async fn log_request(request: Request<Body>, next: Next) -> Result<Response, Response> {
    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, BODY_LIMIT).await.map_err(|e| {
        (axum::http::StatusCode::PAYLOAD_TOO_LARGE, e.to_string()).into_response()
    })?;
    tracing::debug!(method = %parts.method, uri = %parts.uri, bytes = bytes.len(), "request");
    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}

/// Builds the router over `engine`.
pub fn router(engine: WorkflowEngine) -> Router {
    let state = Arc::new(AppState { engine });
    Router::new()
        .route("/graph/create", post(routes::create_graph))
        .route("/graph/run", post(routes::run_graph))
        .route("/graph/state/:run_id", get(routes::run_state))
        .route("/tools", get(routes::list_tools))
        .route("/example/run-code-review", post(routes::run_code_review))
        .layer(middleware::from_fn(log_request))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                info_span!("request", method = %req.method(), uri = %req.uri())
            }),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
