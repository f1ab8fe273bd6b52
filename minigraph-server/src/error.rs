//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use minigraph::GraphError;

/// Error returned by route handlers. Body: `{"error": {"message": "..."}}`.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Graph(e) => match e {
                GraphError::InvalidGraph(_) | GraphError::InvalidIterationLimit => {
                    StatusCode::BAD_REQUEST
                }
                GraphError::GraphNotFound(_) | GraphError::RunNotFound(_) => {
                    StatusCode::NOT_FOUND
                }
                GraphError::RunFinished(_) => StatusCode::CONFLICT,
                GraphError::NodeExecution { .. }
                | GraphError::DuplicateNode(_)
                | GraphError::Tool(_)
                | GraphError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = %status, "request rejected");
        }
        let body = serde_json::json!({ "error": { "message": self.to_string() } });
        (status, Json(body)).into_response()
    }
}
