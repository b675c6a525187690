//! Route handlers for the applier HTTP API

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::applier::Applier;
use crate::executor::Command;

/// Shared application state: the applier handle, passed in explicitly
pub type AppState = Arc<Applier>;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Basic health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Submit a command for serialized execution.
///
/// Executor failures arrive as ordinary result strings and map to 200;
/// only scheduling-layer errors become 500s.
pub async fn submit_command(
    State(applier): State<AppState>,
    Json(command): Json<Command>,
) -> Result<String, (StatusCode, String)> {
    debug!(kind = %command.kind, "received command");
    applier.apply(command).await.map_err(|e| {
        warn!(error = %e, "failed to apply command");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("failed to apply request {e}"),
        )
    })
}

/// Creates and configures the application router
pub fn create_router(applier: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/echo", post(submit_command))
        .with_state(applier)
}
