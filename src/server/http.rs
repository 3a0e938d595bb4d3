//! Read-only HTTP surface: status and roster

use super::dispatcher::DispatcherHandle;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

/// Body of `GET /`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub message: String,
    pub online: usize,
}

/// Build the status router
pub fn router(dispatcher: DispatcherHandle) -> Router {
    Router::new()
        .route("/", get(status))
        .route("/users", get(users))
        .with_state(dispatcher)
}

async fn status(
    State(dispatcher): State<DispatcherHandle>,
) -> Result<Json<StatusResponse>, StatusCode> {
    let roster = dispatcher.roster().await.map_err(unavailable)?;
    Ok(Json(StatusResponse {
        message: "Chat server is running!".to_string(),
        online: roster.users.len(),
    }))
}

async fn users(
    State(dispatcher): State<DispatcherHandle>,
) -> Result<Json<Vec<String>>, StatusCode> {
    let roster = dispatcher.roster().await.map_err(unavailable)?;
    Ok(Json(roster.users))
}

fn unavailable(err: anyhow::Error) -> StatusCode {
    tracing::warn!("Roster query failed: {}", err);
    StatusCode::SERVICE_UNAVAILABLE
}
