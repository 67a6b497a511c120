use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::state::AppState;

/// Reports `up` only when the backing store answers a ping.
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    match state.health.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "up" }))),
        Err(e) => {
            tracing::error!(error = %e, "store ping failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "down" })),
            )
        }
    }
}
