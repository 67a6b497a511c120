use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use super::ApiJson;
use crate::dto::auth::{IntrospectRequest, IntrospectResponse};
use crate::state::AppState;

/// Reports whether a raw token (no scheme prefix) is currently valid.
/// Unlike bearer verification this also honours `nbf`.
pub async fn introspect(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<IntrospectRequest>,
) -> Json<IntrospectResponse> {
    match state.tokens.inspect(req.token.trim()) {
        Ok(info) => Json(IntrospectResponse {
            active: true,
            sub: Some(info.subject),
            expires_at: Some(info.expires_at),
        }),
        Err(_) => Json(IntrospectResponse {
            active: false,
            sub: None,
            expires_at: None,
        }),
    }
}
