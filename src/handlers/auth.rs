use axum::{extract::State, Json};
use std::sync::Arc;

use super::ApiJson;
use crate::{
    dto::auth::{LoginRequest, LoginResponse, MessageResponse, SignUpRequest},
    errors::AppError,
    services::auth_service,
    state::AppState,
};

pub async fn signup(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<SignUpRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    auth_service::signup(&state, req).await?;
    Ok(Json(MessageResponse::new("User created successfully")))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let issued = auth_service::login(&state, req).await?;
    Ok(Json(LoginResponse {
        token: issued.token,
        token_type: "Bearer".to_string(),
        expires_at: issued.expires_at,
    }))
}
