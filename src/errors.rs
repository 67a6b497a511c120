use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Key load error: {0}")]
    KeyLoad(String),

    #[error("Signing error: {0}")]
    Signing(String),

    #[error("Unauthenticated")]
    Unauthenticated,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found")]
    NotFound,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => AppError::NotFound,
            StoreError::Duplicate => AppError::Conflict("already exists".into()),
            StoreError::Backend(s) => AppError::Store(s),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            AppError::Unauthenticated => (StatusCode::UNAUTHORIZED, "unauthorized"),
            AppError::Unauthorized => (StatusCode::FORBIDDEN, "forbidden"),
            AppError::NotFound => (StatusCode::NOT_FOUND, "not found"),
            AppError::Validation(s) => (StatusCode::BAD_REQUEST, s.as_str()),
            AppError::Conflict(s) => (StatusCode::CONFLICT, s.as_str()),
            AppError::KeyLoad(_)
            | AppError::Signing(_)
            | AppError::Store(_)
            | AppError::Config(_)
            | AppError::Internal(_) => {
                tracing::error!(error = %self, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        };

        (status, Json(json!({ "error": msg }))).into_response()
    }
}
