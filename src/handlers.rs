pub mod admin;
pub mod auth;
pub mod health;
pub mod introspect;
pub mod jobs;
pub mod resume;

use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// Parses a numeric identifier taken from a path or query string.
pub(crate) fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::Validation("invalid request".into()))
}

/// `Json` whose rejections use the service's error body. The serde detail
/// is logged, not returned.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            tracing::debug!(error = %e, "rejected request body");
            AppError::Validation("invalid request".into())
        })?;
        Ok(Self(value))
    }
}
