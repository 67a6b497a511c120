use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use std::sync::Arc;

use crate::{auth::gate::require_role, errors::AppError, models::user::Role, state::AppState};

/// Subject of a valid auth token; no role requirement.
#[derive(Clone, Debug)]
pub struct Authenticated(pub String);

/// Subject of a valid auth token whose directory entry is an admin.
#[derive(Clone, Debug)]
pub struct AdminOnly(pub String);

/// Subject of a valid auth token whose directory entry is not an admin.
#[derive(Clone, Debug)]
pub struct ApplicantOnly(pub String);

impl FromRequestParts<Arc<AppState>> for Authenticated {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AppError::Unauthenticated)?
            .to_str()
            .map_err(|_| AppError::Unauthenticated)?;

        let subject = state.tokens.verify_and_extract_subject(value)?;
        Ok(Self(subject))
    }
}

impl FromRequestParts<Arc<AppState>> for AdminOnly {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let Authenticated(subject) = Authenticated::from_request_parts(parts, state).await?;
        require_role(state.users.as_ref(), &subject, Role::Admin).await?;
        Ok(Self(subject))
    }
}

impl FromRequestParts<Arc<AppState>> for ApplicantOnly {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let Authenticated(subject) = Authenticated::from_request_parts(parts, state).await?;
        require_role(state.users.as_ref(), &subject, Role::User).await?;
        Ok(Self(subject))
    }
}
