use crate::{
    auth::IssuedToken,
    dto::auth::{LoginRequest, SignUpRequest},
    errors::AppError,
    models::{
        user::{NewUser, Role},
        UserId,
    },
    password::{hash_password, verify_password},
    state::AppState,
    store::StoreError,
};

fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Registers a regular (non-admin) user.
pub async fn signup(state: &AppState, req: SignUpRequest) -> Result<UserId, AppError> {
    let email = normalize_email(&req.email);
    let name = req.name.trim().to_string();

    if email.is_empty() || name.is_empty() {
        return Err(AppError::Validation("email/name required".into()));
    }

    if state.users.user_exists(&email).await? {
        return Err(AppError::Conflict("user already exists".into()));
    }

    let password_hash = hash_password(&req.password)?;

    let id = state
        .users
        .create_user(NewUser {
            name,
            email: email.clone(),
            password_hash,
            address: req.address.trim().to_string(),
            profile_headline: req.profile_headline.trim().to_string(),
            role: Role::User,
        })
        .await
        .map_err(|e| match e {
            // Lost a race with a concurrent signup for the same email.
            StoreError::Duplicate => AppError::Conflict("user already exists".into()),
            other => other.into(),
        })?;

    tracing::info!(user_id = id, %email, "user registered");
    Ok(id)
}

/// Checks credentials and mints an auth token bound to the user's email.
pub async fn login(state: &AppState, req: LoginRequest) -> Result<IssuedToken, AppError> {
    let email = normalize_email(&req.email);

    let hash = state
        .users
        .password_hash(&email)
        .await?
        .ok_or(AppError::Unauthenticated)?;

    if !verify_password(&req.password, &hash)? {
        tracing::debug!(%email, "login rejected");
        return Err(AppError::Unauthenticated);
    }

    state.tokens.issue_auth_token(&email)
}
