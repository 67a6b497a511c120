use crate::{errors::AppError, models::user::Role, store::UserDirectory};

/// Grants access when the subject holds `required`, as reported by the
/// directory. Lookup failures deny access.
pub async fn require_role(
    directory: &dyn UserDirectory,
    subject: &str,
    required: Role,
) -> Result<(), AppError> {
    let is_admin = directory.is_user_admin(subject).await.map_err(|e| {
        tracing::error!(%subject, error = %e, "role lookup failed");
        AppError::Unauthorized
    })?;

    let allowed = match required {
        Role::Admin => is_admin,
        Role::User => !is_admin,
    };
    if !allowed {
        tracing::debug!(%subject, %required, "role check denied");
        return Err(AppError::Unauthorized);
    }
    Ok(())
}
