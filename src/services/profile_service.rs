use std::io::ErrorKind;

use crate::{errors::AppError, models::profile::Profile, models::UserId, state::AppState};

/// Replaces the caller's stored resume and records it on their profile.
/// Returns the file name the resume was stored under.
pub async fn store_resume(
    state: &AppState,
    subject: &str,
    file_name: &str,
    contents: &[u8],
) -> Result<String, AppError> {
    let file_name = sanitize_file_name(file_name)?;
    let user_id = state.users.get_user_id(subject).await?;

    let dir = state.cfg.resume_dir.join(user_id.to_string());
    match tokio::fs::remove_dir_all(&dir).await {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => {
            return Err(AppError::Internal(format!(
                "removing {}: {e}",
                dir.display()
            )))
        }
    }
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| AppError::Internal(format!("creating {}: {e}", dir.display())))?;

    let path = dir.join(&file_name);
    tokio::fs::write(&path, contents)
        .await
        .map_err(|e| AppError::Internal(format!("writing {}: {e}", path.display())))?;

    state.profiles.upsert_resume(user_id, &file_name).await?;
    Ok(file_name)
}

pub async fn list_applicants(state: &AppState) -> Result<Vec<Profile>, AppError> {
    Ok(state.profiles.list_profiles().await?)
}

pub async fn get_applicant(state: &AppState, user_id: UserId) -> Result<Profile, AppError> {
    state
        .profiles
        .get_profile(user_id)
        .await?
        .ok_or(AppError::NotFound)
}

/// Keeps only the final path component of a client-supplied file name.
fn sanitize_file_name(raw: &str) -> Result<String, AppError> {
    let name = raw.rsplit(['/', '\\']).next().unwrap_or_default().trim();
    if name.is_empty() || name.chars().all(|c| c == '.') {
        return Err(AppError::Validation("invalid file name".into()));
    }
    Ok(name.to_string())
}
