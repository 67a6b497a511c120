use axum::{
    extract::{Multipart, State},
    Json,
};
use std::sync::Arc;

use crate::{
    auth::ApplicantOnly,
    dto::auth::MessageResponse,
    errors::AppError,
    services::profile_service,
    state::AppState,
};

const FILE_FIELD: &str = "file";

pub async fn upload_resume(
    State(state): State<Arc<AppState>>,
    ApplicantOnly(subject): ApplicantOnly,
    mut multipart: Multipart,
) -> Result<Json<MessageResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("malformed upload: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field
            .file_name()
            .map(str::to_owned)
            .ok_or_else(|| AppError::Validation("missing file name".into()))?;
        let contents = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("malformed upload: {e}")))?;

        let stored =
            profile_service::store_resume(&state, &subject, &file_name, &contents).await?;
        tracing::info!(%subject, file = %stored, size = contents.len(), "resume uploaded");
        return Ok(Json(MessageResponse::new("Resume uploaded successfully")));
    }

    Err(AppError::Validation("error retrieving the resume".into()))
}
