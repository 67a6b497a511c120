use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use super::parse_id;
use crate::{
    auth::Authenticated,
    dto::{
        auth::MessageResponse,
        jobs::{ApplyJobQuery, GetJobsResponse},
    },
    errors::AppError,
    services::job_service,
    state::AppState,
};

pub async fn list_jobs(
    State(state): State<Arc<AppState>>,
    Authenticated(_subject): Authenticated,
) -> Result<Json<GetJobsResponse>, AppError> {
    let jobs = job_service::list_jobs(&state).await?;
    Ok(Json(GetJobsResponse { jobs }))
}

pub async fn apply(
    State(state): State<Arc<AppState>>,
    Authenticated(subject): Authenticated,
    Query(query): Query<ApplyJobQuery>,
) -> Result<Json<MessageResponse>, AppError> {
    let raw = query
        .job_id
        .ok_or_else(|| AppError::Validation("invalid request".into()))?;
    let job_id = parse_id(&raw)?;

    job_service::apply_as(&state, &subject, job_id).await?;
    Ok(Json(MessageResponse::new("Successfully applied to job")))
}
