use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use super::{parse_id, ApiJson};
use crate::{
    auth::AdminOnly,
    dto::jobs::{
        AdminGetJobResponse, ApplicantResponse, ApplicantsResponse, CreateJobRequest,
        CreateJobResponse,
    },
    errors::AppError,
    services::{job_service, profile_service},
    state::AppState,
};

pub async fn create_job(
    State(state): State<Arc<AppState>>,
    AdminOnly(subject): AdminOnly,
    ApiJson(req): ApiJson<CreateJobRequest>,
) -> Result<Json<CreateJobResponse>, AppError> {
    let id = job_service::create_job(&state, &subject, req).await?;
    Ok(Json(CreateJobResponse {
        id,
        message: "Job created successfully".to_string(),
    }))
}

pub async fn get_job(
    State(state): State<Arc<AppState>>,
    AdminOnly(_subject): AdminOnly,
    Path(job_id): Path<String>,
) -> Result<Json<AdminGetJobResponse>, AppError> {
    let job_id = parse_id(&job_id)?;
    let (job, applicants) = job_service::job_with_applicants(&state, job_id).await?;
    Ok(Json(AdminGetJobResponse {
        num_applications: job.applicants.len(),
        job,
        applicants,
    }))
}

pub async fn list_applicants(
    State(state): State<Arc<AppState>>,
    AdminOnly(_subject): AdminOnly,
) -> Result<Json<ApplicantsResponse>, AppError> {
    let applicants = profile_service::list_applicants(&state).await?;
    Ok(Json(ApplicantsResponse { applicants }))
}

pub async fn get_applicant(
    State(state): State<Arc<AppState>>,
    AdminOnly(_subject): AdminOnly,
    Path(applicant_id): Path<String>,
) -> Result<Json<ApplicantResponse>, AppError> {
    let applicant_id = parse_id(&applicant_id)?;
    let applicant = profile_service::get_applicant(&state, applicant_id).await?;
    Ok(Json(ApplicantResponse { applicant }))
}
