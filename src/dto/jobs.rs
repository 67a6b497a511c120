use serde::{Deserialize, Serialize};

use crate::models::{job::Job, profile::Profile, JobId};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    pub title: String,
    pub description: String,
    pub company_name: String,
    /// Sent as a string by clients; parsed server-side.
    pub total_applications: String,
}

#[derive(Debug, Serialize)]
pub struct CreateJobResponse {
    pub id: JobId,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct GetJobsResponse {
    pub jobs: Vec<Job>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminGetJobResponse {
    pub job: Job,
    pub num_applications: usize,
    pub applicants: Vec<Profile>,
}

#[derive(Debug, Serialize)]
pub struct ApplicantsResponse {
    pub applicants: Vec<Profile>,
}

#[derive(Debug, Serialize)]
pub struct ApplicantResponse {
    pub applicant: Profile,
}

#[derive(Debug, Deserialize)]
pub struct ApplyJobQuery {
    pub job_id: Option<String>,
}
