use crate::{
    dto::jobs::CreateJobRequest,
    errors::AppError,
    models::{
        job::{Job, NewJob},
        profile::Profile,
        JobId, UserId,
    },
    state::AppState,
    store::JobStore,
};

pub async fn create_job(
    state: &AppState,
    subject: &str,
    req: CreateJobRequest,
) -> Result<JobId, AppError> {
    let total_applications: i32 = req
        .total_applications
        .trim()
        .parse()
        .ok()
        .filter(|n| *n >= 0)
        .ok_or_else(|| AppError::Validation("invalid request".into()))?;

    let title = req.title.trim().to_string();
    if title.is_empty() {
        return Err(AppError::Validation("title required".into()));
    }

    let posted_by = state.users.get_user_id(subject).await?;
    let id = state
        .jobs
        .create_job(NewJob {
            title,
            description: req.description,
            company_name: req.company_name,
            total_applications,
            posted_by,
        })
        .await?;

    tracing::info!(job_id = id, posted_by, "job created");
    Ok(id)
}

pub async fn list_jobs(state: &AppState) -> Result<Vec<Job>, AppError> {
    Ok(state.jobs.list_jobs().await?)
}

pub async fn job_with_applicants(
    state: &AppState,
    job_id: JobId,
) -> Result<(Job, Vec<Profile>), AppError> {
    let job = state.jobs.get_job(job_id).await?.ok_or(AppError::NotFound)?;
    let applicants = state.profiles.profiles_for(&job.applicants).await?;
    Ok((job, applicants))
}

/// Records `user_id` as an applicant of `job_id`.
///
/// The job must exist. The append itself is one atomic store operation, so
/// concurrent applications are all kept. Applying twice records the user
/// twice, and the job's advertised capacity is not checked.
pub async fn apply_job(jobs: &dyn JobStore, job_id: JobId, user_id: UserId) -> Result<(), AppError> {
    if jobs.get_job(job_id).await?.is_none() {
        return Err(AppError::NotFound);
    }
    jobs.apply_job(job_id, user_id).await?;

    tracing::info!(job_id, user_id, "application recorded");
    Ok(())
}

pub async fn apply_as(state: &AppState, subject: &str, job_id: JobId) -> Result<(), AppError> {
    let user_id = state.users.get_user_id(subject).await?;
    apply_job(state.jobs.as_ref(), job_id, user_id).await
}
