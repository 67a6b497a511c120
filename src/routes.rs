use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{
    handlers::{admin, auth, health, introspect, jobs, resume},
    state::AppState,
};

pub fn app_router(state: Arc<AppState>) -> Router {
    let admin_routes = Router::new()
        .route("/job", post(admin::create_job))
        .route("/job/{job_id}", get(admin::get_job))
        .route("/applicants", get(admin::list_applicants))
        .route("/applicant/{applicant_id}", get(admin::get_applicant));

    Router::new()
        .route("/health", get(health::health))
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/auth/introspect", post(introspect::introspect))
        .route("/uploadResume", post(resume::upload_resume))
        .route("/jobs", get(jobs::list_jobs))
        .route("/jobs/apply", post(jobs::apply))
        .nest("/admin", admin_routes)
        .with_state(state)
}
