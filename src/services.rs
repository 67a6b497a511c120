pub mod auth_service;
pub mod job_service;
pub mod profile_service;
