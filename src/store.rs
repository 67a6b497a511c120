//! Persistence collaborators.
//!
//! Handlers and services only see these traits; `MongoStore` backs the
//! running service and `MemoryStore` backs tests.

pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;

use crate::models::{
    job::{Job, NewJob},
    profile::Profile,
    user::NewUser,
    JobId, UserId,
};

pub use memory::MemoryStore;
pub use mongo::MongoStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("record already exists")]
    Duplicate,

    #[error("{0}")]
    Backend(String),
}

/// Server error code for a unique index violation.
const DUPLICATE_KEY: i32 = 11000;

impl From<mongodb::error::Error> for StoreError {
    fn from(e: mongodb::error::Error) -> Self {
        if let ErrorKind::Write(WriteFailure::WriteError(we)) = e.kind.as_ref() {
            if we.code == DUPLICATE_KEY {
                return StoreError::Duplicate;
            }
        }
        StoreError::Backend(e.to_string())
    }
}

/// Liveness of the backing store, reported by `GET /health`.
#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Identity lookups keyed by the token subject (the user's email).
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn user_exists(&self, email: &str) -> Result<bool, StoreError>;

    /// `Ok(false)` for unknown users as well as for regular users.
    async fn is_user_admin(&self, email: &str) -> Result<bool, StoreError>;

    async fn get_user_id(&self, email: &str) -> Result<UserId, StoreError>;

    /// Fails with `StoreError::Duplicate` when the email is already taken.
    async fn create_user(&self, user: NewUser) -> Result<UserId, StoreError>;

    async fn password_hash(&self, email: &str) -> Result<Option<String>, StoreError>;
}

#[async_trait]
pub trait JobStore: Send + Sync {
    async fn create_job(&self, job: NewJob) -> Result<JobId, StoreError>;

    async fn get_job(&self, id: JobId) -> Result<Option<Job>, StoreError>;

    async fn list_jobs(&self) -> Result<Vec<Job>, StoreError>;

    /// Appends `user_id` to the job's applicants as one atomic operation.
    /// Concurrent appends to the same job must all be kept.
    async fn apply_job(&self, job_id: JobId, user_id: UserId) -> Result<(), StoreError>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Creates the profile if missing, otherwise replaces the resume location.
    async fn upsert_resume(&self, user_id: UserId, resume_file: &str) -> Result<(), StoreError>;

    async fn get_profile(&self, user_id: UserId) -> Result<Option<Profile>, StoreError>;

    async fn list_profiles(&self) -> Result<Vec<Profile>, StoreError>;

    /// Profiles in the order of `ids`; ids without a profile are skipped.
    async fn profiles_for(&self, ids: &[UserId]) -> Result<Vec<Profile>, StoreError>;
}
