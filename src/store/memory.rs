use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use super::{JobStore, ProfileStore, StoreError, StoreHealth, UserDirectory};
use crate::models::{
    job::{Job, NewJob},
    profile::Profile,
    user::{NewUser, Role},
    JobId, UserId,
};

#[derive(Debug, Clone)]
struct UserRow {
    id: UserId,
    password_hash: String,
    role: Role,
}

#[derive(Default)]
struct Inner {
    next_user_id: UserId,
    next_job_id: JobId,
    users: HashMap<String, UserRow>,
    jobs: HashMap<JobId, Job>,
    profiles: HashMap<UserId, Profile>,
}

/// In-process store. Every mutation runs under one write lock.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StoreHealth for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for MemoryStore {
    async fn user_exists(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self.inner.read().users.contains_key(email))
    }

    async fn is_user_admin(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self
            .inner
            .read()
            .users
            .get(email)
            .is_some_and(|u| u.role == Role::Admin))
    }

    async fn get_user_id(&self, email: &str) -> Result<UserId, StoreError> {
        self.inner
            .read()
            .users
            .get(email)
            .map(|u| u.id)
            .ok_or(StoreError::NotFound)
    }

    async fn create_user(&self, user: NewUser) -> Result<UserId, StoreError> {
        let mut inner = self.inner.write();
        if inner.users.contains_key(&user.email) {
            return Err(StoreError::Duplicate);
        }
        inner.next_user_id += 1;
        let id = inner.next_user_id;
        inner.users.insert(
            user.email,
            UserRow {
                id,
                password_hash: user.password_hash,
                role: user.role,
            },
        );
        Ok(id)
    }

    async fn password_hash(&self, email: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .inner
            .read()
            .users
            .get(email)
            .map(|u| u.password_hash.clone()))
    }
}

#[async_trait]
impl JobStore for MemoryStore {
    async fn create_job(&self, job: NewJob) -> Result<JobId, StoreError> {
        let mut inner = self.inner.write();
        inner.next_job_id += 1;
        let id = inner.next_job_id;
        inner.jobs.insert(
            id,
            Job {
                id,
                title: job.title,
                description: job.description,
                total_applications: job.total_applications,
                company_name: job.company_name,
                applicants: Vec::new(),
                posted_on: Utc::now(),
                posted_by: job.posted_by,
            },
        );
        Ok(id)
    }

    async fn get_job(&self, id: JobId) -> Result<Option<Job>, StoreError> {
        Ok(self.inner.read().jobs.get(&id).cloned())
    }

    async fn list_jobs(&self) -> Result<Vec<Job>, StoreError> {
        let mut jobs: Vec<Job> = self.inner.read().jobs.values().cloned().collect();
        jobs.sort_by_key(|j| j.id);
        Ok(jobs)
    }

    async fn apply_job(&self, job_id: JobId, user_id: UserId) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        let job = inner.jobs.get_mut(&job_id).ok_or(StoreError::NotFound)?;
        job.applicants.push(user_id);
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn upsert_resume(&self, user_id: UserId, resume_file: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write();
        let profile = inner.profiles.entry(user_id).or_insert_with(|| Profile {
            applicant: user_id,
            ..Profile::default()
        });
        profile.resume_file_address = resume_file.to_string();
        Ok(())
    }

    async fn get_profile(&self, user_id: UserId) -> Result<Option<Profile>, StoreError> {
        Ok(self.inner.read().profiles.get(&user_id).cloned())
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, StoreError> {
        let mut profiles: Vec<Profile> = self.inner.read().profiles.values().cloned().collect();
        profiles.sort_by_key(|p| p.applicant);
        Ok(profiles)
    }

    async fn profiles_for(&self, ids: &[UserId]) -> Result<Vec<Profile>, StoreError> {
        let inner = self.inner.read();
        Ok(ids
            .iter()
            .filter_map(|id| inner.profiles.get(id).cloned())
            .collect())
    }
}
