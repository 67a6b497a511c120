use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{JobId, UserId};

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub description: String,
    /// Advertised capacity. Not enforced when applying.
    pub total_applications: i32,
    pub company_name: String,
    /// Append-only; the same user may appear more than once.
    pub applicants: Vec<UserId>,
    pub posted_on: DateTime<Utc>,
    pub posted_by: UserId,
}

#[derive(Debug, Clone)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub company_name: String,
    pub total_applications: i32,
    pub posted_by: UserId,
}
