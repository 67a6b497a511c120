use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, DateTime as BsonDateTime},
    options::{ClientOptions, IndexOptions, ReturnDocument},
    Client, Collection, Database, IndexModel,
};
use serde::{Deserialize, Serialize};

use super::{JobStore, ProfileStore, StoreError, StoreHealth, UserDirectory};
use crate::{
    config::Config,
    models::{
        job::{Job, NewJob},
        profile::Profile,
        user::{NewUser, Role},
        JobId, UserId,
    },
};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserDoc {
    #[serde(rename = "_id")]
    id: UserId,
    name: String,
    email: String,
    password_hash: String,
    address: String,
    profile_headline: String,
    role: Role,
    created_at: BsonDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct JobDoc {
    #[serde(rename = "_id")]
    id: JobId,
    title: String,
    description: String,
    total_applications: i32,
    company_name: String,
    #[serde(default)]
    applicants: Vec<UserId>,
    posted_on: BsonDateTime,
    posted_by: UserId,
}

impl From<JobDoc> for Job {
    fn from(d: JobDoc) -> Self {
        Self {
            id: d.id,
            title: d.title,
            description: d.description,
            total_applications: d.total_applications,
            company_name: d.company_name,
            applicants: d.applicants,
            posted_on: bson_to_chrono(d.posted_on),
            posted_by: d.posted_by,
        }
    }
}

// Upserts only set the resume location, so every other field may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct ProfileDoc {
    #[serde(rename = "_id")]
    applicant: UserId,
    resume_file_address: String,
    skills: String,
    education: String,
    experience: String,
    name: String,
    email: String,
    phone: String,
}

impl From<ProfileDoc> for Profile {
    fn from(d: ProfileDoc) -> Self {
        Self {
            applicant: d.applicant,
            resume_file_address: d.resume_file_address,
            skills: d.skills,
            education: d.education,
            experience: d.experience,
            name: d.name,
            email: d.email,
            phone: d.phone,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CounterDoc {
    #[serde(rename = "_id")]
    name: String,
    seq: i64,
}

fn bson_to_chrono(dt: BsonDateTime) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(dt.timestamp_millis()).unwrap_or_default()
}

#[derive(Clone)]
pub struct MongoStore {
    db: Database,
    users: Collection<UserDoc>,
    jobs: Collection<JobDoc>,
    profiles: Collection<ProfileDoc>,
    counters: Collection<CounterDoc>,
}

impl MongoStore {
    pub async fn connect(cfg: &Config) -> Result<Self, StoreError> {
        let mut opts = ClientOptions::parse(&cfg.mongodb_uri).await?;
        opts.app_name = Some("jobboard-auth".to_string());
        let client = Client::with_options(opts)?;
        let db = client.database(&cfg.db_name);

        let users: Collection<UserDoc> = db.collection("users");
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        users.create_index(email_index).await?;

        tracing::info!(db = %cfg.db_name, "connected to mongodb");

        Ok(Self {
            users,
            jobs: db.collection("jobs"),
            profiles: db.collection("profiles"),
            counters: db.collection("counters"),
            db,
        })
    }

    async fn next_id(&self, name: &str) -> Result<i64, StoreError> {
        let counter = self
            .counters
            .find_one_and_update(doc! { "_id": name }, doc! { "$inc": { "seq": 1i64 } })
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| StoreError::Backend(format!("counter {name} was not created")))?;
        Ok(counter.seq)
    }
}

#[async_trait]
impl StoreHealth for MongoStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for MongoStore {
    async fn user_exists(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self
            .users
            .find_one(doc! { "email": email })
            .await?
            .is_some())
    }

    async fn is_user_admin(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self
            .users
            .find_one(doc! { "email": email, "role": Role::Admin.as_str() })
            .await?
            .is_some())
    }

    async fn get_user_id(&self, email: &str) -> Result<UserId, StoreError> {
        self.users
            .find_one(doc! { "email": email })
            .await?
            .map(|u| u.id)
            .ok_or(StoreError::NotFound)
    }

    async fn create_user(&self, user: NewUser) -> Result<UserId, StoreError> {
        let id = self.next_id("users").await?;
        let user = UserDoc {
            id,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            address: user.address,
            profile_headline: user.profile_headline,
            role: user.role,
            created_at: BsonDateTime::now(),
        };
        self.users.insert_one(&user).await?;
        Ok(id)
    }

    async fn password_hash(&self, email: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .users
            .find_one(doc! { "email": email })
            .await?
            .map(|u| u.password_hash))
    }
}

#[async_trait]
impl JobStore for MongoStore {
    async fn create_job(&self, job: NewJob) -> Result<JobId, StoreError> {
        let id = self.next_id("jobs").await?;
        let job = JobDoc {
            id,
            title: job.title,
            description: job.description,
            total_applications: job.total_applications,
            company_name: job.company_name,
            applicants: Vec::new(),
            posted_on: BsonDateTime::now(),
            posted_by: job.posted_by,
        };
        self.jobs.insert_one(&job).await?;
        Ok(id)
    }

    async fn get_job(&self, id: JobId) -> Result<Option<Job>, StoreError> {
        Ok(self
            .jobs
            .find_one(doc! { "_id": id })
            .await?
            .map(Job::from))
    }

    async fn list_jobs(&self) -> Result<Vec<Job>, StoreError> {
        let docs: Vec<JobDoc> = self.jobs.find(doc! {}).await?.try_collect().await?;
        Ok(docs.into_iter().map(Job::from).collect())
    }

    // $push on a single document is atomic, so concurrent applications to the
    // same job are all kept.
    async fn apply_job(&self, job_id: JobId, user_id: UserId) -> Result<(), StoreError> {
        let res = self
            .jobs
            .update_one(
                doc! { "_id": job_id },
                doc! { "$push": { "applicants": user_id } },
            )
            .await?;
        if res.matched_count == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for MongoStore {
    async fn upsert_resume(&self, user_id: UserId, resume_file: &str) -> Result<(), StoreError> {
        self.profiles
            .update_one(
                doc! { "_id": user_id },
                doc! { "$set": { "resume_file_address": resume_file } },
            )
            .upsert(true)
            .await?;
        Ok(())
    }

    async fn get_profile(&self, user_id: UserId) -> Result<Option<Profile>, StoreError> {
        Ok(self
            .profiles
            .find_one(doc! { "_id": user_id })
            .await?
            .map(Profile::from))
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, StoreError> {
        let docs: Vec<ProfileDoc> = self.profiles.find(doc! {}).await?.try_collect().await?;
        Ok(docs.into_iter().map(Profile::from).collect())
    }

    async fn profiles_for(&self, ids: &[UserId]) -> Result<Vec<Profile>, StoreError> {
        let docs: Vec<ProfileDoc> = self
            .profiles
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await?
            .try_collect()
            .await?;

        Ok(ids
            .iter()
            .filter_map(|id| docs.iter().find(|d| d.applicant == *id))
            .cloned()
            .map(Profile::from)
            .collect())
    }
}
