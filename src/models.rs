pub mod job;
pub mod jwt;
pub mod profile;
pub mod user;

pub type UserId = i64;
pub type JobId = i64;
