use std::path::PathBuf;

use crate::errors::AppError;

pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 60 * 60;
/// Longest accepted `JWT_TTL_SECONDS`: one week.
pub const MAX_TOKEN_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;

#[derive(Clone, Debug)]
pub struct Config {
    pub mongodb_uri: String,
    pub db_name: String,

    pub jwt_private_key_path: PathBuf,
    pub jwt_public_key_path: PathBuf,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    pub jwt_ttl_seconds: i64,

    pub resume_dir: PathBuf,
    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let mongodb_uri = std::env::var("MONGODB_URI")
            .map_err(|_| AppError::Config("MONGODB_URI is required".into()))?;
        let db_name = env_or("DB_NAME", "jobboard");

        let jwt_ttl_seconds = parse_ttl(std::env::var("JWT_TTL_SECONDS").ok().as_deref())?;

        Ok(Self {
            mongodb_uri,
            db_name,
            jwt_private_key_path: env_or("JWT_PRIVATE_KEY_PATH", "keys/app.rsa").into(),
            jwt_public_key_path: env_or("JWT_PUBLIC_KEY_PATH", "keys/app.rsa.pub").into(),
            jwt_issuer: env_or("JWT_ISSUER", "ResumeParser"),
            jwt_audience: env_or("JWT_AUDIENCE", "https://reflecto.trend"),
            jwt_ttl_seconds,
            resume_dir: env_or("RESUME_DIR", "resumes").into(),
            bind_addr: env_or("BIND_ADDR", "127.0.0.1:3000"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_ttl(raw: Option<&str>) -> Result<i64, AppError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_TOKEN_TTL_SECONDS);
    };
    let secs: i64 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::Config(format!("JWT_TTL_SECONDS is not a number: {raw}")))?;
    if !(1..=MAX_TOKEN_TTL_SECONDS).contains(&secs) {
        return Err(AppError::Config(format!(
            "JWT_TTL_SECONDS must be between 1 and {MAX_TOKEN_TTL_SECONDS}, got {secs}"
        )));
    }
    Ok(secs)
}

#[cfg(test)]
impl Config {
    /// Config pointing at the checked-in fixture keys.
    pub(crate) fn for_tests(resume_dir: &std::path::Path) -> Self {
        let fixtures = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
        Self {
            mongodb_uri: "mongodb://localhost:27017".into(),
            db_name: "jobboard_test".into(),
            jwt_private_key_path: fixtures.join("app.rsa"),
            jwt_public_key_path: fixtures.join("app.rsa.pub"),
            jwt_issuer: "ResumeParser".into(),
            jwt_audience: "https://reflecto.trend".into(),
            jwt_ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
            resume_dir: resume_dir.to_path_buf(),
            bind_addr: "127.0.0.1:0".into(),
        }
    }
}
