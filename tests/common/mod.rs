#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use jobboard_auth::{
    auth::KeyMaterial,
    config::Config,
    models::{
        user::{NewUser, Role},
        UserId,
    },
    password::hash_password,
    routes::app_router,
    state::AppState,
    store::{MemoryStore, UserDirectory},
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub const BOUNDARY: &str = "jobboard-test-boundary";

pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

pub fn test_config(resume_dir: &Path) -> Config {
    Config {
        mongodb_uri: "mongodb://localhost:27017".into(),
        db_name: "jobboard_test".into(),
        jwt_private_key_path: fixture("app.rsa"),
        jwt_public_key_path: fixture("app.rsa.pub"),
        jwt_issuer: "ResumeParser".into(),
        jwt_audience: "https://reflecto.trend".into(),
        jwt_ttl_seconds: 3600,
        resume_dir: resume_dir.to_path_buf(),
        bind_addr: "127.0.0.1:0".into(),
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    pub store: Arc<MemoryStore>,
    pub resumes: TempDir,
}

pub fn spawn_app() -> TestApp {
    let resumes = tempfile::tempdir().expect("temp dir");
    let cfg = test_config(resumes.path());
    let keys = KeyMaterial::load(&cfg.jwt_private_key_path, &cfg.jwt_public_key_path)
        .expect("fixture keys load");
    let store = Arc::new(MemoryStore::new());
    let state = Arc::new(AppState::with_store(&cfg, keys, store.clone()).expect("app state"));

    TestApp {
        router: app_router(state.clone()),
        state,
        store,
        resumes,
    }
}

impl TestApp {
    pub async fn seed_user(&self, email: &str, password: &str, role: Role) -> UserId {
        self.store
            .create_user(NewUser {
                name: email.split('@').next().unwrap_or(email).to_string(),
                email: email.to_string(),
                password_hash: hash_password(password).expect("hash"),
                address: String::new(),
                profile_headline: String::new(),
                role,
            })
            .await
            .expect("seed user")
    }

    pub fn bearer_for(&self, email: &str) -> String {
        let issued = self.state.tokens.issue_auth_token(email).expect("issue");
        format!("Bearer {}", issued.token)
    }

    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let resp = self.router.clone().oneshot(req).await.expect("infallible");
        let status = resp.status();
        let bytes = resp
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }
}

pub fn json_request(method: Method, uri: &str, auth: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn empty_request(method: Method, uri: &str, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::empty()).expect("request")
}

pub fn upload_request(auth: &str, file_name: &str, contents: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/pdf\r\n\r\n");
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri("/uploadResume")
        .header(header::AUTHORIZATION, auth)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("request")
}
