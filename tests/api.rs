mod common;

use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use common::{empty_request, json_request, spawn_app, upload_request};
use jobboard_auth::{models::user::Role, store::JobStore};
use serde_json::json;

const ADMIN: &str = "root@example.com";
const ALICE: &str = "alice@example.com";

async fn create_job(app: &common::TestApp, title: &str) -> i64 {
    let (status, body) = app
        .send(json_request(
            Method::POST,
            "/admin/job",
            Some(&app.bearer_for(ADMIN)),
            json!({
                "title": title,
                "description": "Build things",
                "companyName": "Acme",
                "totalApplications": "3",
            }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["id"].as_i64().expect("job id")
}

#[tokio::test]
async fn signup_login_and_apply() {
    let app = spawn_app();
    app.seed_user(ADMIN, "admin-password", Role::Admin).await;

    let (status, _) = app
        .send(json_request(
            Method::POST,
            "/signup",
            None,
            json!({
                "name": "Alice",
                "email": ALICE,
                "password": "s3cret-pass",
                "address": "1 Main St",
                "profileHeadline": "Engineer",
            }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .send(json_request(
            Method::POST,
            "/login",
            None,
            json!({ "email": ALICE, "password": "s3cret-pass" }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tokenType"], "Bearer");
    let alice = format!("Bearer {}", body["token"].as_str().expect("token"));

    let job_id = create_job(&app, "Rust Engineer").await;

    let (status, body) = app
        .send(empty_request(Method::GET, "/jobs", Some(&alice)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["jobs"][0]["title"], "Rust Engineer");
    assert_eq!(body["jobs"][0]["totalApplications"], 3);

    let uri = format!("/jobs/apply?job_id={job_id}");
    let (status, _) = app
        .send(empty_request(Method::POST, &uri, Some(&alice)))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .send(empty_request(
            Method::GET,
            &format!("/admin/job/{job_id}"),
            Some(&app.bearer_for(ADMIN)),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["numApplications"], 1);
}

#[tokio::test]
async fn bad_credentials_are_unauthenticated() {
    let app = spawn_app();
    app.seed_user(ALICE, "s3cret-pass", Role::User).await;

    for (email, password) in [(ALICE, "wrong-pass"), ("nobody@example.com", "s3cret-pass")] {
        let (status, body) = app
            .send(json_request(
                Method::POST,
                "/login",
                None,
                json!({ "email": email, "password": password }),
            ))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "unauthorized");
    }
}

#[tokio::test]
async fn signup_validates_input() {
    let app = spawn_app();
    app.seed_user(ALICE, "s3cret-pass", Role::User).await;

    let (status, _) = app
        .send(json_request(
            Method::POST,
            "/signup",
            None,
            json!({ "name": "Alice", "email": ALICE, "password": "another-pass" }),
        ))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .send(json_request(
            Method::POST,
            "/signup",
            None,
            json!({ "name": "Bob", "email": "bob@example.com", "password": "short" }),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn protected_routes_reject_bad_tokens_uniformly() {
    let app = spawn_app();
    app.seed_user(ALICE, "s3cret-pass", Role::User).await;

    let expired = app
        .state
        .tokens
        .issue_auth_token_at(ALICE, Utc::now() - Duration::hours(2))
        .expect("issue")
        .token;
    let expired = format!("Bearer {expired}");

    for auth in [None, Some("Bear"), Some("Bearer garbage.token.here"), Some(expired.as_str())] {
        let (status, body) = app.send(empty_request(Method::GET, "/jobs", auth)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{auth:?}");
        assert_eq!(body["error"], "unauthorized");
    }
}

#[tokio::test]
async fn admin_routes_require_admin() {
    let app = spawn_app();
    app.seed_user(ALICE, "s3cret-pass", Role::User).await;
    let alice = app.bearer_for(ALICE);

    let requests = [
        json_request(
            Method::POST,
            "/admin/job",
            Some(&alice),
            json!({
                "title": "x",
                "description": "y",
                "companyName": "z",
                "totalApplications": "1",
            }),
        ),
        empty_request(Method::GET, "/admin/job/1", Some(&alice)),
        empty_request(Method::GET, "/admin/applicants", Some(&alice)),
        empty_request(Method::GET, "/admin/applicant/1", Some(&alice)),
    ];
    for req in requests {
        let uri = req.uri().clone();
        let (status, body) = app.send(req).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{uri}");
        assert_eq!(body["error"], "forbidden");
    }
}

#[tokio::test]
async fn unknown_subject_is_not_an_admin() {
    let app = spawn_app();
    let ghost = app.bearer_for("ghost@example.com");

    let (status, _) = app
        .send(empty_request(Method::GET, "/admin/applicants", Some(&ghost)))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn resume_upload_is_for_regular_users_only() {
    let app = spawn_app();
    app.seed_user(ADMIN, "admin-password", Role::Admin).await;
    let alice_id = app.seed_user(ALICE, "s3cret-pass", Role::User).await;

    let (status, _) = app
        .send(upload_request(&app.bearer_for(ADMIN), "cv.pdf", b"%PDF-1.4"))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .send(upload_request(
            &app.bearer_for(ALICE),
            "../../cv.pdf",
            b"%PDF-1.4 alice",
        ))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let stored = app
        .resumes
        .path()
        .join(alice_id.to_string())
        .join("cv.pdf");
    assert_eq!(std::fs::read(&stored).expect("stored resume"), b"%PDF-1.4 alice");

    let (status, body) = app
        .send(empty_request(
            Method::GET,
            &format!("/admin/applicant/{alice_id}"),
            Some(&app.bearer_for(ADMIN)),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["applicant"]["resumeFileAddress"], "cv.pdf");
}

#[tokio::test]
async fn apply_rejects_bad_and_missing_jobs() {
    let app = spawn_app();
    app.seed_user(ALICE, "s3cret-pass", Role::User).await;
    let alice = app.bearer_for(ALICE);

    let cases = [
        ("/jobs/apply?job_id=42", StatusCode::NOT_FOUND),
        ("/jobs/apply?job_id=abc", StatusCode::BAD_REQUEST),
        ("/jobs/apply", StatusCode::BAD_REQUEST),
    ];
    for (uri, expected) in cases {
        let (status, _) = app
            .send(empty_request(Method::POST, uri, Some(&alice)))
            .await;
        assert_eq!(status, expected, "{uri}");
    }
}

#[tokio::test]
async fn concurrent_applications_are_both_recorded() {
    let app = spawn_app();
    app.seed_user(ADMIN, "admin-password", Role::Admin).await;
    let seven = app.seed_user("seven@example.com", "s3cret-pass", Role::User).await;
    let nine = app.seed_user("nine@example.com", "s3cret-pass", Role::User).await;
    let job_id = create_job(&app, "Concurrent").await;

    let uri = format!("/jobs/apply?job_id={job_id}");
    let seven_auth = app.bearer_for("seven@example.com");
    let nine_auth = app.bearer_for("nine@example.com");
    let ((s1, _), (s2, _)) = tokio::join!(
        app.send(empty_request(Method::POST, &uri, Some(&seven_auth))),
        app.send(empty_request(Method::POST, &uri, Some(&nine_auth))),
    );
    assert_eq!(s1, StatusCode::OK);
    assert_eq!(s2, StatusCode::OK);

    let job = app.store.get_job(job_id).await.unwrap().unwrap();
    assert_eq!(job.applicants.len(), 2);
    assert!(job.applicants.contains(&seven));
    assert!(job.applicants.contains(&nine));
}

#[tokio::test]
async fn introspect_reports_token_state() {
    let app = spawn_app();
    let token = app.state.tokens.issue_auth_token(ALICE).unwrap().token;

    let (status, body) = app
        .send(json_request(
            Method::POST,
            "/auth/introspect",
            None,
            json!({ "token": token }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["active"], true);
    assert_eq!(body["sub"], ALICE);

    let (_, body) = app
        .send(json_request(
            Method::POST,
            "/auth/introspect",
            None,
            json!({ "token": "not-a-token" }),
        ))
        .await;
    assert_eq!(body["active"], false);
    assert!(body.get("sub").is_none());
}

#[tokio::test]
async fn health_reports_store_up() {
    let app = spawn_app();
    let (status, body) = app.send(empty_request(Method::GET, "/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "up");
}

#[tokio::test]
async fn malformed_bodies_use_the_error_envelope() {
    let app = spawn_app();
    app.seed_user(ADMIN, "admin-password", Role::Admin).await;

    let broken = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/signup")
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from("{\"name\": \"Alice\", \"email\":"))
        .unwrap();
    let (status, body) = app.send(broken).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid request");

    // Well-formed JSON missing a required field.
    let (status, body) = app
        .send(json_request(
            Method::POST,
            "/admin/job",
            Some(&app.bearer_for(ADMIN)),
            json!({ "title": "No company" }),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid request");

    let no_content_type = empty_request(Method::POST, "/login", None);
    let (status, body) = app.send(no_content_type).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid request");
}

#[tokio::test]
async fn racing_signups_for_one_email_yield_one_conflict() {
    let app = spawn_app();
    let body = json!({ "name": "Alice", "email": ALICE, "password": "s3cret-pass" });

    let (a, b) = tokio::join!(
        app.send(json_request(Method::POST, "/signup", None, body.clone())),
        app.send(json_request(Method::POST, "/signup", None, body.clone())),
    );
    let mut statuses = [a.0, b.0];
    statuses.sort_by_key(|s| s.as_u16());
    assert_eq!(statuses, [StatusCode::OK, StatusCode::CONFLICT]);
}
