//! Authentication API integration tests
//!
//! Signup, login and the current-user endpoints over the full router.

mod common;

use axum::http::StatusCode;
use common::{TestApp, PASSWORD};
use pretty_assertions::assert_eq;
use serde_json::json;

fn fields(body: &serde_json::Value) -> Vec<String> {
    body["data"]
        .as_array()
        .map(|errors| {
            errors
                .iter()
                .map(|e| e["field"].as_str().unwrap_or_default().to_string())
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn test_signup_success() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post_json(
            "/auth/signup",
            None,
            json!({ "email": "test@example.com", "name": "tester", "password": PASSWORD }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User created succesfully");
    assert!(body["user"].as_str().is_some());
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    let app = TestApp::new().await;
    app.register("test@example.com", "tester").await;

    let (status, body) = app
        .post_json(
            "/auth/signup",
            None,
            json!({ "email": "test@example.com", "name": "other1", "password": PASSWORD }),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(fields(&body), vec!["email"]);
    assert_eq!(body["data"][0]["message"], "E-Mail address already exists");
}

#[tokio::test]
async fn test_signup_reports_every_invalid_field() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post_json(
            "/auth/signup",
            None,
            json!({ "email": "not-an-email", "name": "ab", "password": "" }),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], 422);
    let mut fields = fields(&body);
    fields.sort();
    assert_eq!(fields, vec!["email", "name", "password"]);
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new().await;
    let (token, user_id) = app.register("test@example.com", "tester").await;

    assert!(!token.is_empty());
    let claims = assert_ok!(app.state.tokens.verify(&token));
    assert_eq!(claims.user_id, user_id);
    assert_eq!(claims.email, "test@example.com");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new().await;
    app.register("test@example.com", "tester").await;

    let (status, body) = app
        .post_json(
            "/auth/login",
            None,
            json!({ "email": "test@example.com", "password": "wrongpassword" }),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], 401);
}

#[tokio::test]
async fn test_login_unknown_user() {
    let app = TestApp::new().await;

    let (status, _) = app
        .post_json(
            "/auth/login",
            None,
            json!({ "email": "nobody@example.com", "password": PASSWORD }),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_user_profile() {
    let app = TestApp::new().await;
    let (token, user_id) = app.register("test@example.com", "tester").await;

    let (status, body) = app.get("/user", Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["_id"], user_id);
    assert_eq!(body["name"], "tester");
    assert_eq!(body["status"], "new user");
    assert!(body.get("passwordHash").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_get_user_requires_token() {
    let app = TestApp::new().await;

    let (status, _) = app.get("/user", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = app.get("/user", Some("garbage")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_update_status() {
    let app = TestApp::new().await;
    let (token, _) = app.register("test@example.com", "tester").await;

    let request = axum::http::Request::put("/user")
        .header("content-type", "application/json")
        .header("Authentication", format!("Bearer {}", token))
        .body(axum::body::Body::from(json!({ "status": "  busy  " }).to_string()))
        .unwrap();
    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Updated successfully");

    let (_, profile) = app.get("/user", Some(&token)).await;
    assert_eq!(profile["status"], "busy");
}

#[tokio::test]
async fn test_authorization_header_is_not_read() {
    let app = TestApp::new().await;
    let (token, _) = app.register("test@example.com", "tester").await;

    let request = axum::http::Request::get("/user")
        .header("Authorization", format!("Bearer {}", token))
        .body(axum::body::Body::empty())
        .unwrap();
    let (status, _) = app.send(request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}
