//! Authentication API integration tests
//!
//! Tests for registration, login, the identity endpoint and the bearer-token
//! gate in front of every protected route.

use axum::http::StatusCode;
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use pretty_assertions::assert_eq;
use serde_json::json;
use todoboard::backend::auth::{verify_token, Claims};
use todoboard::backend::error::types::{INVALID_CREDENTIALS, USER_EXISTS};
use todoboard::backend::middleware::auth::{INVALID_TOKEN, NO_TOKEN, USER_NOT_FOUND};
use todoboard::shared::user::{EMAIL_INVALID, NAME_TOO_SHORT, PASSWORD_TOO_SHORT};
use todoboard::shared::{AuthResponse, UserResponse};
use uuid::Uuid;

use crate::common::{
    generate_test_token, register_user, TestApp, WithToken, TEST_JWT_SECRET, TEST_PASSWORD,
};

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/users")
        .json(&json!({
            "name": "  Ann  ",
            "email": " Ann@Example.COM ",
            "password": "secret1"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: AuthResponse = response.json();
    assert_eq!(body.name, "Ann");
    assert_eq!(body.email, "ann@example.com");

    let claims = assert_ok!(verify_token(&body.token, TEST_JWT_SECRET));
    assert_eq!(claims.user_id(), Some(body.id));
    assert_eq!(claims.email, "ann@example.com");
}

#[tokio::test]
async fn test_register_never_returns_password() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/users")
        .json(&json!({ "name": "Ann", "email": "ann@example.com", "password": "secret1" }))
        .await;

    let body: serde_json::Value = response.json();
    assert!(body.get("password").is_none());
    assert!(body.get("passwordHash").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::new().await;
    register_user(&app.server, "Ann", "ann@example.com").await;

    let response = app
        .server
        .post("/api/users")
        .json(&json!({ "name": "Other Ann", "email": "ANN@example.com", "password": "secret1" }))
        .await;

    assert_error_response!(response, StatusCode::BAD_REQUEST, USER_EXISTS);
}

#[tokio::test]
async fn test_register_validation() {
    let app = TestApp::new().await;

    let cases = [
        (json!({ "name": "A", "email": "a@example.com", "password": "secret1" }), NAME_TOO_SHORT),
        (json!({ "name": "Ann", "email": "not-an-email", "password": "secret1" }), EMAIL_INVALID),
        (json!({ "name": "Ann", "email": "ann@example.com", "password": "12345" }), PASSWORD_TOO_SHORT),
        (json!({ "email": "ann@example.com", "password": "secret1" }), NAME_TOO_SHORT),
    ];

    for (payload, message) in cases {
        let response = app.server.post("/api/users").json(&payload).await;
        assert_error_response!(response, StatusCode::BAD_REQUEST, message);
    }
}

#[tokio::test]
async fn test_register_malformed_json() {
    let app = TestApp::new().await;

    let response = app
        .server
        .post("/api/users")
        .content_type("application/json")
        .bytes("{ not json".into())
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new().await;
    let user = register_user(&app.server, "Ann", "ann@example.com").await;

    let response = app
        .server
        .post("/api/users/login")
        .json(&json!({ "email": "Ann@Example.com", "password": TEST_PASSWORD }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: AuthResponse = response.json();
    assert_eq!(body.id, user.id);
    assert_eq!(body.name, "Ann");
    assert_eq!(body.email, "ann@example.com");
    assert!(!body.token.is_empty());
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let app = TestApp::new().await;
    register_user(&app.server, "Ann", "ann@example.com").await;

    let wrong_password = app
        .server
        .post("/api/users/login")
        .json(&json!({ "email": "ann@example.com", "password": "wrong-password" }))
        .await;
    assert_error_response!(wrong_password, StatusCode::BAD_REQUEST, INVALID_CREDENTIALS);

    let unknown_email = app
        .server
        .post("/api/users/login")
        .json(&json!({ "email": "nobody@example.com", "password": TEST_PASSWORD }))
        .await;
    assert_error_response!(unknown_email, StatusCode::BAD_REQUEST, INVALID_CREDENTIALS);
}

#[tokio::test]
async fn test_get_me_with_valid_token() {
    let app = TestApp::new().await;
    let user = register_user(&app.server, "Ann", "ann@example.com").await;

    let response = app.server.get("/api/users/me").with_token(&user.token).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: UserResponse = response.json();
    assert_eq!(body.id, user.id);
    assert_eq!(body.name, "Ann");
    assert_eq!(body.email, "ann@example.com");
    assert!(body.created_at <= body.updated_at);
}

#[tokio::test]
async fn test_get_me_without_token() {
    let app = TestApp::new().await;

    let response = app.server.get("/api/users/me").await;

    assert_error_response!(response, StatusCode::UNAUTHORIZED, NO_TOKEN);
}

#[tokio::test]
async fn test_non_bearer_scheme_is_missing_token() {
    let app = TestApp::new().await;
    let user = register_user(&app.server, "Ann", "ann@example.com").await;

    let response = app
        .server
        .get("/api/todos")
        .add_header(
            axum::http::header::AUTHORIZATION,
            axum::http::HeaderValue::from_str(&format!("Basic {}", user.token)).unwrap(),
        )
        .await;

    assert_error_response!(response, StatusCode::UNAUTHORIZED, NO_TOKEN);
}

#[tokio::test]
async fn test_garbage_token() {
    let app = TestApp::new().await;

    let response = app.server.get("/api/todos").with_token("not.a.token").await;

    assert_error_response!(response, StatusCode::UNAUTHORIZED, INVALID_TOKEN);
}

#[tokio::test]
async fn test_token_signed_with_other_secret() {
    let app = TestApp::new().await;
    let user = register_user(&app.server, "Ann", "ann@example.com").await;
    let forged = assert_ok!(todoboard::backend::auth::create_token(
        user.id,
        &user.email,
        "some-other-secret"
    ));

    let response = app.server.get("/api/users/me").with_token(&forged).await;

    assert_error_response!(response, StatusCode::UNAUTHORIZED, INVALID_TOKEN);
}

#[tokio::test]
async fn test_expired_token() {
    let app = TestApp::new().await;
    let user = register_user(&app.server, "Ann", "ann@example.com").await;

    let now = Utc::now().timestamp() as u64;
    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        exp: now - 3600,
        iat: now - 7200,
    };
    let expired = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .unwrap();

    let response = app.server.get("/api/users/me").with_token(&expired).await;

    assert_error_response!(response, StatusCode::UNAUTHORIZED, INVALID_TOKEN);
}

#[tokio::test]
async fn test_token_for_unknown_user() {
    let app = TestApp::new().await;
    let token = generate_test_token(Uuid::new_v4(), "ghost@example.com");

    let response = app.server.get("/api/users/me").with_token(&token).await;

    assert_error_response!(response, StatusCode::UNAUTHORIZED, USER_NOT_FOUND);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let response = app.server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = TestApp::new().await;

    let response = app.server.get("/api/nothing-here").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    assert_contains!(body["message"].as_str().unwrap(), "/api/nothing-here");
}
