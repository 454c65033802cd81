//! HTTP-level integration tests for the auth endpoints.
//!
//! Tests cover signup validation, duplicate-email conflicts, signin,
//! and the `me` endpoint.

mod common;

use axum::http::StatusCode;
use common::{assert_error, body_json, get, get_auth, post_json};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Sign up a user via the API and return the access token plus user id.
async fn signup_user(app: axum::Router, name: &str, email: &str) -> (String, i64) {
    let body = serde_json::json!({
        "name": name,
        "email": email,
        "password": "test_password_123!",
    });
    let response = post_json(app, "/api/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let token = json["data"]["access_token"].as_str().unwrap().to_string();
    let user_id = json["data"]["user"]["id"].as_i64().unwrap();
    (token, user_id)
}

// ---------------------------------------------------------------------------
// Signup
// ---------------------------------------------------------------------------

/// Successful signup returns 201 with a token and the new user at level 1.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_success(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "name": "Ada",
        "email": "ada@test.com",
        "password": "secret123",
    });
    let response = post_json(app, "/api/auth/signup", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert!(json["data"]["access_token"].is_string());
    assert_eq!(json["data"]["user"]["name"], "Ada");
    assert_eq!(json["data"]["user"]["email"], "ada@test.com");
    assert_eq!(json["data"]["user"]["total_xp"], 0);
    assert_eq!(json["data"]["user"]["level"], 1);
}

/// Signup normalizes the email: trimmed and lowercased.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_normalizes_email(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "name": "Ada",
        "email": "  Ada@Test.COM  ",
        "password": "secret123",
    });
    let response = post_json(app, "/api/auth/signup", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["user"]["email"], "ada@test.com");
}

/// A duplicate email returns 409 Conflict.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_duplicate_email(pool: PgPool) {
    let (_token, _id) = signup_user(common::build_test_app(pool.clone()), "Ada", "ada@test.com").await;

    let body = serde_json::json!({
        "name": "Another Ada",
        "email": "ada@test.com",
        "password": "different456",
    });
    let response = post_json(common::build_test_app(pool), "/api/auth/signup", body).await;

    assert_error(response, StatusCode::CONFLICT, "already registered").await;
}

/// Invalid email format returns 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_invalid_email(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "name": "Ada",
        "email": "not-an-email",
        "password": "secret123",
    });
    let response = post_json(app, "/api/auth/signup", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Too-short password returns 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_signup_short_password(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "name": "Ada",
        "email": "ada@test.com",
        "password": "abc",
    });
    let response = post_json(app, "/api/auth/signup", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Signin
// ---------------------------------------------------------------------------

/// Successful signin returns 200 with a fresh token.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_signin_success(pool: PgPool) {
    signup_user(common::build_test_app(pool.clone()), "Ada", "ada@test.com").await;

    let body = serde_json::json!({
        "email": "ada@test.com",
        "password": "test_password_123!",
    });
    let response = post_json(common::build_test_app(pool), "/api/auth/signin", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["access_token"].is_string());
    assert_eq!(json["message"], "Welcome back, Ada!");
}

/// Wrong password returns 401 with the same message as unknown email.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_signin_wrong_password(pool: PgPool) {
    signup_user(common::build_test_app(pool.clone()), "Ada", "ada@test.com").await;

    let body = serde_json::json!({
        "email": "ada@test.com",
        "password": "incorrect_password",
    });
    let response = post_json(common::build_test_app(pool), "/api/auth/signin", body).await;

    assert_error(response, StatusCode::UNAUTHORIZED, "Invalid email or password").await;
}

/// Unknown email returns 401 without leaking which emails exist.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_signin_unknown_email(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "email": "ghost@test.com",
        "password": "whatever123",
    });
    let response = post_json(app, "/api/auth/signin", body).await;

    assert_error(response, StatusCode::UNAUTHORIZED, "Invalid email or password").await;
}

// ---------------------------------------------------------------------------
// Me
// ---------------------------------------------------------------------------

/// `me` with a valid token returns the user profile.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_with_valid_token(pool: PgPool) {
    let (token, user_id) =
        signup_user(common::build_test_app(pool.clone()), "Ada", "ada@test.com").await;

    let response = get_auth(common::build_test_app(pool), "/api/auth/me", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], user_id);
    assert_eq!(json["data"]["email"], "ada@test.com");
}

/// `me` without a token returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_without_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/auth/me").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// `me` with a garbage token returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_with_invalid_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/auth/me", "not-a-real-token").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
