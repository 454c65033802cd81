//! HTTP-level integration tests for the courses endpoints: catalog listing,
//! enrollment, progress updates, and the one-time completion reward.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::{assert_error, body_json, get, get_auth, post_json, post_json_auth, put_json_auth};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use skilltrack_db::repositories::{CourseRepo, UserRepo, XpHistoryRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Sign up a user via the API and return the access token plus user id.
async fn signup_user(pool: &PgPool, name: &str, email: &str) -> (String, i64) {
    let body = serde_json::json!({
        "name": name,
        "email": email,
        "password": "test_password_123!",
    });
    let response = post_json(common::build_test_app(pool.clone()), "/api/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let token = json["data"]["access_token"].as_str().unwrap().to_string();
    let user_id = json["data"]["user"]["id"].as_i64().unwrap();
    (token, user_id)
}

/// Seed a catalog course with 10 lessons worth 500 XP.
async fn seed_course(pool: &PgPool, title: &str) -> i64 {
    CourseRepo::create(pool, title, "Programming", 10, 500)
        .await
        .expect("course seeding should succeed")
        .id
}

// ---------------------------------------------------------------------------
// Catalog and enrollment
// ---------------------------------------------------------------------------

/// The catalog is public: listing works without a token.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_catalog_is_public(pool: PgPool) {
    seed_course(&pool, "Rust Basics").await;
    seed_course(&pool, "Advanced SQL").await;

    let response = get(common::build_test_app(pool), "/api/courses").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["courses"].as_array().unwrap().len(), 2);
}

/// Enrollment returns 201 and the course shows up in the user listing.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_enroll_and_list(pool: PgPool) {
    let (token, _user_id) = signup_user(&pool, "Ada", "ada@test.com").await;
    let course_id = seed_course(&pool, "Rust Basics").await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/courses/{course_id}/enroll"),
        serde_json::json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get_auth(common::build_test_app(pool), "/api/courses/user", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let courses = json["data"]["courses"].as_array().unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0]["title"], "Rust Basics");
    assert_eq!(courses[0]["progress"], 0);
    assert_eq!(courses[0]["completed"], false);
}

/// Enrolling twice returns 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_enroll_twice_rejected(pool: PgPool) {
    let (token, _user_id) = signup_user(&pool, "Ada", "ada@test.com").await;
    let course_id = seed_course(&pool, "Rust Basics").await;

    let uri = format!("/api/courses/{course_id}/enroll");
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        serde_json::json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json_auth(
        common::build_test_app(pool),
        &uri,
        serde_json::json!({}),
        &token,
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "Already enrolled").await;
}

/// Enrolling in a nonexistent course returns 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_enroll_unknown_course(pool: PgPool) {
    let (token, _user_id) = signup_user(&pool, "Ada", "ada@test.com").await;

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/courses/999999/enroll",
        serde_json::json!({}),
        &token,
    )
    .await;

    assert_error(response, StatusCode::NOT_FOUND, "not found").await;
}

// ---------------------------------------------------------------------------
// Progress and completion
// ---------------------------------------------------------------------------

/// A partial progress update computes the percentage and grants no XP.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_partial_progress_no_award(pool: PgPool) {
    let (token, user_id) = signup_user(&pool, "Ada", "ada@test.com").await;
    let course_id = seed_course(&pool, "Rust Basics").await;
    post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/courses/{course_id}/enroll"),
        serde_json::json!({}),
        &token,
    )
    .await;

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/courses/{course_id}/progress"),
        serde_json::json!({ "completed_lessons": 4 }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["progress"], 40);
    assert!(json["data"]["award"].is_null());

    let user = UserRepo::find_by_id(&pool, user_id).await.unwrap().unwrap();
    assert_eq!(user.total_xp, 0);
}

/// Reaching 100% grants the course's one-time XP reward exactly once.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_completion_grants_reward_once(pool: PgPool) {
    let (token, user_id) = signup_user(&pool, "Ada", "ada@test.com").await;
    let course_id = seed_course(&pool, "Rust Basics").await;
    post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/courses/{course_id}/enroll"),
        serde_json::json!({}),
        &token,
    )
    .await;

    let uri = format!("/api/courses/{course_id}/progress");
    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        serde_json::json!({ "completed_lessons": 10 }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["progress"], 100);
    assert_eq!(json["data"]["award"]["amount"], 500);
    assert_eq!(json["data"]["award"]["new_total_xp"], 500);
    assert_eq!(json["data"]["award"]["new_level"], 2);
    assert_eq!(json["data"]["award"]["user_leveled_up"], true);

    // A second full-progress update must not re-award.
    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        serde_json::json!({ "completed_lessons": 10 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["award"].is_null());

    let user = UserRepo::find_by_id(&pool, user_id).await.unwrap().unwrap();
    assert_eq!(user.total_xp, 500, "reward must be granted exactly once");

    let count = XpHistoryRepo::count_for_user(&pool, user_id).await.unwrap();
    assert_eq!(count, 1);
}

/// The whole completion award runs on one connection: with a
/// single-connection pool, the catalog read inside the award transaction
/// cannot block waiting for a second connection the transaction holds.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_completion_award_runs_on_one_connection(
    pool_opts: PgPoolOptions,
    connect_opts: PgConnectOptions,
) {
    let pool = pool_opts
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(connect_opts)
        .await
        .expect("pool should connect");

    let (token, user_id) = signup_user(&pool, "Ada", "ada@test.com").await;
    let course_id = seed_course(&pool, "Rust Basics").await;
    post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/courses/{course_id}/enroll"),
        serde_json::json!({}),
        &token,
    )
    .await;

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/courses/{course_id}/progress"),
        serde_json::json!({ "completed_lessons": 10 }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["award"]["amount"], 500);

    let user = UserRepo::find_by_id(&pool, user_id).await.unwrap().unwrap();
    assert_eq!(user.total_xp, 500);
}

/// Two racing full-progress updates both succeed: the reward is granted to
/// exactly one of them and the other reports no award instead of an error.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_concurrent_completions_grant_once(pool: PgPool) {
    let (token, user_id) = signup_user(&pool, "Ada", "ada@test.com").await;
    let course_id = seed_course(&pool, "Rust Basics").await;
    post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/courses/{course_id}/enroll"),
        serde_json::json!({}),
        &token,
    )
    .await;

    let uri = format!("/api/courses/{course_id}/progress");
    let request_a = put_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        serde_json::json!({ "completed_lessons": 10 }),
        &token,
    );
    let request_b = put_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        serde_json::json!({ "completed_lessons": 10 }),
        &token,
    );

    let (response_a, response_b) = tokio::join!(request_a, request_b);
    assert_eq!(response_a.status(), StatusCode::OK);
    assert_eq!(response_b.status(), StatusCode::OK);

    let json_a = body_json(response_a).await;
    let json_b = body_json(response_b).await;
    let awards = [&json_a, &json_b]
        .iter()
        .filter(|j| !j["data"]["award"].is_null())
        .count();
    assert_eq!(awards, 1, "exactly one update must carry the award");

    let user = UserRepo::find_by_id(&pool, user_id).await.unwrap().unwrap();
    assert_eq!(user.total_xp, 500, "the reward must be granted exactly once");

    let count = XpHistoryRepo::count_for_user(&pool, user_id).await.unwrap();
    assert_eq!(count, 1);
}

/// Lesson counts past the total are capped at 100%.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_progress_capped_at_100(pool: PgPool) {
    let (token, _user_id) = signup_user(&pool, "Ada", "ada@test.com").await;
    let course_id = seed_course(&pool, "Rust Basics").await;
    post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/courses/{course_id}/enroll"),
        serde_json::json!({}),
        &token,
    )
    .await;

    let response = put_json_auth(
        common::build_test_app(pool),
        &format!("/api/courses/{course_id}/progress"),
        serde_json::json!({ "completed_lessons": 25 }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["progress"], 100);
}

/// Updating progress on a course the user never enrolled in returns 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_progress_requires_enrollment(pool: PgPool) {
    let (token, _user_id) = signup_user(&pool, "Ada", "ada@test.com").await;
    let course_id = seed_course(&pool, "Rust Basics").await;

    let response = put_json_auth(
        common::build_test_app(pool),
        &format!("/api/courses/{course_id}/progress"),
        serde_json::json!({ "completed_lessons": 5 }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Negative lesson counts are rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_progress_negative_lessons_rejected(pool: PgPool) {
    let (token, _user_id) = signup_user(&pool, "Ada", "ada@test.com").await;
    let course_id = seed_course(&pool, "Rust Basics").await;
    post_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/courses/{course_id}/enroll"),
        serde_json::json!({}),
        &token,
    )
    .await;

    let response = put_json_auth(
        common::build_test_app(pool),
        &format!("/api/courses/{course_id}/progress"),
        serde_json::json!({ "completed_lessons": -1 }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
