//! Handlers for the `/courses` resource.
//!
//! The catalog listing is public; enrollment and progress require
//! authentication.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::json;
use skilltrack_core::error::CoreError;
use skilltrack_core::types::DbId;
use skilltrack_db::models::course::UpdateCourseProgress;
use skilltrack_db::repositories::{CourseRepo, UserCourseRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::xp::{award_xp, AwardSummary, AwardTarget};

/// Payload returned by a progress update.
#[derive(Debug, Serialize)]
pub struct ProgressData {
    pub progress: i32,
    /// Present when this update completed the course and granted XP.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub award: Option<AwardSummary>,
}

/// GET /api/courses
///
/// List the course catalog (public).
pub async fn list_courses(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<ApiResponse<serde_json::Value>>)> {
    let courses = CourseRepo::list_all(&state.pool).await?;

    Ok(ApiResponse::ok(
        format!("Found {} courses", courses.len()),
        json!({ "courses": courses }),
    ))
}

/// GET /api/courses/user
///
/// List the courses the authenticated user is enrolled in.
pub async fn list_user_courses(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<ApiResponse<serde_json::Value>>)> {
    let courses = UserCourseRepo::list_enrolled(&state.pool, auth.user_id).await?;

    Ok(ApiResponse::ok(
        format!("Found {} enrolled courses", courses.len()),
        json!({ "courses": courses }),
    ))
}

/// POST /api/courses/{id}/enroll
///
/// Enroll the authenticated user in a catalog course. 404 if the course
/// does not exist, 400 if already enrolled.
pub async fn enroll(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
) -> AppResult<(StatusCode, Json<ApiResponse<()>>)> {
    let course = CourseRepo::find_by_id(&state.pool, course_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Course",
            id: course_id,
        })?;

    let existing = UserCourseRepo::find_enrollment(&state.pool, auth.user_id, course.id).await?;
    if existing.is_some() {
        return Err(AppError::Core(CoreError::Validation(
            "Already enrolled in this course".into(),
        )));
    }

    UserCourseRepo::enroll(&state.pool, auth.user_id, course.id).await?;

    Ok(ApiResponse::created("Enrolled successfully", ()))
}

/// PUT /api/courses/{id}/progress
///
/// Update lesson progress. When progress reaches 100% the course's
/// one-time XP reward is granted through the award pipeline; a second
/// completion attempt fails with 400.
pub async fn update_progress(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
    Json(input): Json<UpdateCourseProgress>,
) -> AppResult<(StatusCode, Json<ApiResponse<ProgressData>>)> {
    if input.completed_lessons < 0 {
        return Err(AppError::Core(CoreError::Validation(
            "completed_lessons must be non-negative".into(),
        )));
    }

    let course = CourseRepo::find_by_id(&state.pool, course_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Course",
            id: course_id,
        })?;

    let enrollment = UserCourseRepo::find_enrollment(&state.pool, auth.user_id, course.id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Course enrollment",
            id: course_id,
        })?;

    let progress =
        ((input.completed_lessons as i64 * 100) / course.total_lessons.max(1) as i64).min(100) as i32;

    UserCourseRepo::update_lessons(
        &state.pool,
        auth.user_id,
        course.id,
        input.completed_lessons,
        progress,
    )
    .await?;

    // Reaching 100% grants the one-time reward; the pipeline re-checks the
    // completion flag under a row lock, so concurrent updates cannot grant
    // it twice. The `completed` flag read above may be stale by the time the
    // pipeline runs, so losing that race is not a client error: the loser
    // gets a successful update with no award.
    let award = if progress >= 100 && !enrollment.completed {
        match award_xp(&state.pool, auth.user_id, AwardTarget::Course { course_id }).await {
            Ok(summary) => Some(summary),
            Err(AppError::Core(CoreError::AlreadyCompleted { .. })) => None,
            Err(err) => return Err(err),
        }
    } else {
        None
    };

    Ok(ApiResponse::ok(
        "Progress updated",
        ProgressData { progress, award },
    ))
}
