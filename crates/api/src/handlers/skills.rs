//! Handlers for the `/skills` resource.
//!
//! All endpoints require authentication via [`AuthUser`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use skilltrack_core::error::CoreError;
use skilltrack_core::types::DbId;
use skilltrack_db::models::skill::{CreateSkill, Skill};
use skilltrack_db::repositories::SkillRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::xp::{award_xp, AwardTarget};

/// XP granted by a practice when the request does not specify an amount.
const DEFAULT_PRACTICE_XP: i64 = 50;

/// Request body for `POST /api/skills/{id}/practice`.
#[derive(Debug, Deserialize)]
pub struct PracticeRequest {
    /// XP to grant; defaults to 50.
    pub xp: Option<i64>,
}

/// Payload returned by a successful practice.
#[derive(Debug, Serialize)]
pub struct PracticeData {
    pub skill: Skill,
    pub user: serde_json::Value,
    pub leveled_up: bool,
    pub user_leveled_up: bool,
}

/// GET /api/skills
///
/// List the authenticated user's skills.
pub async fn list_skills(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<ApiResponse<serde_json::Value>>)> {
    let skills = SkillRepo::list_for_user(&state.pool, auth.user_id).await?;

    Ok(ApiResponse::ok(
        format!("Found {} skills", skills.len()),
        json!({ "skills": skills }),
    ))
}

/// POST /api/skills
///
/// Create a new skill for the authenticated user. Name and category are
/// required.
pub async fn create_skill(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateSkill>,
) -> AppResult<(StatusCode, Json<ApiResponse<serde_json::Value>>)> {
    if input.name.trim().is_empty() || input.category.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Name and category are required".into(),
        )));
    }

    let skill = SkillRepo::create(&state.pool, auth.user_id, &input).await?;

    Ok(ApiResponse::created(
        "Skill created successfully",
        json!({ "skill": skill }),
    ))
}

/// DELETE /api/skills/{id}
///
/// Delete a skill owned by the authenticated user. 404 if it does not
/// exist or belongs to someone else.
pub async fn delete_skill(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(skill_id): Path<DbId>,
) -> AppResult<(StatusCode, Json<ApiResponse<()>>)> {
    let deleted = SkillRepo::delete(&state.pool, skill_id, auth.user_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Skill",
            id: skill_id,
        }));
    }

    Ok(ApiResponse::message("Skill deleted successfully"))
}

/// POST /api/skills/{id}/practice
///
/// Add XP to a skill via the award pipeline (handles skill leveling, user
/// totals, notifications, and history in one transaction).
pub async fn practice_skill(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(skill_id): Path<DbId>,
    Json(input): Json<PracticeRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<PracticeData>>)> {
    let gain = input.xp.unwrap_or(DEFAULT_PRACTICE_XP);

    let summary = award_xp(&state.pool, auth.user_id, AwardTarget::Skill { skill_id, gain }).await?;

    // The pipeline always returns the updated skill row for skill targets.
    let skill = summary.skill.ok_or_else(|| {
        AppError::InternalError("Award pipeline returned no skill for a skill target".into())
    })?;

    Ok(ApiResponse::ok(
        "XP added successfully",
        PracticeData {
            skill,
            user: json!({
                "total_xp": summary.new_total_xp,
                "level": summary.new_level,
            }),
            leveled_up: summary.resource_leveled_up.unwrap_or(false),
            user_leveled_up: summary.user_leveled_up,
        },
    ))
}
