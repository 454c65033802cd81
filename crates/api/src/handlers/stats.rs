//! Handlers for the `/stats` dashboard endpoints.
//!
//! All endpoints require authentication via [`AuthUser`].

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{Duration, Utc};
use serde::Deserialize;
use serde_json::json;
use skilltrack_core::error::CoreError;
use skilltrack_core::leveling::xp_for_next_level;
use skilltrack_db::repositories::{
    AchievementRepo, SkillRepo, UserCourseRepo, UserRepo, XpHistoryRepo,
};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Default window for the XP history endpoint, in days.
const DEFAULT_HISTORY_DAYS: i64 = 30;

/// Query parameters for `GET /api/stats/xp-history`.
#[derive(Debug, Deserialize)]
pub struct XpHistoryQuery {
    pub days: Option<i64>,
}

/// GET /api/stats/overview
///
/// Aggregate dashboard numbers: XP, level, streaks, entity counts, and
/// earned achievements.
pub async fn overview(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<ApiResponse<serde_json::Value>>)> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        })?;

    let skills_count = SkillRepo::count_for_user(&state.pool, auth.user_id).await?;
    let courses_count = UserCourseRepo::count_for_user(&state.pool, auth.user_id).await?;
    let achievements = AchievementRepo::earned_for_user(&state.pool, auth.user_id).await?;

    Ok(ApiResponse::ok(
        "Stats retrieved",
        json!({
            "total_xp": user.total_xp,
            "level": user.level,
            "xp_for_next_level": xp_for_next_level(user.level),
            "current_streak": user.current_streak,
            "longest_streak": user.longest_streak,
            "skills_count": skills_count,
            "courses_count": courses_count,
            "achievements": achievements,
        }),
    ))
}

/// GET /api/stats/skills-by-category
///
/// Skills grouped by category with per-category level totals, for the
/// dashboard chart.
pub async fn skills_by_category(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<ApiResponse<serde_json::Value>>)> {
    let categories = SkillRepo::category_summary(&state.pool, auth.user_id).await?;

    Ok(ApiResponse::ok(
        "Category stats retrieved",
        json!({ "categories": categories }),
    ))
}

/// GET /api/stats/xp-history?days=N
///
/// XP history entries in the last N days (default 30), oldest first.
pub async fn xp_history(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<XpHistoryQuery>,
) -> AppResult<(StatusCode, Json<ApiResponse<serde_json::Value>>)> {
    let days = query.days.unwrap_or(DEFAULT_HISTORY_DAYS);
    if days <= 0 {
        return Err(AppError::Core(CoreError::Validation(
            "days must be positive".into(),
        )));
    }

    let since = Utc::now() - Duration::days(days);
    let history = XpHistoryRepo::list_since(&state.pool, auth.user_id, since).await?;

    Ok(ApiResponse::ok(
        format!("Found {} history entries", history.len()),
        json!({ "history": history }),
    ))
}
