//! Handlers for the `/roadmaps` resource.
//!
//! All endpoints require authentication via [`AuthUser`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::json;
use skilltrack_core::types::DbId;
use skilltrack_db::models::roadmap::RoadmapWithSteps;
use skilltrack_db::repositories::{RoadmapRepo, RoadmapStepRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::xp::{award_xp, AwardTarget};

/// Payload returned by completing a step.
#[derive(Debug, Serialize)]
pub struct CompleteStepData {
    pub user: serde_json::Value,
    pub xp_gained: i64,
}

/// GET /api/roadmaps
///
/// List the authenticated user's roadmaps with their steps ordered by
/// position.
pub async fn list_roadmaps(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<ApiResponse<serde_json::Value>>)> {
    let roadmaps = RoadmapRepo::list_for_user(&state.pool, auth.user_id).await?;

    let mut result = Vec::with_capacity(roadmaps.len());
    for roadmap in roadmaps {
        let steps = RoadmapStepRepo::list_for_roadmap(&state.pool, roadmap.id, auth.user_id).await?;
        result.push(RoadmapWithSteps { roadmap, steps });
    }

    Ok(ApiResponse::ok(
        format!("Found {} roadmaps", result.len()),
        json!({ "roadmaps": result }),
    ))
}

/// PUT /api/roadmaps/{roadmap_id}/steps/{step_id}/complete
///
/// Complete a roadmap step and collect its one-time XP reward via the
/// award pipeline. 404 for unknown/unowned steps, 400 if already completed.
pub async fn complete_step(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((_roadmap_id, step_id)): Path<(DbId, DbId)>,
) -> AppResult<(StatusCode, Json<ApiResponse<CompleteStepData>>)> {
    let summary = award_xp(&state.pool, auth.user_id, AwardTarget::RoadmapStep { step_id }).await?;

    Ok(ApiResponse::ok(
        "Step completed!",
        CompleteStepData {
            user: json!({
                "total_xp": summary.new_total_xp,
                "level": summary.new_level,
            }),
            xp_gained: summary.amount,
        },
    ))
}
