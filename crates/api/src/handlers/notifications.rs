//! Handlers for the `/notifications` resource.
//!
//! All endpoints require authentication via [`AuthUser`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use skilltrack_core::error::CoreError;
use skilltrack_core::types::DbId;
use skilltrack_db::repositories::NotificationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/notifications
///
/// List the authenticated user's latest notifications (newest first,
/// capped at 50).
pub async fn list_notifications(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<ApiResponse<serde_json::Value>>)> {
    let notifications = NotificationRepo::list_for_user(&state.pool, auth.user_id).await?;

    Ok(ApiResponse::ok(
        format!("Found {} notifications", notifications.len()),
        json!({ "notifications": notifications }),
    ))
}

/// PUT /api/notifications/{id}/read
///
/// Mark a single notification as read. 404 if it does not belong to the
/// authenticated user.
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(notification_id): Path<DbId>,
) -> AppResult<(StatusCode, Json<ApiResponse<()>>)> {
    let found = NotificationRepo::mark_read(&state.pool, notification_id, auth.user_id).await?;

    if !found {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id: notification_id,
        }));
    }

    Ok(ApiResponse::message("Marked as read"))
}

/// PUT /api/notifications/read-all
///
/// Mark all of the authenticated user's notifications as read.
pub async fn mark_all_read(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<ApiResponse<()>>)> {
    let count = NotificationRepo::mark_all_read(&state.pool, auth.user_id).await?;

    Ok(ApiResponse::message(format!(
        "Marked {count} notifications as read"
    )))
}
