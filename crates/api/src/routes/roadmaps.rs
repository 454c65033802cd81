//! Route definitions for the `/roadmaps` resource.
//!
//! All endpoints require authentication.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::roadmaps;
use crate::state::AppState;

/// Routes mounted at `/roadmaps`.
///
/// ```text
/// GET    /                                        -> list_roadmaps
/// PUT    /{roadmap_id}/steps/{step_id}/complete   -> complete_step
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(roadmaps::list_roadmaps))
        .route(
            "/{roadmap_id}/steps/{step_id}/complete",
            put(roadmaps::complete_step),
        )
}
