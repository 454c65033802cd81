//! Route definitions for the `/skills` resource.
//!
//! All endpoints require authentication.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::skills;
use crate::state::AppState;

/// Routes mounted at `/skills`.
///
/// ```text
/// GET    /               -> list_skills
/// POST   /               -> create_skill
/// DELETE /{id}           -> delete_skill
/// POST   /{id}/practice  -> practice_skill
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(skills::list_skills).post(skills::create_skill))
        .route("/{id}", delete(skills::delete_skill))
        .route("/{id}/practice", post(skills::practice_skill))
}
