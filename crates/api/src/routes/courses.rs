//! Route definitions for the `/courses` resource.
//!
//! The catalog listing is public; the rest require authentication.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::courses;
use crate::state::AppState;

/// Routes mounted at `/courses`.
///
/// ```text
/// GET    /                -> list_courses (public)
/// GET    /user            -> list_user_courses
/// POST   /{id}/enroll     -> enroll
/// PUT    /{id}/progress   -> update_progress
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(courses::list_courses))
        .route("/user", get(courses::list_user_courses))
        .route("/{id}/enroll", post(courses::enroll))
        .route("/{id}/progress", put(courses::update_progress))
}
