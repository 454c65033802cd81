pub mod auth;
pub mod courses;
pub mod health;
pub mod notifications;
pub mod roadmaps;
pub mod skills;
pub mod stats;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                                     signup (public)
/// /auth/signin                                     signin (public)
/// /auth/me                                         current user (requires auth)
///
/// /skills                                          list, create
/// /skills/{id}                                     delete
/// /skills/{id}/practice                            add XP (POST)
///
/// /courses                                         catalog (public)
/// /courses/user                                    enrolled courses
/// /courses/{id}/enroll                             enroll (POST)
/// /courses/{id}/progress                           update progress (PUT)
///
/// /roadmaps                                        list with steps
/// /roadmaps/{roadmap_id}/steps/{step_id}/complete  complete step (PUT)
///
/// /notifications                                   list latest 50
/// /notifications/read-all                          mark all read (PUT)
/// /notifications/{id}/read                         mark read (PUT)
///
/// /stats/overview                                  dashboard totals
/// /stats/skills-by-category                        category chart data
/// /stats/xp-history                                XP history (?days=N)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/skills", skills::router())
        .nest("/courses", courses::router())
        .nest("/roadmaps", roadmaps::router())
        .nest("/notifications", notifications::router())
        .nest("/stats", stats::router())
}
