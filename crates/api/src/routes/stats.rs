//! Route definitions for the `/stats` dashboard endpoints.
//!
//! All endpoints require authentication.

use axum::routing::get;
use axum::Router;

use crate::handlers::stats;
use crate::state::AppState;

/// Routes mounted at `/stats`.
///
/// ```text
/// GET    /overview             -> overview
/// GET    /skills-by-category   -> skills_by_category
/// GET    /xp-history           -> xp_history (?days=N, default 30)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/overview", get(stats::overview))
        .route("/skills-by-category", get(stats::skills_by_category))
        .route("/xp-history", get(stats::xp_history))
}
