//! Roadmap and roadmap-step models.

use serde::Serialize;
use sqlx::FromRow;
use skilltrack_core::types::{DbId, Timestamp};

/// A row from the `roadmaps` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Roadmap {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub created_at: Timestamp,
}

/// A row from the `roadmap_steps` table.
///
/// `completed` is monotonic; the step's XP reward is collectable once.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RoadmapStep {
    pub id: DbId,
    pub roadmap_id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub xp_reward: i64,
    pub position: i32,
    pub completed: bool,
    pub completed_at: Option<Timestamp>,
}

/// A roadmap with its steps ordered by position, for listing.
#[derive(Debug, Clone, Serialize)]
pub struct RoadmapWithSteps {
    #[serde(flatten)]
    pub roadmap: Roadmap,
    pub steps: Vec<RoadmapStep>,
}
