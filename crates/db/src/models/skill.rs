//! Skill entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use skilltrack_core::types::{DbId, Timestamp};

/// A row from the `skills` table.
///
/// Invariant maintained by the award pipeline: `xp < max_xp` after every
/// practice (overflow rolls into level increments).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Skill {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub category: String,
    pub color: String,
    pub xp: i64,
    pub max_xp: i64,
    pub level: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new skill.
#[derive(Debug, Deserialize)]
pub struct CreateSkill {
    pub name: String,
    pub category: String,
    pub color: Option<String>,
}

/// Per-category skill aggregate returned by the stats endpoints.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategorySummary {
    pub category: String,
    pub total_level: i64,
    pub count: i64,
}
