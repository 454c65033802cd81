//! XP history entity model.

use serde::Serialize;
use sqlx::FromRow;
use skilltrack_core::types::{DbId, Timestamp};

/// A row from the `xp_history` table. Append-only, never mutated.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct XpHistoryEntry {
    pub id: DbId,
    pub user_id: DbId,
    pub amount: i64,
    pub source_type: String,
    pub source_id: DbId,
    pub description: String,
    pub created_at: Timestamp,
}
