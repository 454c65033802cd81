//! Achievement catalog and earned-achievement models.

use serde::Serialize;
use sqlx::FromRow;
use skilltrack_core::types::{DbId, Timestamp};

/// A row from the `achievements` catalog table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Achievement {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub icon: String,
}

/// An achievement a user has earned, with the earn time.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EarnedAchievement {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub earned_at: Timestamp,
}
