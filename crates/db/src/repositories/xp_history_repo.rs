//! Repository for the append-only `xp_history` table.

use sqlx::{PgConnection, PgPool};
use skilltrack_core::types::{DbId, Timestamp};

use crate::models::xp_history::XpHistoryEntry;

/// Column list for `xp_history` queries.
const COLUMNS: &str = "id, user_id, amount, source_type, source_id, description, created_at";

/// Provides append and range-read operations for XP history.
pub struct XpHistoryRepo;

impl XpHistoryRepo {
    /// Append an XP history entry, returning the generated ID.
    ///
    /// Runs on a transaction connection; the award pipeline writes this row
    /// last since the entry is purely informational.
    pub async fn create(
        conn: &mut PgConnection,
        user_id: DbId,
        amount: i64,
        source_type: &str,
        source_id: DbId,
        description: &str,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO xp_history (user_id, amount, source_type, source_id, description) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id",
        )
        .bind(user_id)
        .bind(amount)
        .bind(source_type)
        .bind(source_id)
        .bind(description)
        .fetch_one(conn)
        .await
    }

    /// List a user's XP history entries since a cutoff, oldest first.
    pub async fn list_since(
        pool: &PgPool,
        user_id: DbId,
        since: Timestamp,
    ) -> Result<Vec<XpHistoryEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM xp_history \
             WHERE user_id = $1 AND created_at >= $2 \
             ORDER BY created_at"
        );
        sqlx::query_as::<_, XpHistoryEntry>(&query)
            .bind(user_id)
            .bind(since)
            .fetch_all(pool)
            .await
    }

    /// Count a user's history entries. Used by tests to assert append-only
    /// behaviour.
    pub async fn count_for_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM xp_history WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }
}
