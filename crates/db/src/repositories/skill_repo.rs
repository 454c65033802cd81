//! Repository for the `skills` table.

use sqlx::{PgConnection, PgPool};
use skilltrack_core::types::DbId;

use crate::models::skill::{CategorySummary, CreateSkill, Skill};

/// Column list for `skills` queries.
const COLUMNS: &str = "id, user_id, name, category, color, xp, max_xp, level, \
                        created_at, updated_at";

/// Default color assigned when a skill is created without one.
const DEFAULT_COLOR: &str = "#667eea";

/// Provides CRUD operations for skills.
pub struct SkillRepo;

impl SkillRepo {
    /// Insert a new skill for a user, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateSkill,
    ) -> Result<Skill, sqlx::Error> {
        let query = format!(
            "INSERT INTO skills (user_id, name, category, color)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Skill>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.category)
            .bind(input.color.as_deref().unwrap_or(DEFAULT_COLOR))
            .fetch_one(pool)
            .await
    }

    /// List a user's skills, most recently created first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Skill>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM skills WHERE user_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Skill>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a skill, scoped to its owner. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM skills WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count a user's skills.
    pub async fn count_for_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM skills WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Load a skill row with a row lock, scoped to its owner.
    ///
    /// Used by the award pipeline: the `FOR UPDATE` lock serializes
    /// concurrent practices of the same skill.
    pub async fn find_for_update(
        conn: &mut PgConnection,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Skill>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM skills WHERE id = $1 AND user_id = $2 FOR UPDATE");
        sqlx::query_as::<_, Skill>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(conn)
            .await
    }

    /// Persist normalized XP and level after a practice.
    pub async fn update_progress(
        conn: &mut PgConnection,
        id: DbId,
        xp: i64,
        level: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE skills SET xp = $2, level = $3, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(xp)
            .bind(level)
            .execute(conn)
            .await?;
        Ok(())
    }

    /// Group a user's skills by category with level totals.
    pub async fn category_summary(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<CategorySummary>, sqlx::Error> {
        sqlx::query_as::<_, CategorySummary>(
            "SELECT category, SUM(level)::BIGINT AS total_level, COUNT(*) AS count \
             FROM skills WHERE user_id = $1 \
             GROUP BY category \
             ORDER BY category",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
