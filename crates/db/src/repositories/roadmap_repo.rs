//! Repositories for the `roadmaps` and `roadmap_steps` tables.

use sqlx::{PgConnection, PgPool};
use skilltrack_core::types::DbId;

use crate::models::roadmap::{Roadmap, RoadmapStep};

/// Column list for `roadmaps` queries.
const ROADMAP_COLUMNS: &str = "id, user_id, title, created_at";

/// Column list for `roadmap_steps` queries.
const STEP_COLUMNS: &str =
    "id, roadmap_id, user_id, title, xp_reward, position, completed, completed_at";

/// Provides CRUD operations for roadmaps.
pub struct RoadmapRepo;

impl RoadmapRepo {
    /// Insert a roadmap for a user, returning the created row.
    pub async fn create(pool: &PgPool, user_id: DbId, title: &str) -> Result<Roadmap, sqlx::Error> {
        let query = format!(
            "INSERT INTO roadmaps (user_id, title) VALUES ($1, $2) RETURNING {ROADMAP_COLUMNS}"
        );
        sqlx::query_as::<_, Roadmap>(&query)
            .bind(user_id)
            .bind(title)
            .fetch_one(pool)
            .await
    }

    /// List a user's roadmaps.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Roadmap>, sqlx::Error> {
        let query = format!(
            "SELECT {ROADMAP_COLUMNS} FROM roadmaps WHERE user_id = $1 ORDER BY created_at"
        );
        sqlx::query_as::<_, Roadmap>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}

/// Provides operations for roadmap steps.
pub struct RoadmapStepRepo;

impl RoadmapStepRepo {
    /// Insert a step into a roadmap, returning the created row.
    pub async fn create(
        pool: &PgPool,
        roadmap_id: DbId,
        user_id: DbId,
        title: &str,
        xp_reward: i64,
        position: i32,
    ) -> Result<RoadmapStep, sqlx::Error> {
        let query = format!(
            "INSERT INTO roadmap_steps (roadmap_id, user_id, title, xp_reward, position)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {STEP_COLUMNS}"
        );
        sqlx::query_as::<_, RoadmapStep>(&query)
            .bind(roadmap_id)
            .bind(user_id)
            .bind(title)
            .bind(xp_reward)
            .bind(position)
            .fetch_one(pool)
            .await
    }

    /// List a roadmap's steps ordered by position.
    pub async fn list_for_roadmap(
        pool: &PgPool,
        roadmap_id: DbId,
        user_id: DbId,
    ) -> Result<Vec<RoadmapStep>, sqlx::Error> {
        let query = format!(
            "SELECT {STEP_COLUMNS} FROM roadmap_steps \
             WHERE roadmap_id = $1 AND user_id = $2 \
             ORDER BY position"
        );
        sqlx::query_as::<_, RoadmapStep>(&query)
            .bind(roadmap_id)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Load a step row with a row lock, scoped to its owner.
    ///
    /// Used by the award pipeline so a step's one-time reward cannot be
    /// collected twice by concurrent completions.
    pub async fn find_for_update(
        conn: &mut PgConnection,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<RoadmapStep>, sqlx::Error> {
        let query = format!(
            "SELECT {STEP_COLUMNS} FROM roadmap_steps \
             WHERE id = $1 AND user_id = $2 FOR UPDATE"
        );
        sqlx::query_as::<_, RoadmapStep>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(conn)
            .await
    }

    /// Mark a step completed, recording the completion time.
    pub async fn mark_completed(conn: &mut PgConnection, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE roadmap_steps SET completed = TRUE, completed_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(conn)
        .await?;
        Ok(())
    }
}
