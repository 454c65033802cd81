//! Repository for the `courses` catalog table.

use sqlx::{PgConnection, PgPool};
use skilltrack_core::types::DbId;

use crate::models::course::Course;

/// Column list for `courses` queries.
const COLUMNS: &str = "id, title, category, total_lessons, xp_reward, thumbnail, created_at";

/// Provides read access to the course catalog.
pub struct CourseRepo;

impl CourseRepo {
    /// List all catalog courses.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses ORDER BY id");
        sqlx::query_as::<_, Course>(&query).fetch_all(pool).await
    }

    /// Find a catalog course by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a catalog course by ID on an existing connection.
    ///
    /// Runs on a transaction connection: the award pipeline reads the
    /// catalog row inside the award transaction instead of acquiring a
    /// second pool connection while the first is held.
    pub async fn find_by_id_tx(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Insert a catalog course, returning the created row. Used by seeding
    /// and test fixtures; there is no public create endpoint.
    pub async fn create(
        pool: &PgPool,
        title: &str,
        category: &str,
        total_lessons: i32,
        xp_reward: i64,
    ) -> Result<Course, sqlx::Error> {
        let query = format!(
            "INSERT INTO courses (title, category, total_lessons, xp_reward)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(title)
            .bind(category)
            .bind(total_lessons)
            .bind(xp_reward)
            .fetch_one(pool)
            .await
    }
}
