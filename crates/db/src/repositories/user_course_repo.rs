//! Repository for the `user_courses` enrollment table.

use sqlx::{PgConnection, PgPool};
use skilltrack_core::types::DbId;

use crate::models::course::{EnrolledCourse, UserCourse};

/// Column list for `user_courses` queries.
const COLUMNS: &str = "id, user_id, course_id, progress, completed_lessons, completed, \
                        completed_at, started_at, updated_at";

/// Provides enrollment and progress operations for user courses.
pub struct UserCourseRepo;

impl UserCourseRepo {
    /// Enroll a user in a course, returning the created row.
    pub async fn enroll(
        pool: &PgPool,
        user_id: DbId,
        course_id: DbId,
    ) -> Result<UserCourse, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_courses (user_id, course_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserCourse>(&query)
            .bind(user_id)
            .bind(course_id)
            .fetch_one(pool)
            .await
    }

    /// Find a user's enrollment in a course.
    pub async fn find_enrollment(
        pool: &PgPool,
        user_id: DbId,
        course_id: DbId,
    ) -> Result<Option<UserCourse>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM user_courses WHERE user_id = $1 AND course_id = $2");
        sqlx::query_as::<_, UserCourse>(&query)
            .bind(user_id)
            .bind(course_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's enrollments joined with their catalog courses.
    pub async fn list_enrolled(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<EnrolledCourse>, sqlx::Error> {
        sqlx::query_as::<_, EnrolledCourse>(
            "SELECT c.id, c.title, c.category, c.total_lessons, c.xp_reward, c.thumbnail, \
                    uc.progress, uc.completed_lessons, uc.completed \
             FROM user_courses uc \
             JOIN courses c ON c.id = uc.course_id \
             WHERE uc.user_id = $1 \
             ORDER BY uc.started_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Count a user's enrollments.
    pub async fn count_for_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM user_courses WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Update lesson count and derived progress percentage.
    pub async fn update_lessons(
        pool: &PgPool,
        user_id: DbId,
        course_id: DbId,
        completed_lessons: i32,
        progress: i32,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_courses \
             SET completed_lessons = $3, progress = $4, updated_at = NOW() \
             WHERE user_id = $1 AND course_id = $2",
        )
        .bind(user_id)
        .bind(course_id)
        .bind(completed_lessons)
        .bind(progress)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Load an enrollment row with a row lock, scoped to its owner.
    ///
    /// Used by the award pipeline so a course reward is granted exactly once
    /// even under concurrent progress updates.
    pub async fn find_for_update(
        conn: &mut PgConnection,
        user_id: DbId,
        course_id: DbId,
    ) -> Result<Option<UserCourse>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_courses \
             WHERE user_id = $1 AND course_id = $2 FOR UPDATE"
        );
        sqlx::query_as::<_, UserCourse>(&query)
            .bind(user_id)
            .bind(course_id)
            .fetch_optional(conn)
            .await
    }

    /// Mark an enrollment completed, recording the completion time.
    pub async fn mark_completed(conn: &mut PgConnection, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE user_courses \
             SET completed = TRUE, completed_at = NOW(), progress = 100, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .execute(conn)
        .await?;
        Ok(())
    }
}
