//! Repositories for the `achievements` catalog and earned records.

use sqlx::PgPool;
use skilltrack_core::types::DbId;

use crate::models::achievement::{Achievement, EarnedAchievement};

/// Provides catalog and earned-record operations for achievements.
pub struct AchievementRepo;

impl AchievementRepo {
    /// Insert a catalog achievement. Used by seeding and test fixtures.
    pub async fn create(
        pool: &PgPool,
        title: &str,
        description: &str,
        icon: &str,
    ) -> Result<Achievement, sqlx::Error> {
        sqlx::query_as::<_, Achievement>(
            "INSERT INTO achievements (title, description, icon) \
             VALUES ($1, $2, $3) \
             RETURNING id, title, description, icon",
        )
        .bind(title)
        .bind(description)
        .bind(icon)
        .fetch_one(pool)
        .await
    }

    /// Record that a user earned an achievement.
    pub async fn grant(
        pool: &PgPool,
        user_id: DbId,
        achievement_id: DbId,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO user_achievements (user_id, achievement_id) \
             VALUES ($1, $2) \
             RETURNING id",
        )
        .bind(user_id)
        .bind(achievement_id)
        .fetch_one(pool)
        .await
    }

    /// List the achievements a user has earned, most recent first.
    pub async fn earned_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<EarnedAchievement>, sqlx::Error> {
        sqlx::query_as::<_, EarnedAchievement>(
            "SELECT a.id, a.title, a.description, a.icon, ua.earned_at \
             FROM user_achievements ua \
             JOIN achievements a ON a.id = ua.achievement_id \
             WHERE ua.user_id = $1 \
             ORDER BY ua.earned_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
