//! Repository for the `users` table.

use sqlx::{PgConnection, PgPool};
use skilltrack_core::types::DbId;

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, password_hash, total_xp, level, \
                        current_streak, longest_streak, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// New users start at `total_xp = 0`, `level = 1` via column defaults.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, password_hash)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (stored lowercased).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Atomically add `amount` to a user's total XP, returning the new total.
    ///
    /// The increment happens server-side so two concurrent awards for the
    /// same user never read the same stale total and overwrite each other.
    /// Runs on a transaction connection so it commits together with the rest
    /// of an award.
    pub async fn add_xp(
        conn: &mut PgConnection,
        id: DbId,
        amount: i64,
    ) -> Result<Option<i64>, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE users SET total_xp = total_xp + $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING total_xp",
        )
        .bind(id)
        .bind(amount)
        .fetch_optional(conn)
        .await
    }

    /// Persist the derived user level.
    pub async fn set_level(
        conn: &mut PgConnection,
        id: DbId,
        level: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET level = $2 WHERE id = $1")
            .bind(id)
            .bind(level)
            .execute(conn)
            .await?;
        Ok(())
    }
}
