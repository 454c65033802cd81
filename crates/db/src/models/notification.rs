//! Notification entity model.

use serde::Serialize;
use sqlx::FromRow;
use skilltrack_core::types::{DbId, Timestamp};

/// A row from the `notifications` table.
///
/// Append-only: rows are inserted by the award pipeline and only ever
/// mutated by the mark-read endpoints.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    pub kind: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}
