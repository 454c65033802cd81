//! Course catalog and enrollment models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use skilltrack_core::types::{DbId, Timestamp};

/// A row from the `courses` catalog table. Not user-owned.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: DbId,
    pub title: String,
    pub category: String,
    pub total_lessons: i32,
    pub xp_reward: i64,
    pub thumbnail: String,
    pub created_at: Timestamp,
}

/// A row from the `user_courses` table: one user's enrollment in a course.
///
/// `completed` is monotonic (false -> true, never reversed); the XP reward
/// is granted exactly once, when progress first reaches 100%.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserCourse {
    pub id: DbId,
    pub user_id: DbId,
    pub course_id: DbId,
    pub progress: i32,
    pub completed_lessons: i32,
    pub completed: bool,
    pub completed_at: Option<Timestamp>,
    pub started_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Enrollment joined with its catalog course, for listing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EnrolledCourse {
    pub id: DbId,
    pub title: String,
    pub category: String,
    pub total_lessons: i32,
    pub xp_reward: i64,
    pub thumbnail: String,
    pub progress: i32,
    pub completed_lessons: i32,
    pub completed: bool,
}

/// Request body for `PUT /api/courses/{id}/progress`.
#[derive(Debug, Deserialize)]
pub struct UpdateCourseProgress {
    pub completed_lessons: i32,
}
