//! The XP award pipeline.
//!
//! One invocation grants one XP event end-to-end, inside a single database
//! transaction:
//!
//! 1. Lock and load the target sub-resource, scoped by owner (`FOR UPDATE`).
//! 2. Validate: one-time targets must not already be completed; skill gains
//!    go through XP normalization. Both happen before any write.
//! 3. Persist the sub-resource update.
//! 4. Atomically roll the amount into the user's `total_xp` and re-derive
//!    the stored `level` via the leveling function.
//! 5. Append notifications for level-ups / completions.
//! 6. Append the XP history entry last -- it is purely informational, so it
//!    is the safest write to lose if the transaction must be retried.
//!
//! The row lock plus the server-side `total_xp = total_xp + $n` increment
//! make concurrent awards for the same user lose no updates; awards for
//! different users never contend.

use serde::Serialize;
use skilltrack_core::error::CoreError;
use skilltrack_core::leveling::level_for;
use skilltrack_core::progress::{apply_skill_gain, SourceType};
use skilltrack_core::types::DbId;
use skilltrack_db::models::skill::Skill;
use skilltrack_db::repositories::{
    CourseRepo, NotificationRepo, RoadmapStepRepo, SkillRepo, UserCourseRepo, UserRepo,
    XpHistoryRepo,
};
use skilltrack_db::DbPool;

use crate::error::AppResult;

/// Notification kind for skill and user level-ups.
const KIND_LEVELUP: &str = "levelup";
/// Notification kind for completed roadmap steps.
const KIND_ACHIEVEMENT: &str = "achievement";
/// Notification kind for completed courses.
const KIND_COURSE: &str = "course";

/// The sub-resource an XP award is attributed to.
#[derive(Debug, Clone, Copy)]
pub enum AwardTarget {
    /// Repeatable: practicing a skill adds `gain` XP, rolling over into
    /// skill-level increments.
    Skill { skill_id: DbId, gain: i64 },
    /// One-time: completing a roadmap step grants its fixed reward.
    RoadmapStep { step_id: DbId },
    /// One-time: finishing a course grants the catalog course's reward.
    Course { course_id: DbId },
}

/// Summary returned by a successful award.
#[derive(Debug, Serialize)]
pub struct AwardSummary {
    /// XP granted by this award.
    pub amount: i64,
    pub new_total_xp: i64,
    pub new_level: i64,
    pub user_leveled_up: bool,
    /// For skills: whether the skill itself leveled up. Absent for
    /// one-time targets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_leveled_up: Option<bool>,
    /// The updated skill row, for skill awards.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill: Option<Skill>,
}

/// Grant one XP event to `user_id` for `target`.
///
/// Validation failures (`NotFound`, `AlreadyCompleted`, `InvalidConfig`)
/// abort before any write; the transaction makes the effects all-or-nothing.
/// The pipeline never retries internally -- a store failure propagates as a
/// 500 and the caller may retry the whole invocation.
pub async fn award_xp(
    pool: &DbPool,
    user_id: DbId,
    target: AwardTarget,
) -> AppResult<AwardSummary> {
    let mut tx = pool.begin().await?;

    // Steps 1-3: load, validate, and update the target sub-resource.
    // Collects the award amount, history fields, and any resource-level
    // notification to emit after the user totals are known.
    let resource = match target {
        AwardTarget::Skill { skill_id, gain } => {
            let skill = SkillRepo::find_for_update(&mut *tx, skill_id, user_id)
                .await?
                .ok_or(CoreError::NotFound {
                    entity: "Skill",
                    id: skill_id,
                })?;

            let outcome = apply_skill_gain(skill.xp, skill.level, skill.max_xp, gain)?;
            SkillRepo::update_progress(&mut *tx, skill.id, outcome.xp, outcome.level).await?;

            ResourceUpdate {
                amount: gain,
                source_type: SourceType::Skill,
                source_id: skill.id,
                description: format!("Practiced {}", skill.name),
                notification: outcome.leveled_up.then(|| {
                    (
                        KIND_LEVELUP,
                        format!(
                            "\u{1F389} {} leveled up to Level {}!",
                            skill.name, outcome.level
                        ),
                    )
                }),
                resource_leveled_up: Some(outcome.leveled_up),
                skill: Some(Skill {
                    xp: outcome.xp,
                    level: outcome.level,
                    ..skill
                }),
            }
        }

        AwardTarget::RoadmapStep { step_id } => {
            let step = RoadmapStepRepo::find_for_update(&mut *tx, step_id, user_id)
                .await?
                .ok_or(CoreError::NotFound {
                    entity: "Roadmap step",
                    id: step_id,
                })?;

            if step.completed {
                return Err(CoreError::AlreadyCompleted {
                    entity: "Roadmap step",
                    id: step_id,
                }
                .into());
            }
            RoadmapStepRepo::mark_completed(&mut *tx, step.id).await?;

            ResourceUpdate {
                amount: step.xp_reward,
                source_type: SourceType::Roadmap,
                source_id: step.id,
                description: format!("Completed roadmap step: {}", step.title),
                notification: Some((
                    KIND_ACHIEVEMENT,
                    format!(
                        "\u{2705} Completed: {} (+{} XP)",
                        step.title, step.xp_reward
                    ),
                )),
                resource_leveled_up: None,
                skill: None,
            }
        }

        AwardTarget::Course { course_id } => {
            let enrollment = UserCourseRepo::find_for_update(&mut *tx, user_id, course_id)
                .await?
                .ok_or(CoreError::NotFound {
                    entity: "Course enrollment",
                    id: course_id,
                })?;

            if enrollment.completed {
                return Err(CoreError::AlreadyCompleted {
                    entity: "Course",
                    id: course_id,
                }
                .into());
            }

            let course = CourseRepo::find_by_id_tx(&mut *tx, course_id)
                .await?
                .ok_or(CoreError::NotFound {
                    entity: "Course",
                    id: course_id,
                })?;

            UserCourseRepo::mark_completed(&mut *tx, enrollment.id).await?;

            ResourceUpdate {
                amount: course.xp_reward,
                source_type: SourceType::Course,
                source_id: course.id,
                description: format!("Completed course: {}", course.title),
                notification: Some((
                    KIND_COURSE,
                    format!(
                        "\u{1F393} Congratulations! You completed {}! (+{} XP)",
                        course.title, course.xp_reward
                    ),
                )),
                resource_leveled_up: None,
                skill: None,
            }
        }
    };

    // Step 4: atomic increment of the user's total, then re-derive the level.
    let new_total_xp = UserRepo::add_xp(&mut *tx, user_id, resource.amount)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: user_id,
        })?;

    let previous_level = level_for(new_total_xp - resource.amount);
    let new_level = level_for(new_total_xp);
    UserRepo::set_level(&mut *tx, user_id, new_level).await?;

    let user_leveled_up = new_level > previous_level;

    // Step 5: notifications for the resource event and the user level-up.
    if let Some((kind, message)) = &resource.notification {
        NotificationRepo::create(&mut *tx, user_id, kind, message).await?;
    }
    if user_leveled_up {
        let message = format!("\u{2B50} Level up! You reached Level {new_level}!");
        NotificationRepo::create(&mut *tx, user_id, KIND_LEVELUP, &message).await?;
    }

    // Step 6: the history entry is written last.
    XpHistoryRepo::create(
        &mut *tx,
        user_id,
        resource.amount,
        resource.source_type.as_str(),
        resource.source_id,
        &resource.description,
    )
    .await?;

    tx.commit().await?;

    tracing::debug!(
        user_id,
        amount = resource.amount,
        source = resource.source_type.as_str(),
        new_total_xp,
        new_level,
        user_leveled_up,
        "XP awarded"
    );

    Ok(AwardSummary {
        amount: resource.amount,
        new_total_xp,
        new_level,
        user_leveled_up,
        resource_leveled_up: resource.resource_leveled_up,
        skill: resource.skill,
    })
}

/// Outcome of the target-specific phase of the pipeline.
struct ResourceUpdate {
    amount: i64,
    source_type: SourceType,
    source_id: DbId,
    description: String,
    /// Resource-level notification (kind, message), if the event warrants one.
    notification: Option<(&'static str, String)>,
    resource_leveled_up: Option<bool>,
    skill: Option<Skill>,
}
