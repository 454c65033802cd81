//! Skill XP normalization.
//!
//! Skills are repeatable resources: practicing one adds XP which rolls over
//! into per-skill level increments whenever the accumulated XP reaches the
//! skill's `max_xp` threshold. A single large gain may advance several
//! levels at once.

use serde::Serialize;

use crate::error::CoreError;

/// Award source kinds recorded in XP history and used to pick the
/// notification wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Skill,
    Roadmap,
    Course,
}

impl SourceType {
    /// Stable string form stored in the `xp_history.source_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Skill => "skill",
            SourceType::Roadmap => "roadmap",
            SourceType::Course => "course",
        }
    }
}

/// Result of applying an XP gain to a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillGainOutcome {
    /// XP remaining after rollover; always `< max_xp`.
    pub xp: i64,
    /// Skill level after rollover.
    pub level: i64,
    /// True iff at least one level increment occurred.
    pub leveled_up: bool,
}

/// Apply a non-negative XP `gain` to a skill's `(xp, level)` pair.
///
/// While the accumulated XP reaches `max_xp`, subtract `max_xp` and bump the
/// level, so the invariant `xp < max_xp` holds on return. A zero gain is a
/// no-op. `max_xp <= 0` is a configuration error and fails fast rather than
/// looping; a negative gain is rejected as validation failure.
pub fn apply_skill_gain(
    xp: i64,
    level: i64,
    max_xp: i64,
    gain: i64,
) -> Result<SkillGainOutcome, CoreError> {
    if max_xp <= 0 {
        return Err(CoreError::InvalidConfig(format!(
            "Skill max_xp must be positive, got {max_xp}"
        )));
    }
    if gain < 0 {
        return Err(CoreError::Validation(format!(
            "XP gain must be non-negative, got {gain}"
        )));
    }

    let mut xp = xp + gain;
    let mut level = level;
    let mut leveled_up = false;

    while xp >= max_xp {
        xp -= max_xp;
        level += 1;
        leveled_up = true;
    }

    Ok(SkillGainOutcome {
        xp,
        level,
        leveled_up,
    })
}
