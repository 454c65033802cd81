//! User leveling: the mapping from accumulated XP to a level number.
//!
//! Every place that derives a user's level from total XP goes through
//! [`level_for`]. Handlers and the award pipeline must not re-derive the
//! formula inline, so a future curve change touches exactly one function.

/// XP required per user level.
pub const XP_PER_LEVEL: i64 = 300;

/// Compute a user's level from their total XP.
///
/// Levels start at 1 and advance every [`XP_PER_LEVEL`] points:
/// `level = total_xp / 300 + 1`. Negative input is clamped to zero.
pub fn level_for(total_xp: i64) -> i64 {
    total_xp.max(0) / XP_PER_LEVEL + 1
}

/// Total XP at which the next level is reached.
pub fn xp_for_next_level(current_level: i64) -> i64 {
    current_level * XP_PER_LEVEL
}
