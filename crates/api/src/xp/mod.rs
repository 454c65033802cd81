//! XP award pipeline: the one place that grants XP.
//!
//! The skill-practice, roadmap-step, and course-completion handlers all
//! funnel through [`pipeline::award_xp`] instead of carrying their own
//! copies of the update-resource / bump-user-XP / notify / log sequence.

pub mod pipeline;

pub use pipeline::{award_xp, AwardSummary, AwardTarget};
