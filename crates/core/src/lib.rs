//! Domain logic for the skilltrack backend.
//!
//! Pure types and functions shared by the database and API crates:
//! error taxonomy, the leveling function, and skill XP normalization.
//! Nothing here performs I/O.

pub mod error;
pub mod leveling;
pub mod progress;
pub mod types;
