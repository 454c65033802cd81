pub mod auth;
pub mod courses;
pub mod notifications;
pub mod roadmaps;
pub mod skills;
pub mod stats;
