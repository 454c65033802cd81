pub mod achievement;
pub mod course;
pub mod notification;
pub mod roadmap;
pub mod skill;
pub mod user;
pub mod xp_history;
