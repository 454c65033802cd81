pub mod achievement_repo;
pub mod course_repo;
pub mod notification_repo;
pub mod roadmap_repo;
pub mod skill_repo;
pub mod user_course_repo;
pub mod user_repo;
pub mod xp_history_repo;

pub use achievement_repo::AchievementRepo;
pub use course_repo::CourseRepo;
pub use notification_repo::NotificationRepo;
pub use roadmap_repo::{RoadmapRepo, RoadmapStepRepo};
pub use skill_repo::SkillRepo;
pub use user_course_repo::UserCourseRepo;
pub use user_repo::UserRepo;
pub use xp_history_repo::XpHistoryRepo;
