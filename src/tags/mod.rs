pub mod achievement;
pub mod assign;
pub mod catalog;
pub mod leaderboard;
pub mod preference;

pub use assign::{assign_tag, sweep_all};
pub use catalog::{AchievementTag, Category, TagInfo, UserTag};
pub use leaderboard::LeaderboardEntry;
pub use preference::PreferenceProfile;
