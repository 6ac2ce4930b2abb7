//! Core of a points-based dream marketplace: users post dreams, buy them
//! with points, rate what they bought, and earn a behavioral tag from the
//! achievement/preference engine. Persistence is sea-orm over SQLite; the
//! web/auth/upload layers are collaborators that sit on top of this crate.

pub mod config;
pub mod market;
pub mod storage;
pub mod tags;

pub use config::Config;
pub use market::{MarketError, PurchaseReceipt, RatingOutcome, UserStats, Viewer};
pub use storage::{establish_connection, init_schema};
pub use tags::{AchievementTag, Category, LeaderboardEntry, UserTag};
