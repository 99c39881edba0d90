//! Gamification layer: XP ranks, achievements and the visit streak.

pub mod achievement;
pub mod rank;
mod store;
pub mod streak;

pub use achievement::{Achievement, AchievementId, CompletionSnapshot, ACHIEVEMENTS};
pub use rank::{Rank, RANKS};
pub use store::{GameState, GameStore};
pub use streak::StreakChange;
