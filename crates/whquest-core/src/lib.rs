//! # whquest Core Library
//!
//! This library provides the progression core for whquest, a gamified
//! checklist for Australian Working Holiday visa preparation. All state is
//! local to the device; the CLI binary (and any other front end) is a thin
//! presentation layer over the same core.
//!
//! ## Architecture
//!
//! - **Catalog**: Immutable stages and quests
//! - **Progress**: Completed-quest set with derived stage pointer and percentages
//! - **Game**: XP, rank ladder, achievements and the daily visit streak
//! - **Storage**: Key-value persistence (SQLite or in-memory) and TOML configuration
//!
//! ## Key Components
//!
//! - [`QuestTracker`]: Session facade running quest toggles across both stores
//! - [`ProgressStore`]: Completion tracking
//! - [`GameStore`]: XP, rank, achievements, streak
//! - [`KeyValueStore`]: Storage seam for injected backends

pub mod catalog;
pub mod departure;
pub mod error;
pub mod events;
pub mod game;
pub mod progress;
pub mod rules;
pub mod stats;
pub mod storage;
pub mod tracker;

pub use catalog::{Catalog, Quest, Stage};
pub use departure::{countdown_label, DepartureStore};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use game::{Achievement, AchievementId, GameState, GameStore, Rank, StreakChange};
pub use progress::{ProgressStore, StageOverview, UserProgress};
pub use rules::{Clock, FixedClock, SystemClock};
pub use stats::CompletionStats;
pub use storage::{Config, KeyValueStore, MemoryStorage, SqliteStorage};
pub use tracker::QuestTracker;
