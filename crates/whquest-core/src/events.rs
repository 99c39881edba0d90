use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::game::{AchievementId, StreakChange};

/// Every user-visible state change produces an Event.
/// The presentation layer turns them into transient effects (XP popups,
/// level-up confetti, achievement toasts); nothing flows back into the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Event {
    QuestCompleted {
        quest_id: String,
        stage_id: u32,
        xp_gained: u32,
        at: DateTime<Utc>,
    },
    QuestUncompleted {
        quest_id: String,
        /// `None` for an id no longer in the catalog.
        stage_id: Option<u32>,
        xp_lost: u32,
        at: DateTime<Utc>,
    },
    /// Rank level went up.
    LeveledUp {
        from_level: u32,
        to_level: u32,
        title: &'static str,
        at: DateTime<Utc>,
    },
    AchievementUnlocked {
        achievement: AchievementId,
        title: &'static str,
        at: DateTime<Utc>,
    },
    /// Every quest of a stage is now done.
    StageCleared {
        stage_id: u32,
        at: DateTime<Utc>,
    },
    /// Emitted once per session when the tracker opens.
    StreakUpdated {
        streak: u32,
        change: StreakChange,
        at: DateTime<Utc>,
    },
    ProgressReset {
        at: DateTime<Utc>,
    },
}
