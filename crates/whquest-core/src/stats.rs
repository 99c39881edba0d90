//! Completion statistics snapshot for dashboards.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::game::{Achievement, Rank};

/// Completed-quest counts that earn a callout.
pub const MILESTONES: [usize; 6] = [5, 10, 15, 20, 25, 30];

/// Next milestone strictly above `completed`, if any remain.
pub fn next_milestone(completed: usize) -> Option<usize> {
    MILESTONES.into_iter().find(|&m| completed < m)
}

/// Whole days elapsed since `started_at`, never negative.
pub fn days_since(started_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - started_at).num_days().max(0)
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionStats {
    pub started_at: DateTime<Utc>,
    pub days_since_start: i64,
    pub completed: usize,
    pub total: usize,
    pub total_progress: u8,
    pub next_milestone: Option<usize>,
    pub rank: &'static Rank,
    pub next_rank: Option<&'static Rank>,
    pub xp: u32,
    pub xp_to_next_rank: u32,
    pub xp_progress: u8,
    pub streak: u32,
    pub unlocked_achievements: Vec<&'static Achievement>,
    pub total_achievements: usize,
}
