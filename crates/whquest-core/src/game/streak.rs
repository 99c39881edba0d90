//! Daily visit streak.
//!
//! Compared at calendar-day granularity: a visit the day after the last one
//! extends the streak, a visit on the same day changes nothing, and any
//! other gap (including a clock that moved backwards) starts over at 1.

use chrono::NaiveDate;
use serde::Serialize;

use crate::rules::days_between;

/// What a visit did to the streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakChange {
    /// Already visited today.
    Unchanged,
    /// Visited yesterday; streak grew by one.
    Extended,
    /// Gap of more than a day (or a date in the future); back to 1.
    Reset,
}

/// Apply a visit on `today` to a streak last touched on `last_visit`.
///
/// Returns the new streak count and the kind of transition.
pub fn register_visit(streak: u32, last_visit: NaiveDate, today: NaiveDate) -> (u32, StreakChange) {
    match days_between(last_visit, today) {
        0 => (streak, StreakChange::Unchanged),
        1 => (streak.saturating_add(1), StreakChange::Extended),
        _ => (1, StreakChange::Reset),
    }
}
