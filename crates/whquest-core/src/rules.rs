//! Pure progression helpers shared by the stores.
//!
//! Nothing here holds state. Time enters only through the [`Clock`] trait
//! so that every store operation stays deterministic under test.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

/// Rounded integer percentage of `part` over `whole`, clamped to 0..=100.
///
/// Returns 0 when `whole` is 0. Halves round up, matching the usual
/// "round half away from zero" for non-negative inputs.
pub fn percentage(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let part = part.min(whole) as u64;
    let whole = whole as u64;
    ((part * 200 + whole) / (whole * 2)) as u8
}

/// Calendar day of an instant in the local time zone.
pub fn calendar_day<Tz: TimeZone>(at: &DateTime<Tz>) -> NaiveDate {
    at.with_timezone(&Local).date_naive()
}

/// Whole calendar days from `from` to `to` (negative when `to` is earlier).
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_day(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;

    fn now_utc(&self) -> DateTime<Utc> {
        self.now().with_timezone(&Utc)
    }

    fn today(&self) -> NaiveDate {
        calendar_day(&self.now())
    }
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock pinned to a fixed instant (tests, replays).
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl FixedClock {
    /// Noon local time on the given day.
    pub fn on(day: NaiveDate) -> Self {
        let noon = day.and_hms_opt(12, 0, 0).unwrap_or_default();
        let at = Local
            .from_local_datetime(&noon)
            .earliest()
            .unwrap_or_else(|| Local.from_utc_datetime(&noon));
        Self(at)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}
