//! Planned departure date and countdown.
//!
//! Stored as a bare `YYYY-MM-DD` string rather than a JSON record.

use std::rc::Rc;

use chrono::NaiveDate;

use crate::rules::{days_between, parse_day};
use crate::storage::{KeyValueStore, DEPARTURE_KEY};

pub struct DepartureStore {
    storage: Rc<dyn KeyValueStore>,
    date: Option<NaiveDate>,
    persisted: bool,
}

impl DepartureStore {
    pub fn open(storage: Rc<dyn KeyValueStore>) -> Self {
        let date = match storage.get(DEPARTURE_KEY) {
            Ok(Some(raw)) => {
                let parsed = parse_day(&raw);
                if parsed.is_none() {
                    tracing::warn!(value = %raw, "ignoring malformed departure date");
                }
                parsed
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "departure date unreadable");
                None
            }
        };
        Self {
            storage,
            date,
            persisted: true,
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn set(&mut self, date: NaiveDate) {
        self.date = Some(date);
        let raw = date.format("%Y-%m-%d").to_string();
        let result = self.storage.set(DEPARTURE_KEY, &raw);
        self.track(result);
    }

    pub fn clear(&mut self) {
        self.date = None;
        let result = self.storage.remove(DEPARTURE_KEY);
        self.track(result);
    }

    /// Days from `today` until departure; negative once departed.
    pub fn days_until(&self, today: NaiveDate) -> Option<i64> {
        self.date.map(|date| days_between(today, date))
    }

    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    fn track(&mut self, result: Result<(), crate::error::StorageError>) {
        match result {
            Ok(()) => self.persisted = true,
            Err(e) => {
                tracing::warn!(error = %e, "departure date not saved");
                self.persisted = false;
            }
        }
    }
}

/// Human-readable countdown.
pub fn countdown_label(days: Option<i64>) -> String {
    match days {
        None => "Set your departure date".to_string(),
        Some(0) => "D-Day! Departing today!".to_string(),
        Some(d) if d > 0 => format!("D-{d} until departure"),
        Some(d) => format!("Day {} since departure", d.unsigned_abs()),
    }
}
