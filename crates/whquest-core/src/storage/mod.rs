//! Client-local durable storage.
//!
//! Each persisted record is a whole JSON blob addressed by a fixed key and
//! is read and written as a unit. Stores receive their backend as an
//! `Rc<dyn KeyValueStore>` so tests can inject doubles.

mod config;
pub mod database;
pub mod memory;

pub use config::{Config, DisplayConfig, GameConfig, StorageConfig};
pub use database::SqliteStorage;
pub use memory::MemoryStorage;

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;

/// Key of the progress record.
pub const PROGRESS_KEY: &str = "aus-wh-progress";
/// Key of the game-state record.
pub const GAME_KEY: &str = "aus-wh-game";
/// Key of the planned departure date.
pub const DEPARTURE_KEY: &str = "aus-wh-departure";

/// Minimal get/set/remove interface over a string key-value backend.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Outcome of reading a JSON record.
#[derive(Debug)]
pub enum RecordRead<T> {
    Found(T),
    /// Never written.
    Absent,
    /// Present but not decodable; safe to replace.
    Corrupted,
    /// The backend failed. The stored record may still be intact, so it
    /// must not be overwritten.
    Unreadable(StorageError),
}

/// Read and decode a JSON record. Corrupted and unreadable records are
/// logged.
pub fn read_record<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> RecordRead<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return RecordRead::Absent,
        Err(e) => {
            tracing::warn!(key, error = %e, "storage read failed, holding writes for this session");
            return RecordRead::Unreadable(e);
        }
    };
    match serde_json::from_str(&raw) {
        Ok(record) => RecordRead::Found(record),
        Err(e) => {
            tracing::warn!(key, error = %e, "corrupted record, using defaults");
            RecordRead::Corrupted
        }
    }
}

/// Encode and write a JSON record as a whole.
pub fn write_record<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    record: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(record)
        .map_err(|e| StorageError::QueryFailed(format!("encode {key}: {e}")))?;
    store.set(key, &raw)
}

/// Returns the data directory.
///
/// `WHQUEST_DATA_DIR` overrides everything; otherwise `~/.config/whquest`,
/// or `~/.config/whquest-dev` when `WHQUEST_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let dir = match std::env::var_os("WHQUEST_DATA_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("WHQUEST_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("whquest-dev")
            } else {
                base_dir.join("whquest")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        n: u32,
    }

    #[test]
    fn record_roundtrip() {
        let store = MemoryStorage::new();
        write_record(&store, "k", &Sample { n: 7 }).unwrap();
        assert!(matches!(
            read_record::<Sample>(&store, "k"),
            RecordRead::Found(Sample { n: 7 })
        ));
    }

    #[test]
    fn missing_record_is_absent() {
        let store = MemoryStorage::new();
        assert!(matches!(
            read_record::<Sample>(&store, "absent"),
            RecordRead::Absent
        ));
    }

    #[test]
    fn undecodable_record_is_corrupted() {
        let store = MemoryStorage::new();
        store.set("k", "{not json").unwrap();
        assert!(matches!(
            read_record::<Sample>(&store, "k"),
            RecordRead::Corrupted
        ));
    }

    #[test]
    fn failing_backend_read_is_unreadable() {
        let store = MemoryStorage::new();
        store.set("k", r#"{"n":1}"#).unwrap();
        store.set_reads_failing(true);
        assert!(matches!(
            read_record::<Sample>(&store, "k"),
            RecordRead::Unreadable(StorageError::Unavailable(_))
        ));
        store.set_reads_failing(false);
        assert!(matches!(
            read_record::<Sample>(&store, "k"),
            RecordRead::Found(Sample { n: 1 })
        ));
    }
}
