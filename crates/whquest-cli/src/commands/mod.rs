pub mod config;
pub mod departure;
pub mod game;
pub mod quest;
pub mod reset;
pub mod stage;
pub mod status;

use std::rc::Rc;

use whquest_core::{
    Catalog, Config, CoreError, KeyValueStore, MemoryStorage, QuestTracker, SqliteStorage,
    SystemClock,
};

pub type CliResult = Result<(), CoreError>;

/// An open tracker plus the display preferences it was opened with.
pub struct Session {
    pub tracker: QuestTracker,
    pub show_glyphs: bool,
}

impl Session {
    /// Open the tracker against the configured database.
    ///
    /// If the database cannot be opened the session continues on in-memory
    /// storage; nothing will be saved.
    pub fn open() -> Self {
        let config = Config::load();
        let storage: Rc<dyn KeyValueStore> = match open_database(&config) {
            Ok(db) => Rc::new(db),
            Err(e) => {
                tracing::warn!(error = %e, "database unavailable, progress will not be saved");
                Rc::new(MemoryStorage::new())
            }
        };
        let tracker = QuestTracker::open(storage, Catalog::builtin(), Box::new(SystemClock))
            .with_config(&config);
        Self {
            tracker,
            show_glyphs: config.display.show_glyphs,
        }
    }

    /// Glyph followed by a space, or nothing when glyphs are turned off.
    pub fn glyph(&self, glyph: &str) -> String {
        if self.show_glyphs && !glyph.is_empty() {
            format!("{glyph} ")
        } else {
            String::new()
        }
    }

    /// Warn on stderr when the last write did not reach storage.
    pub fn warn_if_unsaved(&self) {
        if !self.tracker.is_persisted() {
            eprintln!("warning: changes could not be saved and will be lost on exit");
        }
    }
}

fn open_database(config: &Config) -> whquest_core::error::Result<SqliteStorage> {
    Ok(SqliteStorage::open(config.database_path()?)?)
}

/// `[#####.....]` style bar for a 0..=100 percentage.
pub fn bar(percent: u8) -> String {
    let filled = (usize::from(percent.min(100)) + 5) / 10;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(10 - filled))
}
