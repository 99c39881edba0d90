//! Quest completion tracking.
//!
//! The completed set is the only source of truth. The current-stage pointer
//! and every percentage are derived from it; `current_stage` in the stored
//! record is a cache rewritten after each mutation.

use std::collections::HashSet;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Quest};
use crate::rules::percentage;
use crate::storage::{read_record, write_record, KeyValueStore, RecordRead, PROGRESS_KEY};

/// Persisted progress record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    /// Insertion-ordered, no duplicates.
    pub completed_quests: Vec<String>,
    pub current_stage: u32,
    pub started_at: DateTime<Utc>,
}

impl UserProgress {
    pub fn new(catalog: &Catalog, started_at: DateTime<Utc>) -> Self {
        Self {
            completed_quests: Vec::new(),
            current_stage: catalog.first_stage_id().unwrap_or(1),
            started_at,
        }
    }
}

/// Lowest stage with at least one incomplete quest, or the last stage when
/// everything is done.
pub fn derive_current_stage<S: AsRef<str>>(catalog: &Catalog, completed: &[S]) -> u32 {
    let done: HashSet<&str> = completed.iter().map(AsRef::as_ref).collect();
    catalog
        .stages()
        .iter()
        .find(|stage| stage.quests.iter().any(|q| !done.contains(q.id.as_str())))
        .map(|stage| stage.id)
        .or_else(|| catalog.last_stage_id())
        .unwrap_or(1)
}

/// Per-stage view for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageOverview {
    pub id: u32,
    pub title: String,
    pub glyph: String,
    pub completed: usize,
    pub total: usize,
    pub progress: u8,
    pub unlocked: bool,
    pub cleared: bool,
    /// Unlocked, not cleared, and the current stage.
    pub current: bool,
}

pub struct ProgressStore {
    storage: Rc<dyn KeyValueStore>,
    catalog: Rc<Catalog>,
    progress: UserProgress,
    persisted: bool,
    /// Set when the stored record could not be read; nothing is written
    /// for the rest of the session.
    writes_held: bool,
}

impl ProgressStore {
    /// Load the progress record, or start a fresh one stamped `now`.
    pub fn open(storage: Rc<dyn KeyValueStore>, catalog: Rc<Catalog>, now: DateTime<Utc>) -> Self {
        let (progress, dirty, writes_held) =
            match read_record::<UserProgress>(storage.as_ref(), PROGRESS_KEY) {
                RecordRead::Found(stored) => {
                    let mut progress = stored.clone();
                    let mut seen = HashSet::new();
                    progress
                        .completed_quests
                        .retain(|id| seen.insert(id.clone()));
                    progress.current_stage =
                        derive_current_stage(&catalog, &progress.completed_quests);
                    let dirty = progress != stored;
                    (progress, dirty, false)
                }
                RecordRead::Absent | RecordRead::Corrupted => {
                    (UserProgress::new(&catalog, now), true, false)
                }
                RecordRead::Unreadable(_) => (UserProgress::new(&catalog, now), false, true),
            };

        tracing::debug!(
            completed = progress.completed_quests.len(),
            current_stage = progress.current_stage,
            "progress loaded"
        );

        let mut store = Self {
            storage,
            catalog,
            progress,
            persisted: !writes_held,
            writes_held,
        };
        if dirty {
            store.persist();
        }
        store
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn progress(&self) -> &UserProgress {
        &self.progress
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn completed_quests(&self) -> &[String] {
        &self.progress.completed_quests
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.progress.started_at
    }

    pub fn current_stage(&self) -> u32 {
        self.progress.current_stage
    }

    pub fn is_quest_completed(&self, quest_id: &str) -> bool {
        self.progress.completed_quests.iter().any(|id| id == quest_id)
    }

    /// Completed quests that still exist in the catalog.
    pub fn completed_count(&self) -> usize {
        self.progress
            .completed_quests
            .iter()
            .filter(|id| self.catalog.contains_quest(id))
            .count()
    }

    pub fn stage_completed_count(&self, stage_id: u32) -> usize {
        self.catalog
            .stage(stage_id)
            .map(|stage| {
                stage
                    .quests
                    .iter()
                    .filter(|q| self.is_quest_completed(&q.id))
                    .count()
            })
            .unwrap_or(0)
    }

    /// Stage completion 0..=100; 0 for unknown or empty stages.
    pub fn stage_progress(&self, stage_id: u32) -> u8 {
        percentage(
            self.stage_completed_count(stage_id),
            self.catalog.quest_count(stage_id),
        )
    }

    /// Overall completion 0..=100 across every stage.
    pub fn total_progress(&self) -> u8 {
        percentage(self.completed_count(), self.catalog.total_quest_count())
    }

    /// The first stage is always open; any other opens once the stage
    /// before it is at 100%.
    pub fn is_stage_unlocked(&self, stage_id: u32) -> bool {
        if self.catalog.stage(stage_id).is_none() {
            return false;
        }
        match self.catalog.previous_stage(stage_id) {
            None => true,
            Some(prev) => self.stage_progress(prev.id) == 100,
        }
    }

    pub fn is_stage_cleared(&self, stage_id: u32) -> bool {
        self.stage_progress(stage_id) == 100
    }

    /// First incomplete quest of the current stage.
    pub fn current_quest(&self) -> Option<&Quest> {
        self.catalog
            .stage(self.progress.current_stage)?
            .quests
            .iter()
            .find(|q| !self.is_quest_completed(&q.id))
    }

    pub fn stage_overview(&self) -> Vec<StageOverview> {
        self.catalog
            .stages()
            .iter()
            .map(|stage| {
                let unlocked = self.is_stage_unlocked(stage.id);
                let cleared = self.is_stage_cleared(stage.id);
                StageOverview {
                    id: stage.id,
                    title: stage.title.clone(),
                    glyph: stage.glyph.clone(),
                    completed: self.stage_completed_count(stage.id),
                    total: stage.quest_count(),
                    progress: self.stage_progress(stage.id),
                    unlocked,
                    cleared,
                    current: unlocked && !cleared && self.progress.current_stage == stage.id,
                }
            })
            .collect()
    }

    /// `false` once a write has failed, or when the stored record could not
    /// be read at open.
    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Mark a quest done. Returns `false` (and changes nothing) when it was
    /// already done or the catalog does not know it.
    pub fn complete_quest(&mut self, quest_id: &str) -> bool {
        if !self.catalog.contains_quest(quest_id) {
            tracing::debug!(quest_id, "ignoring unknown quest");
            return false;
        }
        if self.is_quest_completed(quest_id) {
            return false;
        }
        self.progress.completed_quests.push(quest_id.to_string());
        self.refresh();
        tracing::debug!(quest_id, current_stage = self.progress.current_stage, "quest completed");
        true
    }

    /// Mark a quest not done. Returns `false` when it was not done.
    pub fn uncomplete_quest(&mut self, quest_id: &str) -> bool {
        let before = self.progress.completed_quests.len();
        self.progress.completed_quests.retain(|id| id != quest_id);
        if self.progress.completed_quests.len() == before {
            return false;
        }
        self.refresh();
        tracing::debug!(quest_id, current_stage = self.progress.current_stage, "quest uncompleted");
        true
    }

    /// Clear everything and restart the clock at `now`.
    pub fn reset(&mut self, now: DateTime<Utc>) {
        self.progress = UserProgress::new(&self.catalog, now);
        self.persist();
        tracing::info!("progress reset");
    }

    fn refresh(&mut self) {
        self.progress.current_stage =
            derive_current_stage(&self.catalog, &self.progress.completed_quests);
        self.persist();
    }

    fn persist(&mut self) {
        if self.writes_held {
            self.persisted = false;
            return;
        }
        match write_record(self.storage.as_ref(), PROGRESS_KEY, &self.progress) {
            Ok(()) => self.persisted = true,
            Err(e) => {
                if self.persisted {
                    tracing::warn!(error = %e, "progress not saved; changes will not survive a restart");
                }
                self.persisted = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Stage;
    use crate::storage::MemoryStorage;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap()
    }

    fn open(storage: &Rc<MemoryStorage>) -> ProgressStore {
        ProgressStore::open(storage.clone(), Rc::new(Catalog::builtin()), now())
    }

    fn assert_cache_matches(store: &ProgressStore) {
        assert_eq!(
            store.current_stage(),
            derive_current_stage(store.catalog(), store.completed_quests())
        );
    }

    #[test]
    fn complete_and_uncomplete_are_idempotent() {
        let storage = Rc::new(MemoryStorage::new());
        let mut store = open(&storage);
        assert!(!store.is_quest_completed("1-1"));
        assert!(store.complete_quest("1-1"));
        assert!(!store.complete_quest("1-1"));
        assert_eq!(store.completed_quests(), ["1-1".to_string()]);
        assert!(store.is_quest_completed("1-1"));
        assert!(store.uncomplete_quest("1-1"));
        assert!(!store.uncomplete_quest("1-1"));
        assert!(!store.is_quest_completed("1-1"));
    }

    #[test]
    fn unknown_quest_is_ignored() {
        let storage = Rc::new(MemoryStorage::new());
        let mut store = open(&storage);
        assert!(!store.complete_quest("9-9"));
        assert!(store.completed_quests().is_empty());
        assert_eq!(store.stage_progress(99), 0);
    }

    #[test]
    fn total_progress_rounds() {
        let storage = Rc::new(MemoryStorage::new());
        let mut store = open(&storage);
        for id in ["1-1", "1-2", "1-3", "1-4", "2-1"] {
            store.complete_quest(id);
        }
        assert_eq!(store.total_progress(), 26);
        assert_eq!(store.stage_progress(1), 100);
        assert_eq!(store.stage_progress(2), 20);
    }

    #[test]
    fn current_stage_tracks_first_incomplete_stage() {
        let storage = Rc::new(MemoryStorage::new());
        let mut store = open(&storage);
        assert_eq!(store.current_stage(), 1);
        for id in ["1-1", "1-2", "1-3", "1-4", "2-1"] {
            store.complete_quest(id);
            assert_cache_matches(&store);
        }
        assert_eq!(store.current_stage(), 2);
        assert_eq!(store.current_quest().map(|q| q.id.as_str()), Some("2-2"));

        store.uncomplete_quest("1-2");
        assert_eq!(store.current_stage(), 1);
        assert_cache_matches(&store);
    }

    #[test]
    fn everything_done_points_at_last_stage() {
        let storage = Rc::new(MemoryStorage::new());
        let mut store = open(&storage);
        let ids: Vec<String> = store
            .catalog()
            .all_quest_ids()
            .into_iter()
            .map(String::from)
            .collect();
        for id in &ids {
            store.complete_quest(id);
        }
        assert_eq!(store.current_stage(), 4);
        assert_eq!(store.total_progress(), 100);
        assert!(store.current_quest().is_none());
    }

    #[test]
    fn stage_unlocks_follow_previous_stage() {
        let storage = Rc::new(MemoryStorage::new());
        let mut store = open(&storage);
        assert!(store.is_stage_unlocked(1));
        assert!(!store.is_stage_unlocked(2));
        assert!(!store.is_stage_unlocked(42));
        for id in ["1-1", "1-2", "1-3", "1-4"] {
            store.complete_quest(id);
        }
        assert!(store.is_stage_unlocked(2));
        assert!(!store.is_stage_unlocked(3));

        let overview = store.stage_overview();
        assert!(overview[0].cleared && !overview[0].current);
        assert!(overview[1].unlocked && overview[1].current);
        assert!(!overview[2].unlocked);
    }

    #[test]
    fn empty_stage_reports_zero() {
        let catalog = Catalog::new(vec![Stage {
            id: 1,
            title: "Empty".into(),
            description: String::new(),
            glyph: String::new(),
            color: String::new(),
            quests: vec![],
        }]);
        let storage = Rc::new(MemoryStorage::new());
        let store = ProgressStore::open(storage, Rc::new(catalog), now());
        assert_eq!(store.stage_progress(1), 0);
        assert_eq!(store.total_progress(), 0);
        assert_eq!(store.current_stage(), 1);
    }

    #[test]
    fn reload_restores_state_and_rebuilds_cache() {
        let storage = Rc::new(MemoryStorage::new());
        storage
            .set(
                PROGRESS_KEY,
                r#"{"completedQuests":["1-1","1-2","1-3","1-4","1-1","0-9"],"currentStage":4,"startedAt":"2026-10-01T00:00:00Z"}"#,
            )
            .unwrap();
        let store = open(&storage);
        assert_eq!(store.current_stage(), 2);
        assert_eq!(store.completed_quests().len(), 5);
        assert_eq!(store.completed_count(), 4);
        assert_eq!(store.total_progress(), 21);
        assert_eq!(
            store.started_at(),
            Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn corrupted_record_starts_fresh() {
        let storage = Rc::new(MemoryStorage::new());
        storage.set(PROGRESS_KEY, "][").unwrap();
        let store = open(&storage);
        assert!(store.completed_quests().is_empty());
        assert_eq!(store.started_at(), now());
    }

    #[test]
    fn reset_clears_and_restamps() {
        let storage = Rc::new(MemoryStorage::new());
        let mut store = open(&storage);
        store.complete_quest("1-1");
        let later = now() + chrono::Duration::days(3);
        store.reset(later);
        assert!(store.completed_quests().is_empty());
        assert_eq!(store.current_stage(), 1);
        assert_eq!(store.started_at(), later);
        assert_eq!(store.total_progress(), 0);
    }

    #[test]
    fn storage_failure_keeps_session_usable() {
        let storage = Rc::new(MemoryStorage::new());
        storage.set_failing(true);
        let mut store = open(&storage);
        assert!(!store.is_persisted());
        assert!(store.complete_quest("1-1"));
        assert!(store.is_quest_completed("1-1"));
    }

    #[test]
    fn unreadable_record_is_never_overwritten() {
        let storage = Rc::new(MemoryStorage::new());
        {
            let mut store = open(&storage);
            store.complete_quest("1-1");
            store.complete_quest("1-2");
        }
        let saved = storage.get(PROGRESS_KEY).unwrap();

        storage.set_reads_failing(true);
        let mut store = open(&storage);
        assert!(store.completed_quests().is_empty());
        assert!(!store.is_persisted());
        store.complete_quest("2-1");
        store.reset(now());
        assert!(!store.is_persisted());
        storage.set_reads_failing(false);

        assert_eq!(storage.get(PROGRESS_KEY).unwrap(), saved);
        let store = open(&storage);
        assert_eq!(store.completed_quests(), ["1-1", "1-2"]);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn quest_ids() -> Vec<String> {
            Catalog::builtin()
                .all_quest_ids()
                .into_iter()
                .map(str::to_string)
                .collect()
        }

        proptest! {
            #[test]
            fn toggling_keeps_set_and_cache_consistent(
                ops in prop::collection::vec((0usize..19, any::<bool>()), 0..60)
            ) {
                let ids = quest_ids();
                let storage = Rc::new(MemoryStorage::new());
                let mut store = open(&storage);
                let mut expected = std::collections::BTreeSet::new();

                for (idx, complete) in ops {
                    let id = &ids[idx];
                    if complete {
                        store.complete_quest(id);
                        store.complete_quest(id);
                        expected.insert(id.clone());
                    } else {
                        store.uncomplete_quest(id);
                        store.uncomplete_quest(id);
                        expected.remove(id);
                    }
                    prop_assert_eq!(store.is_quest_completed(id), complete);
                }

                let actual: std::collections::BTreeSet<String> =
                    store.completed_quests().iter().cloned().collect();
                prop_assert_eq!(actual.len(), store.completed_quests().len());
                prop_assert_eq!(actual, expected);
                prop_assert!(store.total_progress() <= 100);
                assert_cache_matches(&store);
            }
        }
    }
}
