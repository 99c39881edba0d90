//! Game state store: XP, rank, achievements and the daily streak.

use std::rc::Rc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::achievement::{eligible, Achievement, AchievementId, CompletionSnapshot};
use super::rank::{self, Rank};
use super::streak::{register_visit, StreakChange};
use crate::catalog::Catalog;
use crate::storage::{read_record, write_record, KeyValueStore, RecordRead, GAME_KEY};

/// Persisted game record.
///
/// `level` is a cache of [`rank::rank_for_xp`] and is rewritten on every XP
/// change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub xp: u32,
    pub level: u32,
    pub achievements: Vec<String>,
    pub streak: u32,
    pub last_visit: NaiveDate,
}

impl GameState {
    /// First-run state: no XP, first rank, no streak yet.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            xp: 0,
            level: 1,
            achievements: Vec::new(),
            streak: 0,
            last_visit: today,
        }
    }

    /// State after an explicit reset: like [`GameState::new`] but with
    /// today counted as a one-day streak.
    pub fn after_reset(today: NaiveDate) -> Self {
        Self {
            streak: 1,
            ..Self::new(today)
        }
    }

    /// Rebuild cached fields from their sources of truth.
    fn normalized(mut self) -> Self {
        self.level = rank::rank_for_xp(self.xp).level;
        let mut seen = std::collections::HashSet::new();
        self.achievements.retain(|id| seen.insert(id.clone()));
        self
    }
}

pub struct GameStore {
    storage: Rc<dyn KeyValueStore>,
    catalog: Rc<Catalog>,
    state: GameState,
    streak_change: StreakChange,
    persisted: bool,
    /// Set when the stored record could not be read; nothing is written
    /// for the rest of the session.
    writes_held: bool,
}

impl GameStore {
    /// Load the game record (or start fresh) and register today's visit.
    ///
    /// The streak update is written back immediately so reopening on the
    /// same day leaves it untouched.
    pub fn open(storage: Rc<dyn KeyValueStore>, catalog: Rc<Catalog>, today: NaiveDate) -> Self {
        let (state, streak_change, dirty, writes_held) =
            match read_record::<GameState>(storage.as_ref(), GAME_KEY) {
                RecordRead::Found(stored) => {
                    let mut state = stored.clone().normalized();
                    let (streak, change) = register_visit(state.streak, state.last_visit, today);
                    state.streak = streak;
                    state.last_visit = today;
                    let dirty = state != stored;
                    (state, change, dirty, false)
                }
                RecordRead::Absent | RecordRead::Corrupted => {
                    (GameState::new(today), StreakChange::Reset, true, false)
                }
                RecordRead::Unreadable(_) => {
                    (GameState::new(today), StreakChange::Reset, false, true)
                }
            };

        tracing::debug!(
            xp = state.xp,
            streak = state.streak,
            change = ?streak_change,
            "game state loaded"
        );

        let mut store = Self {
            storage,
            catalog,
            state,
            streak_change,
            persisted: !writes_held,
            writes_held,
        };
        if dirty {
            store.persist();
        }
        store
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn xp(&self) -> u32 {
        self.state.xp
    }

    pub fn level(&self) -> u32 {
        self.state.level
    }

    pub fn streak(&self) -> u32 {
        self.state.streak
    }

    pub fn last_visit(&self) -> NaiveDate {
        self.state.last_visit
    }

    /// How opening the store affected the streak.
    pub fn streak_change(&self) -> StreakChange {
        self.streak_change
    }

    pub fn current_rank(&self) -> &'static Rank {
        rank::rank_for_xp(self.state.xp)
    }

    pub fn next_rank(&self) -> Option<&'static Rank> {
        rank::next_rank(self.current_rank())
    }

    pub fn xp_to_next_rank(&self) -> u32 {
        rank::xp_to_next_rank(self.state.xp)
    }

    pub fn xp_progress(&self) -> u8 {
        rank::xp_progress(self.state.xp)
    }

    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.state.achievements.iter().any(|a| a == id.as_str())
    }

    /// Unlocked achievements in catalog order. Unrecognized stored ids are
    /// kept in the record but not listed.
    pub fn unlocked_achievements(&self) -> Vec<&'static Achievement> {
        AchievementId::ALL
            .into_iter()
            .filter(|id| self.is_unlocked(*id))
            .map(|id| id.definition())
            .collect()
    }

    /// `false` once a write has failed; state then lives only in memory
    /// until a later write succeeds. Stays `false` for the whole session
    /// when the stored record could not be read at open.
    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Add XP. Returns `true` when the rank level went up.
    pub fn add_xp(&mut self, amount: u32) -> bool {
        let before = self.state.level;
        self.state.xp = self.state.xp.saturating_add(amount);
        self.state.level = rank::rank_for_xp(self.state.xp).level;
        self.persist();

        let leveled_up = self.state.level > before;
        tracing::debug!(amount, xp = self.state.xp, leveled_up, "xp added");
        leveled_up
    }

    /// Remove XP, flooring at zero.
    pub fn remove_xp(&mut self, amount: u32) {
        self.state.xp = self.state.xp.saturating_sub(amount);
        self.state.level = rank::rank_for_xp(self.state.xp).level;
        self.persist();
        tracing::debug!(amount, xp = self.state.xp, "xp removed");
    }

    /// Unlock every achievement whose predicate now holds.
    ///
    /// Returns only the newly unlocked ones, in catalog order; re-checking
    /// the same snapshot returns nothing. Unlocks are never revoked here.
    pub fn check_achievements<S: AsRef<str>>(&mut self, completed: &[S]) -> Vec<AchievementId> {
        let catalog = Rc::clone(&self.catalog);
        let snapshot = CompletionSnapshot::new(&catalog, completed);
        let fresh: Vec<AchievementId> = eligible(&snapshot)
            .into_iter()
            .filter(|id| !self.is_unlocked(*id))
            .collect();

        if !fresh.is_empty() {
            self.state
                .achievements
                .extend(fresh.iter().map(|id| id.as_str().to_string()));
            self.persist();
            for id in &fresh {
                tracing::debug!(achievement = %id, "achievement unlocked");
            }
        }
        fresh
    }

    /// Back to a fresh state dated `today`.
    pub fn reset(&mut self, today: NaiveDate) {
        self.state = GameState::after_reset(today);
        self.streak_change = StreakChange::Reset;
        self.persist();
        tracing::info!("game state reset");
    }

    fn persist(&mut self) {
        if self.writes_held {
            self.persisted = false;
            return;
        }
        match write_record(self.storage.as_ref(), GAME_KEY, &self.state) {
            Ok(()) => self.persisted = true,
            Err(e) => {
                if self.persisted {
                    tracing::warn!(error = %e, "game state not saved; changes will not survive a restart");
                }
                self.persisted = false;
            }
        }
    }
}
