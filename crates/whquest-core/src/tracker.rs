//! Session facade wiring the stores together.
//!
//! A quest toggle touches both stores: the progress store records the
//! completion, the game store grants (or takes back) XP and re-checks
//! achievements. The tracker runs that sequence and reports what happened
//! as a list of [`Event`]s.
//!
//! ## Usage
//!
//! ```ignore
//! let storage: Rc<dyn KeyValueStore> = Rc::new(SqliteStorage::open(config.database_path()?)?);
//! let mut tracker = QuestTracker::open(storage, Catalog::builtin(), Box::new(SystemClock));
//! for event in tracker.toggle_quest("1-1") {
//!     // render XP popup, confetti, achievement toast...
//! }
//! ```

use std::rc::Rc;

use crate::catalog::Catalog;
use crate::departure::{countdown_label, DepartureStore};
use crate::events::Event;
use crate::game::GameStore;
use crate::progress::ProgressStore;
use crate::rules::Clock;
use crate::stats::{days_since, next_milestone, CompletionStats};
use crate::storage::{Config, KeyValueStore};

/// XP granted per completed quest unless configured otherwise.
pub const DEFAULT_XP_PER_QUEST: u32 = 10;

pub struct QuestTracker {
    catalog: Rc<Catalog>,
    progress: ProgressStore,
    game: GameStore,
    departure: DepartureStore,
    clock: Box<dyn Clock>,
    xp_per_quest: u32,
    opened: Event,
}

impl QuestTracker {
    /// Open every store against `storage`. Registers today's visit.
    pub fn open(storage: Rc<dyn KeyValueStore>, catalog: Catalog, clock: Box<dyn Clock>) -> Self {
        let catalog = Rc::new(catalog);
        let now = clock.now_utc();
        let progress = ProgressStore::open(Rc::clone(&storage), Rc::clone(&catalog), now);
        let game = GameStore::open(Rc::clone(&storage), Rc::clone(&catalog), clock.today());
        let departure = DepartureStore::open(storage);
        let opened = Event::StreakUpdated {
            streak: game.streak(),
            change: game.streak_change(),
            at: now,
        };
        Self {
            catalog,
            progress,
            game,
            departure,
            clock,
            xp_per_quest: DEFAULT_XP_PER_QUEST,
            opened,
        }
    }

    pub fn with_xp_per_quest(mut self, xp: u32) -> Self {
        self.xp_per_quest = xp;
        self
    }

    /// Apply the game section of a [`Config`].
    pub fn with_config(self, config: &Config) -> Self {
        self.with_xp_per_quest(config.game.xp_per_quest)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }

    pub fn game(&self) -> &GameStore {
        &self.game
    }

    pub fn departure(&self) -> &DepartureStore {
        &self.departure
    }

    pub fn departure_mut(&mut self) -> &mut DepartureStore {
        &mut self.departure
    }

    pub fn xp_per_quest(&self) -> u32 {
        self.xp_per_quest
    }

    /// Streak event produced when the session opened.
    pub fn session_event(&self) -> &Event {
        &self.opened
    }

    pub fn days_until_departure(&self) -> Option<i64> {
        self.departure.days_until(self.clock.today())
    }

    pub fn departure_label(&self) -> String {
        countdown_label(self.days_until_departure())
    }

    /// Whether every store's last write reached storage.
    pub fn is_persisted(&self) -> bool {
        self.progress.is_persisted() && self.game.is_persisted() && self.departure.is_persisted()
    }

    pub fn stats(&self) -> CompletionStats {
        let completed = self.progress.completed_count();
        CompletionStats {
            started_at: self.progress.started_at(),
            days_since_start: days_since(self.progress.started_at(), self.clock.now_utc()),
            completed,
            total: self.catalog.total_quest_count(),
            total_progress: self.progress.total_progress(),
            next_milestone: next_milestone(completed),
            rank: self.game.current_rank(),
            next_rank: self.game.next_rank(),
            xp: self.game.xp(),
            xp_to_next_rank: self.game.xp_to_next_rank(),
            xp_progress: self.game.xp_progress(),
            streak: self.game.streak(),
            unlocked_achievements: self.game.unlocked_achievements(),
            total_achievements: crate::game::ACHIEVEMENTS.len(),
        }
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Complete a quest, grant XP and unlock any achievements it earns.
    ///
    /// Returns no events for unknown or already-completed quests.
    pub fn complete_quest(&mut self, quest_id: &str) -> Vec<Event> {
        let Some(stage_id) = self.catalog.stage_of(quest_id).map(|s| s.id) else {
            return Vec::new();
        };
        if !self.progress.complete_quest(quest_id) {
            return Vec::new();
        }

        let at = self.clock.now_utc();
        let mut events = vec![Event::QuestCompleted {
            quest_id: quest_id.to_string(),
            stage_id,
            xp_gained: self.xp_per_quest,
            at,
        }];

        let from_level = self.game.level();
        if self.game.add_xp(self.xp_per_quest) {
            let rank = self.game.current_rank();
            events.push(Event::LeveledUp {
                from_level,
                to_level: rank.level,
                title: rank.title,
                at,
            });
        }

        if self.progress.is_stage_cleared(stage_id) {
            events.push(Event::StageCleared { stage_id, at });
        }

        for achievement in self.game.check_achievements(self.progress.completed_quests()) {
            events.push(Event::AchievementUnlocked {
                achievement,
                title: achievement.definition().title,
                at,
            });
        }
        events
    }

    /// Undo a completion and take back its XP. Achievements stay unlocked.
    pub fn uncomplete_quest(&mut self, quest_id: &str) -> Vec<Event> {
        if !self.progress.uncomplete_quest(quest_id) {
            return Vec::new();
        }
        let xp_lost = self.xp_per_quest.min(self.game.xp());
        self.game.remove_xp(self.xp_per_quest);
        vec![Event::QuestUncompleted {
            quest_id: quest_id.to_string(),
            stage_id: self.catalog.stage_of(quest_id).map(|s| s.id),
            xp_lost,
            at: self.clock.now_utc(),
        }]
    }

    pub fn toggle_quest(&mut self, quest_id: &str) -> Vec<Event> {
        if self.progress.is_quest_completed(quest_id) {
            self.uncomplete_quest(quest_id)
        } else {
            self.complete_quest(quest_id)
        }
    }

    /// Wipe progress and game state. The departure date is kept.
    pub fn reset(&mut self) -> Vec<Event> {
        let now = self.clock.now_utc();
        self.progress.reset(now);
        self.game.reset(self.clock.today());
        vec![Event::ProgressReset { at: now }]
    }
}
