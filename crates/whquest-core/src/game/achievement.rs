//! Achievement catalog and unlock predicates.
//!
//! Stage-clear achievements are bound to stage *position* in the catalog
//! (first, second, third stage), not to stage identifiers.

use std::collections::HashSet;

use serde::Serialize;

use crate::catalog::Catalog;

/// Unique identifier for each achievement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AchievementId {
    FirstQuest,
    Stage1Clear,
    Stage2Clear,
    HalfWay,
    Stage3Clear,
    AllClear,
}

impl Serialize for AchievementId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl AchievementId {
    /// Catalog order.
    pub const ALL: [AchievementId; 6] = [
        Self::FirstQuest,
        Self::Stage1Clear,
        Self::Stage2Clear,
        Self::HalfWay,
        Self::Stage3Clear,
        Self::AllClear,
    ];

    /// String ID used in the persisted record
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstQuest => "first_quest",
            Self::Stage1Clear => "stage_1_clear",
            Self::Stage2Clear => "stage_2_clear",
            Self::HalfWay => "half_way",
            Self::Stage3Clear => "stage_3_clear",
            Self::AllClear => "all_clear",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == s)
    }

    pub fn definition(&self) -> &'static Achievement {
        let idx = Self::ALL.iter().position(|id| id == self).unwrap_or(0);
        &ACHIEVEMENTS[idx]
    }

    /// Whether this achievement's condition holds for a completed-quest set.
    pub fn is_satisfied(&self, snapshot: &CompletionSnapshot<'_>) -> bool {
        match self {
            Self::FirstQuest => snapshot.completed >= 1,
            Self::Stage1Clear => snapshot.stage_cleared(0),
            Self::Stage2Clear => snapshot.stage_cleared(1),
            Self::HalfWay => snapshot.total > 0 && snapshot.completed >= snapshot.total.div_ceil(2),
            Self::Stage3Clear => snapshot.stage_cleared(2),
            Self::AllClear => snapshot.total > 0 && snapshot.completed >= snapshot.total,
        }
    }
}

impl std::fmt::Display for AchievementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Achievement definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub id: AchievementId,
    pub title: &'static str,
    pub description: &'static str,
    pub glyph: &'static str,
}

/// All achievements, in catalog order (same order as [`AchievementId::ALL`]).
pub static ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        id: AchievementId::FirstQuest,
        title: "First Steps",
        description: "Complete your first quest",
        glyph: "👣",
    },
    Achievement {
        id: AchievementId::Stage1Clear,
        title: "Eligibility Confirmed",
        description: "Clear Stage 1",
        glyph: "📋",
    },
    Achievement {
        id: AchievementId::Stage2Clear,
        title: "Visa Submitted",
        description: "Clear Stage 2",
        glyph: "📝",
    },
    Achievement {
        id: AchievementId::HalfWay,
        title: "Halfway There!",
        description: "Complete 50% of all quests",
        glyph: "🏃",
    },
    Achievement {
        id: AchievementId::Stage3Clear,
        title: "Ready to Fly",
        description: "Clear Stage 3",
        glyph: "🎒",
    },
    Achievement {
        id: AchievementId::AllClear,
        title: "Working Holiday Master",
        description: "Complete every quest",
        glyph: "🏆",
    },
];

/// Completed-quest state evaluated against a catalog.
///
/// Ids the catalog does not know are ignored, so stale entries never count
/// toward any predicate.
pub struct CompletionSnapshot<'a> {
    catalog: &'a Catalog,
    done: HashSet<&'a str>,
    completed: usize,
    total: usize,
}

impl<'a> CompletionSnapshot<'a> {
    pub fn new<S: AsRef<str>>(catalog: &'a Catalog, completed_ids: &'a [S]) -> Self {
        let done: HashSet<&str> = completed_ids
            .iter()
            .map(AsRef::as_ref)
            .filter(|id| catalog.contains_quest(id))
            .collect();
        Self {
            catalog,
            completed: done.len(),
            total: catalog.total_quest_count(),
            done,
        }
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Every quest of the stage at `position` is done. A missing stage is
    /// never cleared; an empty one is trivially cleared.
    pub fn stage_cleared(&self, position: usize) -> bool {
        self.catalog
            .stage_at(position)
            .map(|stage| stage.quests.iter().all(|q| self.done.contains(q.id.as_str())))
            .unwrap_or(false)
    }
}

/// Achievements whose predicate holds, in catalog order.
pub fn eligible(snapshot: &CompletionSnapshot<'_>) -> Vec<AchievementId> {
    AchievementId::ALL
        .into_iter()
        .filter(|id| id.is_satisfied(snapshot))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Quest, Stage};

    fn ids(catalog: &Catalog, stage_id: u32) -> Vec<String> {
        catalog
            .stage(stage_id)
            .map(|s| s.quests.iter().map(|q| q.id.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn catalog_order_matches_definitions() {
        for (id, def) in AchievementId::ALL.iter().zip(ACHIEVEMENTS) {
            assert_eq!(*id, def.id);
            assert_eq!(id.definition().id, *id);
        }
    }

    #[test]
    fn string_ids_roundtrip() {
        for id in AchievementId::ALL {
            assert_eq!(AchievementId::from_str(id.as_str()), Some(id));
        }
        assert!(AchievementId::from_str("speedrun").is_none());
    }

    #[test]
    fn serializes_as_string_id() {
        let json = serde_json::to_string(&AchievementId::Stage1Clear).unwrap();
        assert_eq!(json, "\"stage_1_clear\"");
    }

    #[test]
    fn nothing_completed_unlocks_nothing() {
        let catalog = Catalog::builtin();
        let done: Vec<String> = vec![];
        assert!(eligible(&CompletionSnapshot::new(&catalog, &done)).is_empty());
    }

    #[test]
    fn stage_one_clear() {
        let catalog = Catalog::builtin();
        let done = ids(&catalog, 1);
        assert_eq!(
            eligible(&CompletionSnapshot::new(&catalog, &done)),
            vec![AchievementId::FirstQuest, AchievementId::Stage1Clear]
        );
    }

    #[test]
    fn half_way_needs_ceil_of_half() {
        let catalog = Catalog::builtin();
        let all: Vec<&str> = catalog.all_quest_ids();
        // 19 quests: ceil(19 / 2) = 10
        let nine: Vec<&str> = all.iter().copied().take(9).collect();
        let ten: Vec<&str> = all.iter().copied().take(10).collect();
        assert!(!AchievementId::HalfWay.is_satisfied(&CompletionSnapshot::new(&catalog, &nine)));
        assert!(AchievementId::HalfWay.is_satisfied(&CompletionSnapshot::new(&catalog, &ten)));
    }

    #[test]
    fn everything_unlocks_all() {
        let catalog = Catalog::builtin();
        let all = catalog.all_quest_ids();
        assert_eq!(
            eligible(&CompletionSnapshot::new(&catalog, &all)),
            AchievementId::ALL.to_vec()
        );
    }

    #[test]
    fn unknown_ids_do_not_count() {
        let catalog = Catalog::builtin();
        let stale = vec!["0-1", "9-9"];
        let snapshot = CompletionSnapshot::new(&catalog, &stale);
        assert_eq!(snapshot.completed(), 0);
        assert!(eligible(&snapshot).is_empty());
    }

    #[test]
    fn stage_clear_binds_to_position_not_id() {
        let quest = |id: &str| Quest {
            id: id.into(),
            title: id.into(),
            description: String::new(),
            guide_url: None,
            glyph: String::new(),
        };
        let stage = |id: u32, quests: Vec<Quest>| Stage {
            id,
            title: String::new(),
            description: String::new(),
            glyph: String::new(),
            color: String::new(),
            quests,
        };
        let catalog = Catalog::new(vec![
            stage(10, vec![quest("a")]),
            stage(20, vec![quest("b")]),
        ]);
        let done = vec!["a"];
        let snapshot = CompletionSnapshot::new(&catalog, &done);
        assert!(AchievementId::Stage1Clear.is_satisfied(&snapshot));
        assert!(!AchievementId::Stage2Clear.is_satisfied(&snapshot));
        // No third stage at all.
        assert!(!AchievementId::Stage3Clear.is_satisfied(&snapshot));
    }
}
