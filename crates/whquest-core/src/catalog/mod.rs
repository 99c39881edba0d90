//! Static quest catalog.
//!
//! A catalog is an ordered list of stages, each holding an ordered list of
//! quests. Stage order is identifier order; quest order inside a stage is
//! the order used for "next quest" lookups. Catalog data is immutable once
//! built.

mod builtin;

use serde::{Deserialize, Serialize};

/// A single actionable checklist item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub id: String,
    pub title: String,
    pub description: String,
    /// External guide (official page, booking site).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guide_url: Option<String>,
    pub glyph: String,
}

/// An ordered group of quests gating access to the next group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub glyph: String,
    /// Color token, e.g. `#3B82F6`.
    pub color: String,
    pub quests: Vec<Quest>,
}

impl Stage {
    pub fn quest_count(&self) -> usize {
        self.quests.len()
    }

    pub fn contains(&self, quest_id: &str) -> bool {
        self.quests.iter().any(|q| q.id == quest_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    stages: Vec<Stage>,
}

impl Catalog {
    /// Build a catalog, sorting stages by identifier.
    pub fn new(mut stages: Vec<Stage>) -> Self {
        stages.sort_by_key(|s| s.id);
        Self { stages }
    }

    /// The Australian Working Holiday (subclass 417) preparation checklist.
    pub fn builtin() -> Self {
        Self::new(builtin::stages())
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn stage(&self, stage_id: u32) -> Option<&Stage> {
        self.stages.iter().find(|s| s.id == stage_id)
    }

    /// Stage by ordinal position (0 = first stage in catalog order).
    pub fn stage_at(&self, position: usize) -> Option<&Stage> {
        self.stages.get(position)
    }

    pub fn first_stage_id(&self) -> Option<u32> {
        self.stages.first().map(|s| s.id)
    }

    pub fn last_stage_id(&self) -> Option<u32> {
        self.stages.last().map(|s| s.id)
    }

    /// The stage immediately before `stage_id` in catalog order.
    pub fn previous_stage(&self, stage_id: u32) -> Option<&Stage> {
        let idx = self.stages.iter().position(|s| s.id == stage_id)?;
        idx.checked_sub(1).and_then(|i| self.stages.get(i))
    }

    pub fn quest(&self, quest_id: &str) -> Option<&Quest> {
        self.stages
            .iter()
            .flat_map(|s| s.quests.iter())
            .find(|q| q.id == quest_id)
    }

    /// Stage owning the given quest.
    pub fn stage_of(&self, quest_id: &str) -> Option<&Stage> {
        self.stages.iter().find(|s| s.contains(quest_id))
    }

    pub fn contains_quest(&self, quest_id: &str) -> bool {
        self.quest(quest_id).is_some()
    }

    pub fn all_quest_ids(&self) -> Vec<&str> {
        self.stages
            .iter()
            .flat_map(|s| s.quests.iter().map(|q| q.id.as_str()))
            .collect()
    }

    /// Number of quests in a stage; 0 for an unknown stage.
    pub fn quest_count(&self, stage_id: u32) -> usize {
        self.stage(stage_id).map(Stage::quest_count).unwrap_or(0)
    }

    pub fn total_quest_count(&self) -> usize {
        self.stages.iter().map(Stage::quest_count).sum()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
