//! Achievement engine: unlock detection and progress queries
//!
//! The engine owns the catalog plus a per-profile set of unlock records.
//! Unlocks are monotone: once a rule has been met and recorded, the badge
//! stays unlocked even if the stats later fall below the threshold.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::definitions::{Achievement, AchievementCategory, AchievementId, Catalog};
use crate::domain::Player;

/// Record of a single unlock, created on the first false-to-true transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnlockRecord {
    pub achievement_id: AchievementId,
    pub unlocked_at: DateTime<Utc>,
}

/// Per-profile achievement state
#[derive(Debug, Clone)]
pub struct AchievementEngine {
    catalog: Catalog,
    unlocked: BTreeMap<AchievementId, UnlockRecord>,
}

impl Default for AchievementEngine {
    fn default() -> Self {
        Self::new(Catalog::standard())
    }
}

impl AchievementEngine {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            unlocked: BTreeMap::new(),
        }
    }

    /// Rebuild engine state from persisted unlock records.
    ///
    /// Records for ids missing from the catalog are dropped silently, the
    /// same way the app treats any other stale save data.
    pub fn restore(catalog: Catalog, records: Vec<UnlockRecord>) -> Self {
        let mut engine = Self::new(catalog);
        for record in records {
            if engine.catalog.get(record.achievement_id).is_some() {
                engine.unlocked.insert(record.achievement_id, record);
            }
        }
        engine
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Evaluate every locked badge against the player and record the ones
    /// whose rule is now met. Returns the newly unlocked definitions in
    /// catalog order; calling again without a stat change returns nothing.
    pub fn check_new_unlocks(&mut self, player: &Player) -> Vec<Achievement> {
        let now = Utc::now();
        let mut newly_unlocked = Vec::new();

        for achievement in self.catalog.entries() {
            if self.unlocked.contains_key(&achievement.id) {
                continue;
            }
            if achievement.rule.is_met(player) {
                self.unlocked.insert(
                    achievement.id,
                    UnlockRecord {
                        achievement_id: achievement.id,
                        unlocked_at: now,
                    },
                );
                newly_unlocked.push(achievement.clone());
            }
        }

        newly_unlocked
    }

    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.unlocked.contains_key(&id)
    }

    pub fn unlocked_count(&self) -> usize {
        self.unlocked.len()
    }

    /// Unlocked definitions paired with when they were earned, catalog order
    pub fn unlocked_achievements(&self) -> Vec<(&Achievement, DateTime<Utc>)> {
        self.catalog
            .entries()
            .iter()
            .filter_map(|a| self.unlocked.get(&a.id).map(|r| (a, r.unlocked_at)))
            .collect()
    }

    /// Locked definitions, excluding hidden ones, catalog order
    pub fn locked_achievements(&self) -> Vec<&Achievement> {
        self.catalog
            .entries()
            .iter()
            .filter(|a| !self.unlocked.contains_key(&a.id) && !a.hidden)
            .collect()
    }

    /// All definitions in a category, catalog order preserved
    pub fn achievements_in_category(&self, category: AchievementCategory) -> Vec<&Achievement> {
        self.catalog
            .entries()
            .iter()
            .filter(|a| a.category == category)
            .collect()
    }

    /// Fractional progress toward a badge, `None` for unknown ids.
    ///
    /// Unlocked badges report 1.0. Locked badges without a display
    /// threshold report 0.0 (no partial-credit formula exists for them).
    /// Otherwise the counter is picked by category, with the difficulty
    /// bucket and the XP counter selected by substring of the id. A
    /// difficulty badge whose id names no bucket ("challenge_seeker")
    /// therefore reports 0.0 until it unlocks.
    pub fn progress(&self, id: &str, player: &Player) -> Option<f64> {
        let achievement = self.catalog.find(id)?;

        if self.unlocked.contains_key(&achievement.id) {
            return Some(1.0);
        }

        let threshold = match achievement.threshold {
            Some(t) if t > 0 => t,
            _ => return Some(0.0),
        };

        let id_str = achievement.id.as_str();
        let current = match achievement.category {
            AchievementCategory::Progression => player.level() as u64,
            AchievementCategory::Completion => player.tasks_completed,
            AchievementCategory::Streak => player.current_streak,
            AchievementCategory::Difficulty => {
                if id_str.contains("easy") {
                    player.easy_tasks_completed
                } else if id_str.contains("medium") {
                    player.medium_tasks_completed
                } else if id_str.contains("hard") {
                    player.hard_tasks_completed
                } else {
                    0
                }
            }
            AchievementCategory::Special => {
                if id_str.contains("xp") {
                    player.total_xp
                } else {
                    0
                }
            }
        };

        Some((current as f64 / threshold as f64).min(1.0))
    }

    /// Snapshot of the unlock records for persistence, catalog order
    pub fn unlock_records(&self) -> Vec<UnlockRecord> {
        self.catalog
            .entries()
            .iter()
            .filter_map(|a| self.unlocked.get(&a.id).cloned())
            .collect()
    }
}
