//! Quest log: CRUD, completion flow, and progression wiring
//!
//! The log owns the in-memory quests, the player profile, and the
//! achievement engine, and persists through a [`DataStore`] after every
//! mutation. Completion is the interesting path: it pays out XP through the
//! calculator, feeds the player, and then asks the achievement engine for
//! newly crossed unlocks.

use std::collections::HashMap;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::domain::{Difficulty, Player, Priority, Quest, QuestStatus};
use crate::error::QuestaError;
use crate::stats::achievements::{Achievement, AchievementEngine, Catalog};
use crate::stats::xp::{self, XpBreakdown};
use crate::store::DataStore;

/// Sort order for quest listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    CreatedAt,
    Title,
    Difficulty,
    Priority,
    Status,
}

/// Listing filter; unset fields match everything
#[derive(Debug, Clone, Default)]
pub struct QuestFilter {
    pub status: Option<QuestStatus>,
    pub difficulty: Option<Difficulty>,
    pub priority: Option<Priority>,
    pub sort: SortKey,
    /// Ascending order; the default (false) lists newest first
    pub ascending: bool,
}

/// Field updates for an existing quest; `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct QuestUpdate {
    pub title: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub priority: Option<Priority>,
    pub notes: Option<String>,
    pub status: Option<QuestStatus>,
}

/// Everything the UI needs to narrate a completion
#[derive(Debug, Clone)]
pub struct CompletionReport {
    pub quest: Quest,
    pub xp: XpBreakdown,
    pub new_level: u32,
    pub leveled_up: bool,
    pub unlocked: Vec<Achievement>,
}

/// How risky deleting a given quest is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafetyLevel {
    Safe,
    Caution,
    Danger,
}

/// Result of a pre-delete safety check
#[derive(Debug, Clone)]
pub struct DeletionCheck {
    pub requires_confirmation: bool,
    pub safety: SafetyLevel,
    pub warnings: Vec<String>,
}

/// Quest counts by status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub pending: usize,
    pub active: usize,
    pub blocked: usize,
    pub completed: usize,
    pub total: usize,
}

pub struct QuestLog {
    store: DataStore,
    quests: HashMap<String, Quest>,
    player: Player,
    achievements: AchievementEngine,
}

impl QuestLog {
    /// Open the quest log, loading whatever state the store has.
    ///
    /// Load failures are tolerated with a warning and empty state; a broken
    /// save file should never keep the app from starting.
    pub fn open(store: DataStore) -> Self {
        let quests = match store.load_quests() {
            Ok(quests) => quests,
            Err(e) => {
                warn!("could not load quests, starting empty: {e:#}");
                HashMap::new()
            }
        };

        let (player, records) = match store.load_player() {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!("could not load player profile, starting fresh: {e:#}");
                (Player::new(), Vec::new())
            }
        };

        let achievements = AchievementEngine::restore(Catalog::standard(), records);

        info!(
            quests = quests.len(),
            level = player.level(),
            "quest log opened"
        );

        Self {
            store,
            quests,
            player,
            achievements,
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn achievements(&self) -> &AchievementEngine {
        &self.achievements
    }

    /// Create a new pending quest and persist it
    pub fn create_quest(
        &mut self,
        title: &str,
        difficulty: Difficulty,
        priority: Priority,
        notes: Option<String>,
    ) -> Result<Quest> {
        let quest = Quest::new(title, difficulty, priority, notes)?;
        let id = quest.id.clone();
        self.quests.insert(id.clone(), quest);
        self.save()?;

        info!(%id, "created quest");
        Ok(self.quests[&id].clone())
    }

    pub fn quest(&self, id: &str) -> Result<&Quest, QuestaError> {
        self.quests
            .get(id)
            .ok_or_else(|| QuestaError::QuestNotFound(id.to_string()))
    }

    /// Resolve a full id or an unambiguous id prefix
    pub fn resolve_id(&self, prefix: &str) -> Result<String, QuestaError> {
        if self.quests.contains_key(prefix) {
            return Ok(prefix.to_string());
        }

        let mut matches = self.quests.keys().filter(|id| id.starts_with(prefix));
        match (matches.next(), matches.next()) {
            (Some(id), None) => Ok(id.clone()),
            (Some(_), Some(_)) => Err(QuestaError::InvalidArgument(format!(
                "quest id prefix '{prefix}' is ambiguous"
            ))),
            (None, _) => Err(QuestaError::QuestNotFound(prefix.to_string())),
        }
    }

    /// Filtered, sorted quest listing
    pub fn quests(&self, filter: &QuestFilter) -> Vec<&Quest> {
        let mut quests: Vec<&Quest> = self
            .quests
            .values()
            .filter(|q| filter.status.is_none_or(|s| q.status == s))
            .filter(|q| filter.difficulty.is_none_or(|d| q.difficulty == d))
            .filter(|q| filter.priority.is_none_or(|p| q.priority == p))
            .collect();

        match filter.sort {
            SortKey::CreatedAt => quests.sort_by_key(|q| q.created_at),
            SortKey::Title => quests.sort_by_key(|q| q.title.to_lowercase()),
            SortKey::Difficulty => quests.sort_by_key(|q| q.difficulty.xp_value()),
            SortKey::Priority => quests.sort_by_key(|q| q.priority.weight()),
            SortKey::Status => quests.sort_by_key(|q| q.status.weight()),
        }
        if !filter.ascending {
            quests.reverse();
        }

        quests
    }

    /// Case-insensitive substring search over titles and notes
    pub fn search(&self, query: &str) -> Vec<&Quest> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<&Quest> = self
            .quests
            .values()
            .filter(|q| {
                q.title.to_lowercase().contains(&query)
                    || q.notes
                        .as_deref()
                        .is_some_and(|n| n.to_lowercase().contains(&query))
            })
            .collect();
        matches.sort_by_key(|q| q.created_at);
        matches.reverse();
        matches
    }

    /// Apply field updates with the completed-quest restrictions
    pub fn update_quest(&mut self, id: &str, update: QuestUpdate) -> Result<Quest> {
        let quest = self
            .quests
            .get_mut(id)
            .ok_or_else(|| QuestaError::QuestNotFound(id.to_string()))?;

        if let Some(title) = update.title {
            quest.title = crate::quest::validator::validate_title(&title)?;
        }
        if let Some(notes) = update.notes {
            quest.notes = crate::quest::validator::validate_notes(Some(notes))?;
        }
        if let Some(difficulty) = update.difficulty {
            quest.update_difficulty(difficulty)?;
        }
        if let Some(priority) = update.priority {
            quest.priority = priority;
        }
        if let Some(status) = update.status {
            quest.update_status(status)?;
        }

        let updated = quest.clone();
        self.save()?;

        debug!(%id, "updated quest");
        Ok(updated)
    }

    /// Preview the XP payout for completing a quest right now
    pub fn preview_xp(&self, id: &str) -> Result<XpBreakdown, QuestaError> {
        let quest = self.quest(id)?;
        Ok(xp::preview(quest, &self.player))
    }

    /// Complete a quest: pay out XP, update the player, detect unlocks
    pub fn complete_quest(&mut self, id: &str) -> Result<CompletionReport> {
        let quest = self
            .quests
            .get_mut(id)
            .ok_or_else(|| QuestaError::QuestNotFound(id.to_string()))?;
        if quest.is_completed() {
            return Err(QuestaError::AlreadyCompleted(id.to_string()).into());
        }

        let breakdown = xp::preview(quest, &self.player);
        quest.complete()?;
        let difficulty = quest.difficulty;
        let completed = quest.clone();

        let change = self
            .player
            .complete_task(breakdown.total, difficulty.label())?;
        let unlocked = self.achievements.check_new_unlocks(&self.player);

        self.save()?;

        info!(
            %id,
            xp = breakdown.total,
            level = change.new_level,
            unlocked = unlocked.len(),
            "completed quest"
        );

        Ok(CompletionReport {
            quest: completed,
            xp: breakdown,
            new_level: change.new_level,
            leveled_up: change.leveled_up,
            unlocked,
        })
    }

    /// Inspect how risky deleting a quest would be
    pub fn deletion_check(&self, id: &str) -> Result<DeletionCheck, QuestaError> {
        let quest = self.quest(id)?;

        let mut check = DeletionCheck {
            requires_confirmation: false,
            safety: SafetyLevel::Safe,
            warnings: Vec::new(),
        };

        if quest.is_completed() {
            check.requires_confirmation = true;
            check.safety = SafetyLevel::Danger;
            check.warnings.push(format!(
                "'{}' is completed and has awarded {} XP; deleting it keeps the XP but loses the record",
                quest.title, quest.xp_reward
            ));
        } else if quest.is_active() {
            check.requires_confirmation = true;
            check.safety = SafetyLevel::Caution;
            check.warnings.push(format!(
                "'{}' is active; consider marking it blocked or pending instead",
                quest.title
            ));
        }

        if matches!(quest.priority, Priority::High | Priority::Critical) {
            check.requires_confirmation = true;
            if check.safety == SafetyLevel::Safe {
                check.safety = SafetyLevel::Caution;
            }
            check.warnings.push(format!(
                "'{}' is {} priority",
                quest.title,
                quest.priority.label().to_lowercase()
            ));
        }

        Ok(check)
    }

    /// Delete a quest. Risky deletions need `force = true`.
    pub fn delete_quest(&mut self, id: &str, force: bool) -> Result<Quest> {
        let check = self.deletion_check(id)?;
        if check.requires_confirmation && !force {
            return Err(QuestaError::ConfirmationRequired(id.to_string()).into());
        }

        let removed = self
            .quests
            .remove(id)
            .ok_or_else(|| QuestaError::QuestNotFound(id.to_string()))?;
        self.save()?;

        info!(%id, warnings = check.warnings.len(), "deleted quest");
        Ok(removed)
    }

    pub fn counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for quest in self.quests.values() {
            match quest.status {
                QuestStatus::Pending => counts.pending += 1,
                QuestStatus::Active => counts.active += 1,
                QuestStatus::Blocked => counts.blocked += 1,
                QuestStatus::Completed => counts.completed += 1,
            }
            counts.total += 1;
        }
        counts
    }

    /// Persist quests, player, and unlock records
    pub fn save(&mut self) -> Result<()> {
        self.store
            .save_quests(&self.quests)
            .context("failed to save quests")?;
        self.store
            .save_player(&self.player, &self.achievements.unlock_records())
            .context("failed to save player profile")?;
        Ok(())
    }
}
