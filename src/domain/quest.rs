use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::QuestaError;
use crate::quest::validator;

/// Quest difficulty tiers with their base XP rewards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Base XP awarded when a quest of this tier is completed
    pub fn xp_value(&self) -> u32 {
        match self {
            Self::Easy => 15,
            Self::Medium => 30,
            Self::Hard => 50,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    pub fn all() -> &'static [Difficulty] {
        &[Self::Easy, Self::Medium, Self::Hard]
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = QuestaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(QuestaError::InvalidArgument(format!(
                "unknown difficulty '{other}' (expected easy, medium or hard)"
            ))),
        }
    }
}

/// Quest priority levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    /// Sort weight, lowest priority first
    pub fn weight(&self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
            Self::Critical => 3,
        }
    }

    pub fn all() -> &'static [Priority] {
        &[Self::Low, Self::Medium, Self::High, Self::Critical]
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = QuestaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            other => Err(QuestaError::InvalidArgument(format!(
                "unknown priority '{other}' (expected low, medium, high or critical)"
            ))),
        }
    }
}

/// Quest lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestStatus {
    Pending,
    Active,
    Blocked,
    Completed,
}

impl QuestStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Active => "Active",
            Self::Blocked => "Blocked",
            Self::Completed => "Completed",
        }
    }

    /// Sort weight matching the board ordering
    pub fn weight(&self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Active => 1,
            Self::Blocked => 2,
            Self::Completed => 3,
        }
    }

    /// Whether the transition matrix allows moving to `new_status`.
    ///
    /// Completed is terminal; every other state can reach every other state.
    pub fn can_transition_to(&self, new_status: QuestStatus) -> bool {
        match self {
            Self::Completed => false,
            _ => *self != new_status,
        }
    }

    pub fn all() -> &'static [QuestStatus] {
        &[Self::Pending, Self::Active, Self::Blocked, Self::Completed]
    }
}

impl fmt::Display for QuestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for QuestStatus {
    type Err = QuestaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "active" => Ok(Self::Active),
            "blocked" => Ok(Self::Blocked),
            "completed" | "done" => Ok(Self::Completed),
            other => Err(QuestaError::InvalidArgument(format!(
                "unknown status '{other}' (expected pending, active, blocked or completed)"
            ))),
        }
    }
}

/// A quest the user tracks to completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quest {
    pub id: String,
    pub title: String,
    pub difficulty: Difficulty,
    pub priority: Priority,
    pub status: QuestStatus,
    #[serde(default)]
    pub notes: Option<String>,
    /// Base XP for completing this quest, derived from difficulty
    pub xp_reward: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Quest {
    /// Create a new pending quest with a fresh uuid.
    ///
    /// The title and notes are validated and trimmed; see
    /// [`crate::quest::validator`] for the rules.
    pub fn new(
        title: &str,
        difficulty: Difficulty,
        priority: Priority,
        notes: Option<String>,
    ) -> Result<Self, QuestaError> {
        let title = validator::validate_title(title)?;
        let notes = validator::validate_notes(notes)?;

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            title,
            difficulty,
            priority,
            status: QuestStatus::Pending,
            notes,
            xp_reward: difficulty.xp_value(),
            created_at: Utc::now(),
            completed_at: None,
        })
    }

    pub fn is_completed(&self) -> bool {
        self.status == QuestStatus::Completed
    }

    pub fn is_active(&self) -> bool {
        self.status == QuestStatus::Active
    }

    pub fn is_blocked(&self) -> bool {
        self.status == QuestStatus::Blocked
    }

    /// Mark the quest completed and return its base XP reward
    pub fn complete(&mut self) -> Result<u32, QuestaError> {
        if self.is_completed() {
            return Err(QuestaError::AlreadyCompleted(self.id.clone()));
        }

        self.status = QuestStatus::Completed;
        self.completed_at = Some(Utc::now());
        Ok(self.xp_reward)
    }

    /// Move the quest to a new status, keeping `completed_at` consistent
    pub fn update_status(&mut self, new_status: QuestStatus) -> Result<(), QuestaError> {
        if self.status == new_status {
            return Ok(());
        }
        if !self.status.can_transition_to(new_status) {
            return Err(QuestaError::InvalidTransition {
                from: self.status,
                to: new_status,
            });
        }

        if new_status == QuestStatus::Completed {
            self.completed_at = Some(Utc::now());
        } else {
            self.completed_at = None;
        }
        self.status = new_status;
        Ok(())
    }

    /// Change difficulty and recompute the XP reward.
    ///
    /// Rejected for completed quests: their reward is already part of the
    /// player's XP history.
    pub fn update_difficulty(&mut self, new_difficulty: Difficulty) -> Result<(), QuestaError> {
        if self.is_completed() {
            return Err(QuestaError::CompletedQuestLocked {
                id: self.id.clone(),
                field: "difficulty",
            });
        }

        self.difficulty = new_difficulty;
        self.xp_reward = new_difficulty.xp_value();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_quest_derives_xp_from_difficulty() {
        let quest = Quest::new("Write docs", Difficulty::Medium, Priority::Low, None).unwrap();
        assert_eq!(quest.xp_reward, 30);
        assert_eq!(quest.status, QuestStatus::Pending);
        assert!(quest.completed_at.is_none());
    }

    #[test]
    fn new_quest_trims_title() {
        let quest = Quest::new("  Fix the bug  ", Difficulty::Easy, Priority::High, None).unwrap();
        assert_eq!(quest.title, "Fix the bug");
    }

    #[test]
    fn empty_title_is_rejected() {
        let err = Quest::new("   ", Difficulty::Easy, Priority::Low, None).unwrap_err();
        assert!(matches!(err, QuestaError::InvalidArgument(_)));
    }

    #[test]
    fn complete_sets_timestamp_and_rejects_double_completion() {
        let mut quest = Quest::new("Ship it", Difficulty::Hard, Priority::High, None).unwrap();
        let xp = quest.complete().unwrap();
        assert_eq!(xp, 50);
        assert!(quest.completed_at.is_some());
        assert!(matches!(
            quest.complete(),
            Err(QuestaError::AlreadyCompleted(_))
        ));
    }

    #[test]
    fn completed_is_terminal() {
        let mut quest = Quest::new("Ship it", Difficulty::Easy, Priority::Low, None).unwrap();
        quest.complete().unwrap();
        let err = quest.update_status(QuestStatus::Active).unwrap_err();
        assert!(matches!(err, QuestaError::InvalidTransition { .. }));
    }

    #[test]
    fn difficulty_locked_after_completion() {
        let mut quest = Quest::new("Ship it", Difficulty::Easy, Priority::Low, None).unwrap();
        quest.complete().unwrap();
        assert!(matches!(
            quest.update_difficulty(Difficulty::Hard),
            Err(QuestaError::CompletedQuestLocked { .. })
        ));
    }

    #[test]
    fn update_difficulty_recomputes_reward() {
        let mut quest = Quest::new("Refactor", Difficulty::Easy, Priority::Low, None).unwrap();
        quest.update_difficulty(Difficulty::Hard).unwrap();
        assert_eq!(quest.xp_reward, 50);
    }

    #[test]
    fn status_roundtrip_through_serde() {
        let quest = Quest::new("Serialize me", Difficulty::Medium, Priority::Critical, Some("notes".into())).unwrap();
        let json = serde_json::to_string(&quest).unwrap();
        let back: Quest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, quest.id);
        assert_eq!(back.difficulty, Difficulty::Medium);
        assert_eq!(back.priority, Priority::Critical);
        assert_eq!(back.notes.as_deref(), Some("notes"));
    }
}
