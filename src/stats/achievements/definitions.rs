//! Achievement definitions and the badge catalog
//!
//! All badges are defined here as data: an unlock rule is a threshold
//! comparison over player counters, not a callback, so the catalog can be
//! inspected, serialized, and tested without any dynamic dispatch.

use serde::{Deserialize, Serialize};

use crate::domain::Player;
use crate::error::QuestaError;

/// Unique identifier for each achievement
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AchievementId {
    #[serde(rename = "first_steps")]
    FirstSteps,
    #[serde(rename = "level_5")]
    Level5,
    #[serde(rename = "level_10")]
    Level10,
    #[serde(rename = "level_20")]
    Level20,
    #[serde(rename = "task_warrior")]
    TaskWarrior,
    #[serde(rename = "task_champion")]
    TaskChampion,
    #[serde(rename = "task_legend")]
    TaskLegend,
    #[serde(rename = "on_fire")]
    OnFire,
    #[serde(rename = "unstoppable")]
    Unstoppable,
    #[serde(rename = "legendary_streak")]
    LegendaryStreak,
    #[serde(rename = "easy_rider")]
    EasyRider,
    #[serde(rename = "challenge_seeker")]
    ChallengeSeeker,
    #[serde(rename = "hard_mode")]
    HardMode,
    #[serde(rename = "xp_collector")]
    XpCollector,
    #[serde(rename = "dedication")]
    Dedication,
}

impl AchievementId {
    /// Get the string ID used in saved files and lookups
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstSteps => "first_steps",
            Self::Level5 => "level_5",
            Self::Level10 => "level_10",
            Self::Level20 => "level_20",
            Self::TaskWarrior => "task_warrior",
            Self::TaskChampion => "task_champion",
            Self::TaskLegend => "task_legend",
            Self::OnFire => "on_fire",
            Self::Unstoppable => "unstoppable",
            Self::LegendaryStreak => "legendary_streak",
            Self::EasyRider => "easy_rider",
            Self::ChallengeSeeker => "challenge_seeker",
            Self::HardMode => "hard_mode",
            Self::XpCollector => "xp_collector",
            Self::Dedication => "dedication",
        }
    }

    /// Parse from the stored string ID
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "first_steps" => Some(Self::FirstSteps),
            "level_5" => Some(Self::Level5),
            "level_10" => Some(Self::Level10),
            "level_20" => Some(Self::Level20),
            "task_warrior" => Some(Self::TaskWarrior),
            "task_champion" => Some(Self::TaskChampion),
            "task_legend" => Some(Self::TaskLegend),
            "on_fire" => Some(Self::OnFire),
            "unstoppable" => Some(Self::Unstoppable),
            "legendary_streak" => Some(Self::LegendaryStreak),
            "easy_rider" => Some(Self::EasyRider),
            "challenge_seeker" => Some(Self::ChallengeSeeker),
            "hard_mode" => Some(Self::HardMode),
            "xp_collector" => Some(Self::XpCollector),
            "dedication" => Some(Self::Dedication),
            _ => None,
        }
    }
}

/// Achievement category for grouping in UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Progression,
    Completion,
    Streak,
    Difficulty,
    Special,
}

impl AchievementCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Progression => "Progression",
            Self::Completion => "Completion",
            Self::Streak => "Streak",
            Self::Difficulty => "Difficulty",
            Self::Special => "Special",
        }
    }

    pub fn all() -> &'static [AchievementCategory] {
        &[
            Self::Progression,
            Self::Completion,
            Self::Streak,
            Self::Difficulty,
            Self::Special,
        ]
    }
}

/// Unlock condition, evaluated against a player snapshot.
///
/// Each variant names the counter it compares and the threshold to meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnlockRule {
    TasksCompleted(u64),
    LevelReached(u32),
    StreakReached(u64),
    EasyCompleted(u64),
    MediumCompleted(u64),
    HardCompleted(u64),
    TotalXp(u64),
    EveryDifficulty { easy: u64, medium: u64, hard: u64 },
}

impl UnlockRule {
    /// Evaluate the rule against the player's current counters
    pub fn is_met(&self, player: &Player) -> bool {
        match *self {
            Self::TasksCompleted(n) => player.tasks_completed >= n,
            Self::LevelReached(n) => player.level() >= n,
            Self::StreakReached(n) => player.current_streak >= n,
            Self::EasyCompleted(n) => player.easy_tasks_completed >= n,
            Self::MediumCompleted(n) => player.medium_tasks_completed >= n,
            Self::HardCompleted(n) => player.hard_tasks_completed >= n,
            Self::TotalXp(n) => player.total_xp >= n,
            Self::EveryDifficulty { easy, medium, hard } => {
                player.easy_tasks_completed >= easy
                    && player.medium_tasks_completed >= medium
                    && player.hard_tasks_completed >= hard
            }
        }
    }
}

/// Achievement definition with all metadata
#[derive(Debug, Clone)]
pub struct Achievement {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub category: AchievementCategory,
    pub rule: UnlockRule,
    /// For progressive achievements, the target the UI shows progress
    /// toward. The rule stays authoritative for unlocking.
    pub threshold: Option<u64>,
    /// Hidden badges are left out of the locked listing until unlocked
    pub hidden: bool,
}

impl Achievement {
    /// Reject definitions with an empty id, name, or description
    pub fn validate(&self) -> Result<(), QuestaError> {
        if self.id.as_str().trim().is_empty() {
            return Err(QuestaError::InvalidArgument(
                "achievement id cannot be empty".into(),
            ));
        }
        if self.name.trim().is_empty() {
            return Err(QuestaError::InvalidArgument(format!(
                "achievement '{}' has an empty name",
                self.id.as_str()
            )));
        }
        if self.description.trim().is_empty() {
            return Err(QuestaError::InvalidArgument(format!(
                "achievement '{}' has an empty description",
                self.id.as_str()
            )));
        }
        Ok(())
    }
}

/// The default badge set, in display order
static STANDARD_CATALOG: &[Achievement] = &[
    // === PROGRESSION ===
    Achievement {
        id: AchievementId::FirstSteps,
        name: "First Steps",
        description: "Complete your first task",
        icon: "🚀",
        category: AchievementCategory::Progression,
        rule: UnlockRule::TasksCompleted(1),
        threshold: None,
        hidden: false,
    },
    Achievement {
        id: AchievementId::Level5,
        name: "Code Apprentice",
        description: "Reach level 5",
        icon: "⭐",
        category: AchievementCategory::Progression,
        rule: UnlockRule::LevelReached(5),
        threshold: Some(5),
        hidden: false,
    },
    Achievement {
        id: AchievementId::Level10,
        name: "Code Journeyman",
        description: "Reach level 10",
        icon: "🌟",
        category: AchievementCategory::Progression,
        rule: UnlockRule::LevelReached(10),
        threshold: Some(10),
        hidden: false,
    },
    Achievement {
        id: AchievementId::Level20,
        name: "Code Master",
        description: "Reach level 20",
        icon: "💫",
        category: AchievementCategory::Progression,
        rule: UnlockRule::LevelReached(20),
        threshold: Some(20),
        hidden: false,
    },
    // === COMPLETION ===
    Achievement {
        id: AchievementId::TaskWarrior,
        name: "Task Warrior",
        description: "Complete 10 tasks",
        icon: "⚔️",
        category: AchievementCategory::Completion,
        rule: UnlockRule::TasksCompleted(10),
        threshold: Some(10),
        hidden: false,
    },
    Achievement {
        id: AchievementId::TaskChampion,
        name: "Task Champion",
        description: "Complete 50 tasks",
        icon: "🏆",
        category: AchievementCategory::Completion,
        rule: UnlockRule::TasksCompleted(50),
        threshold: Some(50),
        hidden: false,
    },
    Achievement {
        id: AchievementId::TaskLegend,
        name: "Task Legend",
        description: "Complete 100 tasks",
        icon: "👑",
        category: AchievementCategory::Completion,
        rule: UnlockRule::TasksCompleted(100),
        threshold: Some(100),
        hidden: false,
    },
    // === STREAK ===
    Achievement {
        id: AchievementId::OnFire,
        name: "On Fire",
        description: "Maintain a 5-task streak",
        icon: "🔥",
        category: AchievementCategory::Streak,
        rule: UnlockRule::StreakReached(5),
        threshold: Some(5),
        hidden: false,
    },
    Achievement {
        id: AchievementId::Unstoppable,
        name: "Unstoppable",
        description: "Maintain a 10-task streak",
        icon: "⚡",
        category: AchievementCategory::Streak,
        rule: UnlockRule::StreakReached(10),
        threshold: Some(10),
        hidden: false,
    },
    Achievement {
        id: AchievementId::LegendaryStreak,
        name: "Legendary Streak",
        description: "Maintain a 25-task streak",
        icon: "🌪️",
        category: AchievementCategory::Streak,
        rule: UnlockRule::StreakReached(25),
        threshold: Some(25),
        hidden: false,
    },
    // === DIFFICULTY ===
    Achievement {
        id: AchievementId::EasyRider,
        name: "Easy Rider",
        description: "Complete 20 easy tasks",
        icon: "🌱",
        category: AchievementCategory::Difficulty,
        rule: UnlockRule::EasyCompleted(20),
        threshold: Some(20),
        hidden: false,
    },
    Achievement {
        id: AchievementId::ChallengeSeeker,
        name: "Challenge Seeker",
        description: "Complete 15 medium tasks",
        icon: "⚖️",
        category: AchievementCategory::Difficulty,
        rule: UnlockRule::MediumCompleted(15),
        threshold: Some(15),
        hidden: false,
    },
    Achievement {
        id: AchievementId::HardMode,
        name: "Hard Mode",
        description: "Complete 10 hard tasks",
        icon: "💎",
        category: AchievementCategory::Difficulty,
        rule: UnlockRule::HardCompleted(10),
        threshold: Some(10),
        hidden: false,
    },
    // === SPECIAL ===
    Achievement {
        id: AchievementId::XpCollector,
        name: "XP Collector",
        description: "Earn 1000 total XP",
        icon: "💰",
        category: AchievementCategory::Special,
        rule: UnlockRule::TotalXp(1000),
        threshold: Some(1000),
        hidden: false,
    },
    Achievement {
        id: AchievementId::Dedication,
        name: "Dedication",
        description: "Complete tasks across multiple difficulty levels",
        icon: "🎯",
        category: AchievementCategory::Special,
        rule: UnlockRule::EveryDifficulty {
            easy: 5,
            medium: 5,
            hard: 5,
        },
        threshold: None,
        hidden: false,
    },
];

/// An immutable, ordered badge catalog.
///
/// Constructed once and handed to each [`super::AchievementEngine`]; there
/// is deliberately no process-wide catalog singleton.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<Achievement>,
}

impl Catalog {
    /// The built-in 15-badge catalog
    pub fn standard() -> Self {
        // The standard entries are validated by tests; skip re-checking.
        Self {
            entries: STANDARD_CATALOG.to_vec(),
        }
    }

    /// Build a catalog from custom entries, validating each one
    pub fn new(entries: Vec<Achievement>) -> Result<Self, QuestaError> {
        for entry in &entries {
            entry.validate()?;
        }
        Ok(Self { entries })
    }

    /// Entries in definition order
    pub fn entries(&self) -> &[Achievement] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by its typed id
    pub fn get(&self, id: AchievementId) -> Option<&Achievement> {
        self.entries.iter().find(|a| a.id == id)
    }

    /// Look up an entry by its string id; `None` for unknown ids
    pub fn find(&self, id: &str) -> Option<&Achievement> {
        self.entries.iter().find(|a| a.id.as_str() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_has_fifteen_valid_entries() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.len(), 15);
        for entry in catalog.entries() {
            entry.validate().unwrap();
        }
    }

    #[test]
    fn ids_roundtrip_through_strings() {
        for entry in Catalog::standard().entries() {
            assert_eq!(AchievementId::parse(entry.id.as_str()), Some(entry.id));
        }
        assert_eq!(AchievementId::parse("unknown_id"), None);
    }

    #[test]
    fn serde_uses_snake_case_ids() {
        let json = serde_json::to_string(&AchievementId::Level5).unwrap();
        assert_eq!(json, "\"level_5\"");
        let back: AchievementId = serde_json::from_str("\"on_fire\"").unwrap();
        assert_eq!(back, AchievementId::OnFire);
    }

    #[test]
    fn empty_name_fails_validation() {
        let bad = Achievement {
            name: "",
            ..Catalog::standard().entries()[0].clone()
        };
        assert!(matches!(
            bad.validate(),
            Err(QuestaError::InvalidArgument(_))
        ));
        assert!(Catalog::new(vec![bad]).is_err());
    }

    #[test]
    fn dedication_rule_requires_all_three_buckets() {
        let mut player = Player::new();
        player.easy_tasks_completed = 5;
        player.medium_tasks_completed = 5;
        player.hard_tasks_completed = 4;

        let rule = UnlockRule::EveryDifficulty {
            easy: 5,
            medium: 5,
            hard: 5,
        };
        assert!(!rule.is_met(&player));
        player.hard_tasks_completed = 5;
        assert!(rule.is_met(&player));
    }
}
