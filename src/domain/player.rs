//! Player profile and progression math
//!
//! The level curve is quadratic: level N starts at `(N-1)^2 * 100` XP, so
//! each level costs more than the last. All derived values are computed on
//! demand from `total_xp`; nothing derived is ever stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::QuestaError;

/// Result of an XP-changing operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelChange {
    pub new_level: u32,
    pub leveled_up: bool,
}

/// Cumulative player statistics.
///
/// Counters are unsigned, so a profile with negative values is
/// unrepresentable; serde rejects negative numbers in saved files for the
/// same reason.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Player {
    #[serde(default)]
    pub total_xp: u64,
    #[serde(default)]
    pub tasks_completed: u64,
    #[serde(default)]
    pub current_streak: u64,
    #[serde(default)]
    pub easy_tasks_completed: u64,
    #[serde(default)]
    pub medium_tasks_completed: u64,
    #[serde(default)]
    pub hard_tasks_completed: u64,
    #[serde(default)]
    pub last_activity: Option<DateTime<Utc>>,
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current level: `floor(sqrt(total_xp / 100)) + 1`, minimum 1.
    ///
    /// The division happens in f64 before the floor; this matches the
    /// reference curve exactly for every total up to at least 10^9.
    pub fn level(&self) -> u32 {
        if self.total_xp == 0 {
            return 1;
        }
        (self.total_xp as f64 / 100.0).sqrt().floor() as u32 + 1
    }

    /// XP total at which the current level begins
    pub fn xp_for_current_level(&self) -> u64 {
        let level = self.level() as u64;
        if level <= 1 {
            return 0;
        }
        (level - 1) * (level - 1) * 100
    }

    /// XP total at which the next level begins
    pub fn xp_for_next_level(&self) -> u64 {
        let level = self.level() as u64;
        level * level * 100
    }

    /// XP still missing before the next level
    pub fn xp_to_next_level(&self) -> u64 {
        self.xp_for_next_level().saturating_sub(self.total_xp)
    }

    /// XP earned within the current level
    pub fn current_level_xp(&self) -> u64 {
        self.total_xp - self.xp_for_current_level()
    }

    /// Progress through the current level in `[0.0, 1.0]`
    pub fn level_progress(&self) -> f64 {
        let start = self.xp_for_current_level();
        let end = self.xp_for_next_level();
        if end <= start {
            return 1.0;
        }

        let progress = (self.total_xp - start) as f64 / (end - start) as f64;
        progress.clamp(0.0, 1.0)
    }

    /// Add XP and report whether a level boundary was crossed.
    ///
    /// Negative amounts are rejected; XP never decreases.
    pub fn add_xp(&mut self, amount: i64) -> Result<LevelChange, QuestaError> {
        if amount < 0 {
            return Err(QuestaError::InvalidArgument(format!(
                "XP amount cannot be negative (got {amount})"
            )));
        }

        let old_level = self.level();
        self.total_xp += amount as u64;
        let new_level = self.level();

        Ok(LevelChange {
            new_level,
            leveled_up: new_level > old_level,
        })
    }

    /// Record a quest completion.
    ///
    /// Bumps the completion counter, the matching difficulty bucket
    /// (case-insensitive; an unrecognized label skips the bucket but still
    /// credits everything else), the streak, and `last_activity`, then
    /// delegates to [`Player::add_xp`].
    ///
    /// The streak is a consecutive-completion counter: every completion
    /// extends it, and only [`Player::reset_streak`] clears it. There is no
    /// date-gap detection here.
    pub fn complete_task(
        &mut self,
        xp_earned: i64,
        difficulty: &str,
    ) -> Result<LevelChange, QuestaError> {
        if xp_earned < 0 {
            return Err(QuestaError::InvalidArgument(format!(
                "XP amount cannot be negative (got {xp_earned})"
            )));
        }

        self.tasks_completed += 1;
        self.last_activity = Some(Utc::now());

        match difficulty.to_ascii_lowercase().as_str() {
            "easy" => self.easy_tasks_completed += 1,
            "medium" => self.medium_tasks_completed += 1,
            "hard" => self.hard_tasks_completed += 1,
            _ => {}
        }

        self.current_streak += 1;

        self.add_xp(xp_earned)
    }

    /// Zero the streak. Only ever called explicitly by the owner.
    pub fn reset_streak(&mut self) {
        self.current_streak = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_with_xp(total_xp: u64) -> Player {
        Player {
            total_xp,
            ..Player::default()
        }
    }

    #[test]
    fn level_curve_boundaries() {
        assert_eq!(player_with_xp(0).level(), 1);
        assert_eq!(player_with_xp(99).level(), 1);
        assert_eq!(player_with_xp(100).level(), 2);
        assert_eq!(player_with_xp(399).level(), 2);
        assert_eq!(player_with_xp(400).level(), 3);
        assert_eq!(player_with_xp(900).level(), 4);
        assert_eq!(player_with_xp(1600).level(), 5);
        assert_eq!(player_with_xp(361_000_000).level(), 1901);
    }

    #[test]
    fn derived_values_at_250_xp() {
        let player = player_with_xp(250);
        assert_eq!(player.level(), 2);
        assert_eq!(player.xp_for_current_level(), 100);
        assert_eq!(player.xp_for_next_level(), 400);
        assert_eq!(player.xp_to_next_level(), 150);
        assert_eq!(player.current_level_xp(), 150);
        assert!((player.level_progress() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn progress_is_monotone_within_a_level_and_resets_at_boundary() {
        let mut last = 0.0;
        for xp in 100..400 {
            let progress = player_with_xp(xp).level_progress();
            assert!(progress >= last, "progress regressed at {xp} XP");
            assert!((0.0..=1.0).contains(&progress));
            last = progress;
        }
        // Crossing into level 3 drops back toward zero
        assert!(player_with_xp(400).level_progress() < last);
    }

    #[test]
    fn add_xp_rejects_negative_amounts() {
        let mut player = Player::new();
        let err = player.add_xp(-5).unwrap_err();
        assert!(matches!(err, QuestaError::InvalidArgument(_)));
        assert_eq!(player.total_xp, 0);
    }

    #[test]
    fn add_xp_reports_level_up() {
        let mut player = player_with_xp(90);
        let change = player.add_xp(5).unwrap();
        assert!(!change.leveled_up);
        let change = player.add_xp(10).unwrap();
        assert!(change.leveled_up);
        assert_eq!(change.new_level, 2);
        assert_eq!(player.total_xp, 105);
    }

    #[test]
    fn complete_task_updates_all_counters() {
        let mut player = Player::new();
        let change = player.complete_task(15, "easy").unwrap();

        assert_eq!(player.total_xp, 15);
        assert_eq!(player.tasks_completed, 1);
        assert_eq!(player.easy_tasks_completed, 1);
        assert_eq!(player.current_streak, 1);
        assert_eq!(change.new_level, 1);
        assert!(!change.leveled_up);
        assert!(player.last_activity.is_some());
    }

    #[test]
    fn completion_sequence_crosses_level_two() {
        let mut player = Player::new();
        player.complete_task(15, "easy").unwrap();
        player.complete_task(30, "medium").unwrap();
        player.complete_task(50, "hard").unwrap();
        let change = player.complete_task(15, "easy").unwrap();

        assert_eq!(player.total_xp, 110);
        assert_eq!(change.new_level, 2);
        assert!(change.leveled_up);
        assert_eq!(player.easy_tasks_completed, 2);
        assert_eq!(player.medium_tasks_completed, 1);
        assert_eq!(player.hard_tasks_completed, 1);
        assert_eq!(player.current_streak, 4);
    }

    #[test]
    fn difficulty_match_is_case_insensitive() {
        let mut player = Player::new();
        player.complete_task(30, "MEDIUM").unwrap();
        assert_eq!(player.medium_tasks_completed, 1);
    }

    #[test]
    fn unknown_difficulty_still_credits_totals() {
        let mut player = Player::new();
        player.complete_task(10, "nightmare").unwrap();

        assert_eq!(player.total_xp, 10);
        assert_eq!(player.tasks_completed, 1);
        assert_eq!(player.current_streak, 1);
        assert_eq!(player.easy_tasks_completed, 0);
        assert_eq!(player.medium_tasks_completed, 0);
        assert_eq!(player.hard_tasks_completed, 0);
    }

    #[test]
    fn reset_streak_zeroes_only_the_streak() {
        let mut player = Player::new();
        player.complete_task(15, "easy").unwrap();
        player.reset_streak();
        assert_eq!(player.current_streak, 0);
        assert_eq!(player.tasks_completed, 1);
    }
}
