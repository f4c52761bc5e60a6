//! XP reward calculation
//!
//! Completing a quest pays its difficulty's base XP plus bonuses: priority
//! and streak multipliers applied to the base, and flat bonuses for
//! same-day completion and sustained weekly activity.

use chrono::Utc;

use crate::domain::{Player, Priority, Quest};

/// Minimum streak before the streak multiplier starts paying out
pub const STREAK_BONUS_THRESHOLD: u64 = 3;
/// Extra multiplier per streak step past the threshold
pub const STREAK_BONUS_STEP: f64 = 0.1;
/// Streak multiplier cap
pub const MAX_STREAK_BONUS: f64 = 0.5;
/// Flat bonus for completing a quest the same day it was created
pub const SAME_DAY_BONUS: i64 = 5;
/// Flat bonus for staying active within the week on a streak of 2+
pub const WEEKLY_MOMENTUM_BONUS: i64 = 10;

/// Detailed reward breakdown, shown by the completion toast and `stats`
#[derive(Debug, Clone, PartialEq)]
pub struct XpBreakdown {
    pub base: i64,
    pub priority_multiplier: f64,
    pub streak_multiplier: f64,
    /// Extra XP from the multipliers, truncated toward zero
    pub multiplier_bonus: i64,
    pub flat_bonus: i64,
    pub total: i64,
}

pub fn priority_multiplier(priority: Priority) -> f64 {
    match priority {
        Priority::Low | Priority::Medium => 1.0,
        Priority::High => 1.1,
        Priority::Critical => 1.2,
    }
}

pub fn streak_multiplier(player: &Player) -> f64 {
    if player.current_streak < STREAK_BONUS_THRESHOLD {
        return 1.0;
    }

    let steps = player.current_streak - STREAK_BONUS_THRESHOLD + 1;
    1.0 + (steps as f64 * STREAK_BONUS_STEP).min(MAX_STREAK_BONUS)
}

/// Flat bonuses that do not scale with the base reward
pub fn completion_bonus(quest: &Quest, player: &Player) -> i64 {
    let mut bonus = 0;
    let now = Utc::now();

    if quest.created_at.date_naive() == now.date_naive() {
        bonus += SAME_DAY_BONUS;
    }

    if let Some(last) = player.last_activity {
        if (now - last).num_days() <= 7 && player.current_streak >= 2 {
            bonus += WEEKLY_MOMENTUM_BONUS;
        }
    }

    bonus
}

/// Total XP the player earns for completing `quest` right now
pub fn total_xp(quest: &Quest, player: &Player) -> i64 {
    preview(quest, player).total
}

/// Full breakdown of the reward for completing `quest` right now
pub fn preview(quest: &Quest, player: &Player) -> XpBreakdown {
    let base = quest.xp_reward as i64;
    let priority_mult = priority_multiplier(quest.priority);
    let streak_mult = streak_multiplier(player);

    let multiplied = base as f64 * priority_mult * streak_mult;
    let multiplier_bonus = (multiplied - base as f64) as i64;
    let flat_bonus = completion_bonus(quest, player);

    XpBreakdown {
        base,
        priority_multiplier: priority_mult,
        streak_multiplier: streak_mult,
        multiplier_bonus,
        flat_bonus,
        total: base + multiplier_bonus + flat_bonus,
    }
}
