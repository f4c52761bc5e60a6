//! Progression layer: XP rewards and the achievement system

pub mod achievements;
pub mod xp;
