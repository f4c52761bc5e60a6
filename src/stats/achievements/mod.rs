//! Gamification system: badges, unlock rules, and progress tracking

mod definitions;
mod engine;

pub use definitions::{Achievement, AchievementCategory, AchievementId, Catalog, UnlockRule};
pub use engine::{AchievementEngine, UnlockRecord};
