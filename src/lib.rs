//! QUESTA - a gamified quest tracker for your terminal
//!
//! Tasks are quests: each carries a difficulty tier that pays XP on
//! completion, XP drives a quadratic level curve, and a fixed catalog of
//! badges unlocks as the player's counters cross thresholds.
//!
//! The crate is layered:
//!
//! - [`domain`]: quests and the player profile, including the level math
//! - [`stats`]: XP reward calculation and the achievement engine
//! - [`quest`]: the quest log (CRUD, completion flow, search)
//! - [`store`]: JSON persistence with atomic writes and backups
//! - [`tui`]: the ratatui dashboard
//!
//! The progression core ([`domain::Player`] and
//! [`stats::achievements::AchievementEngine`]) is pure: no I/O, no clocks
//! beyond unlock timestamps, and deterministic for a fixed catalog.

pub mod config;
pub mod domain;
pub mod error;
pub mod quest;
pub mod stats;
pub mod store;
pub mod tui;

pub use domain::*;
pub use error::QuestaError;
