//! Core domain types: quests and the player profile

mod player;
mod quest;

pub use player::{LevelChange, Player};
pub use quest::{Difficulty, Priority, Quest, QuestStatus};
