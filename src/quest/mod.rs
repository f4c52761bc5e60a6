//! Quest log business layer

mod manager;
pub mod validator;

pub use manager::{
    CompletionReport, DeletionCheck, QuestFilter, QuestLog, QuestUpdate, SafetyLevel, SortKey,
    StatusCounts,
};
