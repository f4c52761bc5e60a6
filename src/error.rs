//! Domain error type
//!
//! Operations with a single obvious failure mode return `QuestaError`
//! directly; layered operations (anything touching the store) wrap it in
//! `anyhow::Error` with context.

use thiserror::Error;

use crate::domain::QuestStatus;

#[derive(Debug, Error)]
pub enum QuestaError {
    /// Caller passed a value the operation cannot accept
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No quest with the given id (or id prefix)
    #[error("quest not found: {0}")]
    QuestNotFound(String),

    /// The quest was already completed; completion is one-shot
    #[error("quest {0} is already completed")]
    AlreadyCompleted(String),

    /// The reward-bearing fields of a completed quest are frozen
    #[error("cannot change {field} of completed quest {id}")]
    CompletedQuestLocked { id: String, field: &'static str },

    /// The status transition matrix forbids this move
    #[error("cannot move a {from} quest to {to}")]
    InvalidTransition { from: QuestStatus, to: QuestStatus },

    /// Deleting this quest needs an explicit confirmation
    #[error("deleting quest {0} requires confirmation")]
    ConfirmationRequired(String),
}
