//! Round errors

use crate::ports::chat_transport::TransportError;
use std::time::Duration;
use thiserror::Error;
use wordchain_domain::{DomainError, GameMode, MessageRef, RoundId, RoundStatus, TokenRejection};

/// Errors returned by the orchestrator and the mode handlers
///
/// Every entry point returns these as values; nothing panics across the
/// orchestrator boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoundError {
    #[error("No active round")]
    NoActiveRound,

    #[error("Round is not in progress ({0})")]
    NotInProgress(RoundStatus),

    #[error("Word rejected: {0}")]
    Rejected(#[from] TokenRejection),

    #[error("No word was submitted in message {0}")]
    TokenNotFound(MessageRef),

    #[error("Round {0} is not the active round")]
    MismatchedRound(RoundId),

    #[error("Mode {0} is not enabled")]
    ModeNotRegistered(GameMode),

    #[error("Failed to start {mode} round: {reason}")]
    StartFailed { mode: GameMode, reason: String },

    #[error("Gave up after {0:?}")]
    Timeout(Duration),

    #[error("Add-token task failed: {0}")]
    TaskFailed(String),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl RoundError {
    /// Whether the error is an expected refusal rather than a fault
    ///
    /// Rejected words and stale end signals are ordinary traffic.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            RoundError::NoActiveRound
                | RoundError::NotInProgress(_)
                | RoundError::Rejected(_)
                | RoundError::TokenNotFound(_)
                | RoundError::MismatchedRound(_)
        )
    }
}
