//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown game mode: {0}")]
    UnknownMode(String),

    #[error("Invalid probability: {0} (expected a value between 0 and 1)")]
    InvalidProbability(String),

    #[error("Letter pool too small: {available} letters available, {requested} requested")]
    LetterPoolTooSmall { available: usize, requested: usize },

    #[error("Invalid letter: {0}")]
    InvalidLetter(char),
}

impl DomainError {
    /// Check if this error came from parsing configuration text
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            DomainError::UnknownMode(_) | DomainError::InvalidProbability(_)
        )
    }
}
