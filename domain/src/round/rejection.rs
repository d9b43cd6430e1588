//! Reasons a round refuses a token

use super::status::RoundStatus;
use crate::core::ids::ParticipantId;
use crate::letters::LetterConstraint;
use crate::validation::InvalidToken;
use thiserror::Error;

/// Why a token was not appended to the chain
///
/// Returned as a typed failure; a rejection never mutates the round.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenRejection {
    #[error("Round is not accepting words ({0})")]
    NotAccepting(RoundStatus),

    #[error("Invalid word: {0}")]
    Invalid(#[from] InvalidToken),

    #[error("The sentence needs at least {min} words before it can end")]
    TooEarlyToEnd { min: usize },

    #[error("Participant {0} submitted the previous word")]
    ConsecutiveAuthor(ParticipantId),

    #[error("The sentence has already ended")]
    SentenceAlreadyEnded,

    #[error("{0}")]
    LetterConstraint(LetterConstraint),
}

impl TokenRejection {
    /// Whether the rejection is about the word itself rather than turn order
    pub fn is_word_problem(&self) -> bool {
        matches!(
            self,
            TokenRejection::Invalid(_) | TokenRejection::LetterConstraint(_)
        )
    }
}
