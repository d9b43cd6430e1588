//! Token: a single contribution to a round's chain

use crate::core::ids::{MessageRef, ParticipantId};
use crate::validation::TERMINATORS;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single word submitted by a participant
///
/// Construction does not validate; handlers run the
/// [`TokenValidator`](crate::validation::TokenValidator) before a token is
/// appended to a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Message the token was submitted in
    pub source_ref: MessageRef,
    pub author: ParticipantId,
    pub value: String,
    pub submitted_at: DateTime<Utc>,
}

impl Token {
    pub fn new(
        source_ref: impl Into<MessageRef>,
        author: impl Into<ParticipantId>,
        value: impl Into<String>,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            source_ref: source_ref.into(),
            author: author.into(),
            value: value.into(),
            submitted_at,
        }
    }

    /// Whether this token ends the sentence (its last character is a terminator)
    pub fn ends_sentence(&self) -> bool {
        self.value
            .chars()
            .last()
            .is_some_and(|c| TERMINATORS.contains(&c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(value: &str) -> Token {
        Token::new(1, 1, value, Utc::now())
    }

    #[test]
    fn test_ends_sentence() {
        assert!(token("sat.").ends_sentence());
        assert!(token("really?").ends_sentence());
        assert!(token("wow!").ends_sentence());
        assert!(!token("cat").ends_sentence());
        assert!(!token("cat,").ends_sentence());
        assert!(!token("").ends_sentence());
    }
}
