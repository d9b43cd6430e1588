//! Round status

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase of a round's lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundStatus {
    /// Letter poll is open
    Voting,
    /// Accepting tokens
    InProgress,
    /// Poll deadline passed, tallying reactions
    ProcessingVotes,
    /// Terminal
    Ended,
}

impl RoundStatus {
    /// Statuses that count toward the single-active-round invariant
    pub fn is_active(&self) -> bool {
        !matches!(self, RoundStatus::Ended)
    }

    pub fn accepts_tokens(&self) -> bool {
        matches!(self, RoundStatus::InProgress)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoundStatus::Voting => "voting",
            RoundStatus::InProgress => "in_progress",
            RoundStatus::ProcessingVotes => "processing_votes",
            RoundStatus::Ended => "ended",
        }
    }
}

impl fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_statuses() {
        assert!(RoundStatus::Voting.is_active());
        assert!(RoundStatus::InProgress.is_active());
        assert!(RoundStatus::ProcessingVotes.is_active());
        assert!(!RoundStatus::Ended.is_active());
    }

    #[test]
    fn test_only_in_progress_accepts_tokens() {
        assert!(RoundStatus::InProgress.accepts_tokens());
        assert!(!RoundStatus::Voting.accepts_tokens());
        assert!(!RoundStatus::ProcessingVotes.accepts_tokens());
        assert!(!RoundStatus::Ended.accepts_tokens());
    }
}
