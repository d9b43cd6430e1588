//! Game mode definitions.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three gameplay variants sharing one contribution/termination protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Plain chain: no constraint beyond the common rules
    Plain,
    /// Letter vote first, then every word must (or must not) contain the letter
    LetterConstrained,
    /// Plain rules; the closing sentence is read back to front
    Reversed,
}

impl GameMode {
    /// All modes in declaration order
    pub const ALL: [GameMode; 3] = [
        GameMode::Plain,
        GameMode::LetterConstrained,
        GameMode::Reversed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Plain => "plain",
            GameMode::LetterConstrained => "letters",
            GameMode::Reversed => "reversed",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            GameMode::Plain => "Plain Chain",
            GameMode::LetterConstrained => "Letter Vote",
            GameMode::Reversed => "Reversed Sentence",
        }
    }

    /// Whether rounds of this mode open with a letter vote
    pub fn has_voting_phase(&self) -> bool {
        matches!(self, GameMode::LetterConstrained)
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for GameMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "plain" | "casual" | "chain" | "gamemode_casual" => Ok(GameMode::Plain),
            "letters" | "letter" | "letter_constrained" | "letter_vote"
            | "gamemode_letter_vote" => Ok(GameMode::LetterConstrained),
            "reversed" | "reverse" | "reverse_sentence" | "gamemode_reverse_sentence" => {
                Ok(GameMode::Reversed)
            }
            _ => Err(DomainError::UnknownMode(s.to_string())),
        }
    }
}
