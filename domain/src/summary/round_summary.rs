//! Closing summary of a round

use crate::core::ids::ParticipantId;
use crate::round::Token;
use serde::{Deserialize, Serialize};

/// One contributor's line in the closing summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorLine {
    pub author: ParticipantId,
    /// Most used word across all rounds, if any was recorded
    pub top_token: Option<String>,
    /// Words contributed across all rounds
    pub total: u64,
}

impl ContributorLine {
    pub fn render(&self) -> String {
        match &self.top_token {
            Some(top) => format!(
                "<@{}> [ Top word: {} | Total contributions: {} ]",
                self.author, top, self.total
            ),
            None => format!(
                "<@{}> [ Total contributions: {} ]",
                self.author, self.total
            ),
        }
    }
}

/// Text carried by a round-ended event (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub headline: String,
    pub sentence: Option<String>,
    pub contributors: Vec<ContributorLine>,
}

impl RoundSummary {
    pub const CONSTRUCTED: &'static str = "The players have constructed the following sentence:";
    pub const NOTHING_CONSTRUCTED: &'static str = "No valid sentence was constructed this round.";

    /// Summary of a finished chain
    pub fn constructed(sentence: impl Into<String>, contributors: Vec<ContributorLine>) -> Self {
        Self {
            headline: Self::CONSTRUCTED.to_string(),
            sentence: Some(sentence.into()),
            contributors,
        }
    }

    /// Summary of a round that ended with an empty chain
    pub fn empty() -> Self {
        Self::notice(Self::NOTHING_CONSTRUCTED)
    }

    /// Summary without a sentence (e.g. a letter poll nobody voted in)
    pub fn notice(headline: impl Into<String>) -> Self {
        Self {
            headline: headline.into(),
            sentence: None,
            contributors: Vec::new(),
        }
    }

    pub fn has_sentence(&self) -> bool {
        self.sentence.is_some()
    }

    /// Chat-ready text
    pub fn render(&self) -> String {
        let mut out = format!("**{}**", self.headline);
        if let Some(sentence) = &self.sentence {
            out.push_str("\n# ");
            out.push_str(sentence);
        }
        if !self.contributors.is_empty() {
            out.push_str("\n>>> ");
            let lines: Vec<String> = self.contributors.iter().map(ContributorLine::render).collect();
            out.push_str(&lines.join("\n"));
        }
        out
    }
}

/// Authors in the order they first appear in the chain
pub fn contributors_in_order(chain: &[Token]) -> Vec<ParticipantId> {
    let mut seen = Vec::new();
    for token in chain {
        if !seen.contains(&token.author) {
            seen.push(token.author);
        }
    }
    seen
}
