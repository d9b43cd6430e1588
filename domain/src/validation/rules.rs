//! Tunable limits for the validation engine

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which custom emote references count as a valid single-emote token
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotePolicy {
    /// Any well-formed `<:name:id>` / `<a:name:id>` reference
    #[default]
    Any,
    /// Only emotes whose id is in the set (typically the community's own emotes)
    Allowlist(BTreeSet<u64>),
}

impl EmotePolicy {
    pub fn allows(&self, emote_id: u64) -> bool {
        match self {
            EmotePolicy::Any => true,
            EmotePolicy::Allowlist(ids) => ids.contains(&emote_id),
        }
    }
}

/// Limits applied by [`TokenValidator`](super::TokenValidator)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRules {
    /// Maximum length in characters
    pub max_length: usize,
    /// A run of this many identical letters is rejected
    pub repeated_letter_limit: usize,
    pub emotes: EmotePolicy,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            max_length: 70,
            repeated_letter_limit: 4,
            emotes: EmotePolicy::Any,
        }
    }
}

impl ValidationRules {
    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = max;
        self
    }

    pub fn with_repeated_letter_limit(mut self, limit: usize) -> Self {
        self.repeated_letter_limit = limit;
        self
    }

    pub fn with_emotes(mut self, emotes: EmotePolicy) -> Self {
        self.emotes = emotes;
        self
    }
}
