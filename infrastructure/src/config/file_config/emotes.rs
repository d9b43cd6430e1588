//! Reaction emotes from TOML (`[emotes]` section)

use serde::{Deserialize, Serialize};
use wordchain_application::ReactionEmotes;

/// Raw reaction emote configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEmotesConfig {
    pub accept: String,
    pub reject: String,
    /// Added alongside `accept` when a word ends the sentence
    pub win: String,
}

impl Default for FileEmotesConfig {
    fn default() -> Self {
        let emotes = ReactionEmotes::default();
        Self {
            accept: emotes.accept,
            reject: emotes.reject,
            win: emotes.win,
        }
    }
}

impl FileEmotesConfig {
    pub fn to_emotes(&self) -> ReactionEmotes {
        ReactionEmotes {
            accept: self.accept.clone(),
            reject: self.reject.clone(),
            win: self.win.clone(),
        }
    }
}
