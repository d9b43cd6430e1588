//! Runtime game configuration.
//!
//! [`GameConfig`] groups the static parameters the orchestrator, the mode
//! handlers and the staff vote need. It is built once at startup (from the
//! config file in the binary, from defaults in tests) and never mutated.

use std::time::Duration;
use wordchain_domain::{FeaturedPolicy, GameMode, LetterPool, ParticipantId, ValidationRules};

/// Reactions the bot leaves on submitted words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionEmotes {
    pub accept: String,
    pub reject: String,
    /// Added alongside `accept` when the word ends the sentence
    pub win: String,
}

impl Default for ReactionEmotes {
    fn default() -> Self {
        Self {
            accept: "✅".to_string(),
            reject: "❌".to_string(),
            win: "🏆".to_string(),
        }
    }
}

/// Game configuration.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// How long letter polls and staff votes stay open.
    pub vote_window: Duration,
    /// Letters offered in a letter poll.
    pub vote_candidates: usize,
    /// Letters never offered in a letter poll.
    pub reserved_letters: String,
    /// Boundary timeout around inbound add-token processing.
    pub add_token_timeout: Duration,
    /// Modes the orchestrator may start. Order is irrelevant.
    pub enabled_modes: Vec<GameMode>,
    /// Mode of the first round after startup.
    pub initial_mode: GameMode,
    pub rules: ValidationRules,
    pub featured: FeaturedPolicy,
    pub emotes: ReactionEmotes,
    /// The bot's own account; its reactions never count as votes.
    pub bot_id: Option<ParticipantId>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            vote_window: Duration::from_secs(30),
            vote_candidates: 3,
            reserved_letters: LetterPool::DEFAULT_RESERVED.to_string(),
            add_token_timeout: Duration::from_secs(5),
            enabled_modes: GameMode::ALL.to_vec(),
            initial_mode: GameMode::Plain,
            rules: ValidationRules::default(),
            featured: FeaturedPolicy::default(),
            emotes: ReactionEmotes::default(),
            bot_id: None,
        }
    }
}

impl GameConfig {
    // ==================== Builder Methods ====================

    pub fn with_vote_window(mut self, window: Duration) -> Self {
        self.vote_window = window;
        self
    }

    pub fn with_vote_candidates(mut self, candidates: usize) -> Self {
        self.vote_candidates = candidates;
        self
    }

    pub fn with_reserved_letters(mut self, reserved: impl Into<String>) -> Self {
        self.reserved_letters = reserved.into();
        self
    }

    pub fn with_add_token_timeout(mut self, timeout: Duration) -> Self {
        self.add_token_timeout = timeout;
        self
    }

    pub fn with_enabled_modes(mut self, modes: impl IntoIterator<Item = GameMode>) -> Self {
        self.enabled_modes = modes.into_iter().collect();
        self
    }

    pub fn with_initial_mode(mut self, mode: GameMode) -> Self {
        self.initial_mode = mode;
        self
    }

    pub fn with_rules(mut self, rules: ValidationRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_featured(mut self, featured: FeaturedPolicy) -> Self {
        self.featured = featured;
        self
    }

    pub fn with_emotes(mut self, emotes: ReactionEmotes) -> Self {
        self.emotes = emotes;
        self
    }

    pub fn with_bot_id(mut self, bot_id: impl Into<ParticipantId>) -> Self {
        self.bot_id = Some(bot_id.into());
        self
    }

    // ==================== Derived Values ====================

    /// Pool the letter poll draws from.
    pub fn letter_pool(&self) -> LetterPool {
        LetterPool::excluding(&self.reserved_letters)
    }

    pub fn is_enabled(&self, mode: GameMode) -> bool {
        self.enabled_modes.contains(&mode)
    }
}
