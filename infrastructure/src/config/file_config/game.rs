//! Round scheduling configuration from TOML (`[game]` section)

use serde::{Deserialize, Serialize};
use wordchain_domain::{ConfigIssue, ConfigIssueCode, GameMode};

/// Raw game configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGameConfig {
    /// How long letter polls and staff votes stay open
    pub vote_window_seconds: u64,
    /// Letters offered in a letter poll
    pub vote_candidates: usize,
    /// Letters never offered in a letter poll
    pub reserved_letters: String,
    /// Boundary timeout around add-token processing
    pub add_token_timeout_seconds: u64,
    /// Mode names ("plain", "letters", "reversed")
    pub enabled_modes: Vec<String>,
    /// Mode of the first round after startup
    pub initial_mode: String,
}

impl Default for FileGameConfig {
    fn default() -> Self {
        Self {
            vote_window_seconds: 30,
            vote_candidates: 3,
            reserved_letters: "QXZ".to_string(),
            add_token_timeout_seconds: 5,
            enabled_modes: GameMode::ALL.iter().map(|m| m.as_str().to_string()).collect(),
            initial_mode: GameMode::Plain.as_str().to_string(),
        }
    }
}

impl FileGameConfig {
    /// Parse `enabled_modes`, skipping (and reporting) names that don't parse.
    ///
    /// Duplicates are collapsed; declaration order is kept.
    pub fn parse_enabled_modes(&self) -> (Vec<GameMode>, Vec<ConfigIssue>) {
        let mut modes = Vec::new();
        let mut issues = Vec::new();

        for name in &self.enabled_modes {
            match name.parse::<GameMode>() {
                Ok(mode) if !modes.contains(&mode) => modes.push(mode),
                Ok(_) => {}
                Err(_) => issues.push(ConfigIssue::warning(
                    ConfigIssueCode::UnknownMode,
                    format!("game.enabled_modes: unknown mode '{}', ignoring it", name),
                )),
            }
        }

        if modes.is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::NoModesEnabled,
                "game.enabled_modes: no valid mode is enabled",
            ));
        }

        (modes, issues)
    }

    /// Parse `initial_mode`, falling back to the plain chain.
    pub fn parse_initial_mode(&self) -> (GameMode, Vec<ConfigIssue>) {
        match self.initial_mode.parse::<GameMode>() {
            Ok(mode) => (mode, Vec::new()),
            Err(_) => (
                GameMode::Plain,
                vec![ConfigIssue::error(
                    ConfigIssueCode::UnknownMode,
                    format!("game.initial_mode: unknown mode '{}'", self.initial_mode),
                )],
            ),
        }
    }
}
