//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to the application's
//! [`GameConfig`] once validated.

mod bot;
mod emotes;
mod featured;
mod game;
mod logging;
mod validation;

pub use bot::FileBotConfig;
pub use emotes::FileEmotesConfig;
pub use featured::FileFeaturedConfig;
pub use game::FileGameConfig;
pub use logging::FileLoggingConfig;
pub use validation::FileValidationConfig;

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use wordchain_application::GameConfig;
use wordchain_domain::{ConfigIssue, ConfigIssueCode, GameMode, LetterPool};

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("configuration has {} error(s): {}", .0.len(), summarize(.0))]
    Invalid(Vec<ConfigIssue>),
}

fn summarize(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|i| i.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Round scheduling and poll settings
    pub game: FileGameConfig,
    /// Token validation limits
    pub validation: FileValidationConfig,
    /// Featured round policy
    pub featured: FileFeaturedConfig,
    /// Reaction emotes
    pub emotes: FileEmotesConfig,
    /// Bot identity
    pub bot: FileBotConfig,
    /// Log output locations
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Errors make the configuration unusable; warnings describe values that
    /// are ignored or fall back to a default.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Mode names
        let (enabled, mode_issues) = self.game.parse_enabled_modes();
        issues.extend(mode_issues);
        let (initial, initial_issues) = self.game.parse_initial_mode();
        let initial_parsed = initial_issues.is_empty();
        issues.extend(initial_issues);

        if initial_parsed && !enabled.is_empty() && !enabled.contains(&initial) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InitialModeDisabled,
                format!("game.initial_mode: '{}' is not an enabled mode", initial),
            ));
        }

        // 2. Durations and limits
        if self.game.vote_window_seconds == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroDuration,
                "game.vote_window_seconds cannot be 0",
            ));
        }
        if self.game.add_token_timeout_seconds == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroDuration,
                "game.add_token_timeout_seconds cannot be 0",
            ));
        }
        if self.validation.max_length == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroMaxLength,
                "validation.max_length cannot be 0",
            ));
        }

        // 3. Letter poll
        if enabled.contains(&GameMode::LetterConstrained) {
            let pool = LetterPool::excluding(&self.game.reserved_letters);
            if self.game.vote_candidates == 0 {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::LetterPoolTooSmall,
                    "game.vote_candidates must be at least 1",
                ));
            } else if pool.len() < self.game.vote_candidates {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::LetterPoolTooSmall,
                    format!(
                        "game.reserved_letters leaves {} letter(s), fewer than the {} vote candidates",
                        pool.len(),
                        self.game.vote_candidates
                    ),
                ));
            }
        }

        // 4. Featured rounds
        issues.extend(self.featured.validate());
        if self.featured.enabled {
            for mode in self.featured.to_policy().eligible() {
                if !enabled.contains(&mode) {
                    issues.push(ConfigIssue::warning(
                        ConfigIssueCode::FeaturedModeDisabled,
                        format!(
                            "featured.eligible_modes: '{}' is not enabled and cannot start",
                            mode
                        ),
                    ));
                }
            }
        }

        issues
    }

    /// Convert to the application's runtime configuration.
    ///
    /// Unparseable values fall back as described by [`validate`](Self::validate);
    /// call that first to surface them.
    pub fn to_game_config(&self) -> GameConfig {
        let mut config = GameConfig::default()
            .with_vote_window(Duration::from_secs(self.game.vote_window_seconds))
            .with_vote_candidates(self.game.vote_candidates)
            .with_reserved_letters(self.game.reserved_letters.clone())
            .with_add_token_timeout(Duration::from_secs(self.game.add_token_timeout_seconds))
            .with_enabled_modes(self.game.parse_enabled_modes().0)
            .with_initial_mode(self.game.parse_initial_mode().0)
            .with_rules(self.validation.to_rules())
            .with_featured(self.featured.to_policy())
            .with_emotes(self.emotes.to_emotes());

        if let Some(id) = self.bot.id {
            config = config.with_bot_id(id);
        }

        config
    }

    /// Validate, then convert.
    ///
    /// Returns the runtime configuration together with any warnings, or every
    /// issue when at least one of them is an error.
    pub fn to_checked_game_config(
        &self,
    ) -> Result<(GameConfig, Vec<ConfigIssue>), ConfigValidationError> {
        let issues = self.validate();
        if issues.iter().any(ConfigIssue::is_error) {
            return Err(ConfigValidationError::Invalid(issues));
        }
        Ok((self.to_game_config(), issues))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordchain_domain::ParticipantId;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[game]
vote_window_seconds = 10
vote_candidates = 4
reserved_letters = "QXZJ"
add_token_timeout_seconds = 2
enabled_modes = ["plain", "reversed"]
initial_mode = "reversed"

[validation]
max_length = 40
repeated_letter_limit = 3
approved_emotes = [1234]

[featured]
enabled = true
probability = 0.2
eligible_modes = ["reversed"]

[emotes]
accept = "👍"

[bot]
id = 99

[logging]
event_log = "rounds.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(config.validate().is_empty());

        let game = config.to_game_config();
        assert_eq!(game.vote_window, Duration::from_secs(10));
        assert_eq!(game.vote_candidates, 4);
        assert_eq!(game.letter_pool().len(), 22);
        assert_eq!(game.add_token_timeout, Duration::from_secs(2));
        assert_eq!(game.enabled_modes, vec![GameMode::Plain, GameMode::Reversed]);
        assert_eq!(game.initial_mode, GameMode::Reversed);
        assert_eq!(game.rules.max_length, 40);
        assert!(game.rules.emotes.allows(1234));
        assert!(!game.rules.emotes.allows(1));
        assert_eq!(game.featured.eligible(), vec![GameMode::Reversed]);
        assert_eq!(game.emotes.accept, "👍");
        assert_eq!(game.emotes.reject, "❌");
        assert_eq!(game.bot_id, Some(ParticipantId(99)));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[game]
vote_window_seconds = 15
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.game.vote_window_seconds, 15);
        // Defaults should apply
        assert_eq!(config.game.vote_candidates, 3);
        assert_eq!(config.validation, FileValidationConfig::default());
        assert!(!config.featured.enabled);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
        let (game, warnings) = config.to_checked_game_config().unwrap();
        assert!(warnings.is_empty());
        assert_eq!(game.initial_mode, GameMode::Plain);
    }

    #[test]
    fn test_initial_mode_must_be_enabled() {
        let mut config = FileConfig::default();
        config.game.enabled_modes = vec!["plain".into()];
        config.game.initial_mode = "reversed".into();
        let issues = config.validate();
        assert!(issues
            .iter()
            .any(|i| i.code == ConfigIssueCode::InitialModeDisabled));
    }

    #[test]
    fn test_reserved_letters_leaving_too_few_candidates() {
        let mut config = FileConfig::default();
        config.game.reserved_letters = "ABCDEFGHIJKLMNOPQRSTUVWX".into();
        let issues = config.validate();
        assert!(issues
            .iter()
            .any(|i| i.code == ConfigIssueCode::LetterPoolTooSmall && i.is_error()));

        // Irrelevant when the letter mode is off
        config.game.enabled_modes = vec!["plain".into()];
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_zero_durations_and_length() {
        let mut config = FileConfig::default();
        config.game.vote_window_seconds = 0;
        config.game.add_token_timeout_seconds = 0;
        config.validation.max_length = 0;
        let codes: Vec<_> = config.validate().iter().map(|i| i.code).collect();
        assert_eq!(
            codes,
            vec![
                ConfigIssueCode::ZeroDuration,
                ConfigIssueCode::ZeroDuration,
                ConfigIssueCode::ZeroMaxLength
            ]
        );
    }

    #[test]
    fn test_featured_mode_not_enabled_warns() {
        let mut config = FileConfig::default();
        config.game.enabled_modes = vec!["plain".into()];
        config.featured = FileFeaturedConfig {
            enabled: true,
            probability: 0.5,
            eligible_modes: vec!["reversed".into()],
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::FeaturedModeDisabled);

        let (_, warnings) = config.to_checked_game_config().unwrap();
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_to_checked_game_config_rejects_errors() {
        let mut config = FileConfig::default();
        config.featured.probability = -1.0;
        let err = config.to_checked_game_config().unwrap_err();
        let ConfigValidationError::Invalid(issues) = &err;
        assert_eq!(issues.len(), 1);
        assert!(err.to_string().contains("featured.probability"));
    }
}
