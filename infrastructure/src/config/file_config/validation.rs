//! Token validation limits from TOML (`[validation]` section)

use serde::{Deserialize, Serialize};
use wordchain_domain::{EmotePolicy, ValidationRules};

/// Raw validation configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileValidationConfig {
    /// Maximum token length in characters
    pub max_length: usize,
    /// A run of this many identical letters is rejected
    pub repeated_letter_limit: usize,
    /// Custom emote ids accepted as single-emote tokens. Empty accepts any.
    pub approved_emotes: Vec<u64>,
}

impl Default for FileValidationConfig {
    fn default() -> Self {
        let rules = ValidationRules::default();
        Self {
            max_length: rules.max_length,
            repeated_letter_limit: rules.repeated_letter_limit,
            approved_emotes: Vec::new(),
        }
    }
}

impl FileValidationConfig {
    pub fn to_rules(&self) -> ValidationRules {
        let emotes = if self.approved_emotes.is_empty() {
            EmotePolicy::Any
        } else {
            EmotePolicy::Allowlist(self.approved_emotes.iter().copied().collect())
        };

        ValidationRules::default()
            .with_max_length(self.max_length)
            .with_repeated_letter_limit(self.repeated_letter_limit)
            .with_emotes(emotes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_allowlist_accepts_any_emote() {
        let rules = FileValidationConfig::default().to_rules();
        assert_eq!(rules, ValidationRules::default());
    }

    #[test]
    fn test_allowlist() {
        let config = FileValidationConfig {
            approved_emotes: vec![42, 7],
            ..Default::default()
        };
        let rules = config.to_rules();
        assert!(rules.emotes.allows(42));
        assert!(!rules.emotes.allows(8));
    }
}
