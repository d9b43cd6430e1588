//! Featured round configuration from TOML (`[featured]` section)

use serde::{Deserialize, Serialize};
use wordchain_domain::{ConfigIssue, ConfigIssueCode, FeaturedPolicy};

/// Raw featured-round configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileFeaturedConfig {
    pub enabled: bool,
    /// Chance in `[0, 1]` that a natural end schedules a featured round
    pub probability: f64,
    /// Mode names a featured round may pick from
    pub eligible_modes: Vec<String>,
}

impl Default for FileFeaturedConfig {
    fn default() -> Self {
        let policy = FeaturedPolicy::default();
        Self {
            enabled: policy.enabled,
            probability: policy.probability,
            eligible_modes: policy.eligible_modes,
        }
    }
}

impl FileFeaturedConfig {
    pub fn to_policy(&self) -> FeaturedPolicy {
        FeaturedPolicy::default()
            .with_enabled(self.enabled)
            .with_probability(self.probability)
            .with_eligible_names(self.eligible_modes.iter().cloned())
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        let policy = self.to_policy();

        if let Err(e) = policy.validate_probability() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ProbabilityOutOfRange,
                format!("featured.probability: {}", e),
            ));
        }

        for name in policy.unknown_names() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::UnknownMode,
                format!("featured.eligible_modes: unknown mode '{}', ignoring it", name),
            ));
        }

        if self.enabled && policy.eligible().is_empty() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::NoFeaturedModes,
                "featured rounds are enabled but no eligible mode is configured",
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordchain_domain::GameMode;

    #[test]
    fn test_default_is_disabled_and_valid() {
        let config = FileFeaturedConfig::default();
        assert!(!config.to_policy().enabled);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_to_policy() {
        let config = FileFeaturedConfig {
            enabled: true,
            probability: 0.25,
            eligible_modes: vec!["reversed".into(), "letters".into()],
        };
        let policy = config.to_policy();
        assert!(policy.enabled);
        assert_eq!(policy.probability, 0.25);
        assert_eq!(
            policy.eligible(),
            vec![GameMode::Reversed, GameMode::LetterConstrained]
        );
    }

    #[test]
    fn test_probability_out_of_range() {
        let config = FileFeaturedConfig {
            enabled: true,
            probability: 1.5,
            eligible_modes: vec!["plain".into()],
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::ProbabilityOutOfRange);
        assert!(issues[0].is_error());
    }

    #[test]
    fn test_enabled_without_modes_warns() {
        let config = FileFeaturedConfig {
            enabled: true,
            probability: 0.5,
            eligible_modes: vec!["bogus".into()],
        };
        let codes: Vec<_> = config.validate().iter().map(|i| i.code).collect();
        assert!(codes.contains(&ConfigIssueCode::UnknownMode));
        assert!(codes.contains(&ConfigIssueCode::NoFeaturedModes));
    }
}
