//! Featured round policy

use crate::core::error::DomainError;
use crate::round::GameMode;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

/// Probabilistic policy for spotlighting a mode (Value Object)
///
/// Configuration only; never mutated at runtime. `eligible_modes` holds
/// mode names as written in the config file and is validated lazily, so an
/// unknown name is skipped rather than failing the whole policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturedPolicy {
    pub enabled: bool,
    pub probability: f64,
    pub eligible_modes: Vec<String>,
}

impl Default for FeaturedPolicy {
    fn default() -> Self {
        Self {
            enabled: false,
            probability: 0.0,
            eligible_modes: Vec::new(),
        }
    }
}

impl FeaturedPolicy {
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn new(probability: f64, eligible: impl IntoIterator<Item = GameMode>) -> Self {
        Self {
            enabled: true,
            probability,
            eligible_modes: eligible
                .into_iter()
                .map(|m| m.as_str().to_string())
                .collect(),
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    pub fn with_eligible_names(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.eligible_modes = names.into_iter().map(Into::into).collect();
        self
    }

    /// Eligible modes that parse, in configured order, without duplicates
    pub fn eligible(&self) -> Vec<GameMode> {
        let mut modes = Vec::new();
        for name in &self.eligible_modes {
            if let Ok(mode) = name.parse::<GameMode>()
                && !modes.contains(&mode)
            {
                modes.push(mode);
            }
        }
        modes
    }

    /// Names in `eligible_modes` that are not known modes
    pub fn unknown_names(&self) -> Vec<&str> {
        self.eligible_modes
            .iter()
            .filter(|name| name.parse::<GameMode>().is_err())
            .map(String::as_str)
            .collect()
    }

    /// Check the probability lies in `[0, 1]`
    pub fn validate_probability(&self) -> Result<(), DomainError> {
        if self.probability.is_finite() && (0.0..=1.0).contains(&self.probability) {
            Ok(())
        } else {
            Err(DomainError::InvalidProbability(self.probability.to_string()))
        }
    }

    /// Maybe pick a featured mode for the round after `_previous`
    ///
    /// Returns `None` when disabled, when the probability is not positive,
    /// when the draw misses, or when no eligible name parses. A probability
    /// of 1 or more always attempts a pick. The featured mode may repeat the
    /// previous one.
    pub fn try_select<R: Rng + ?Sized>(&self, _previous: GameMode, rng: &mut R) -> Option<GameMode> {
        if !self.enabled || self.probability.is_nan() || self.probability <= 0.0 {
            return None;
        }

        if self.probability < 1.0 && !rng.random_bool(self.probability) {
            return None;
        }

        self.eligible().choose(rng).copied()
    }
}
