//! Letter constraint applied during a letter-constrained round

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of the constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    MustContain,
    MustNotContain,
}

impl ConstraintKind {
    /// Fair coin flip
    pub fn flip<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.random_bool(0.5) {
            ConstraintKind::MustContain
        } else {
            ConstraintKind::MustNotContain
        }
    }
}

/// The winning letter of a poll and how it constrains words (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LetterConstraint {
    letter: char,
    kind: ConstraintKind,
}

impl LetterConstraint {
    pub fn new(letter: char, kind: ConstraintKind) -> Self {
        Self {
            letter: letter.to_ascii_uppercase(),
            kind,
        }
    }

    pub fn must_contain(letter: char) -> Self {
        Self::new(letter, ConstraintKind::MustContain)
    }

    pub fn must_not_contain(letter: char) -> Self {
        Self::new(letter, ConstraintKind::MustNotContain)
    }

    pub fn letter(&self) -> char {
        self.letter
    }

    pub fn kind(&self) -> ConstraintKind {
        self.kind
    }

    /// Case-insensitive check of the whole word
    pub fn permits(&self, value: &str) -> bool {
        let contains = value
            .chars()
            .any(|c| c.to_ascii_uppercase() == self.letter);
        match self.kind {
            ConstraintKind::MustContain => contains,
            ConstraintKind::MustNotContain => !contains,
        }
    }
}

impl fmt::Display for LetterConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ConstraintKind::MustContain => write!(f, "Word must contain the letter '{}'", self.letter),
            ConstraintKind::MustNotContain => {
                write!(f, "Word cannot contain the letter '{}'", self.letter)
            }
        }
    }
}
