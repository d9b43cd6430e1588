//! Candidate letter pool

use crate::core::error::DomainError;
use rand::Rng;
use rand::seq::index;

/// Base code point of the regional indicator block (🇦)
const REGIONAL_INDICATOR_A: u32 = 0x1F1E6;

/// Letters that may be offered in a letter poll (Value Object)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterPool {
    letters: Vec<char>,
}

impl Default for LetterPool {
    fn default() -> Self {
        Self::excluding(Self::DEFAULT_RESERVED)
    }
}

impl LetterPool {
    /// Low-signal letters kept out of polls by default
    pub const DEFAULT_RESERVED: &'static str = "QXZ";

    /// A-Z minus the reserved letters (case-insensitive; non-letters ignored)
    pub fn excluding(reserved: &str) -> Self {
        let reserved: Vec<char> = reserved
            .chars()
            .filter(char::is_ascii_alphabetic)
            .map(|c| c.to_ascii_uppercase())
            .collect();
        Self {
            letters: ('A'..='Z').filter(|c| !reserved.contains(c)).collect(),
        }
    }

    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn contains(&self, letter: char) -> bool {
        self.letters.contains(&letter.to_ascii_uppercase())
    }

    /// Draw `count` distinct letters without replacement
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Result<Vec<char>, DomainError> {
        if count > self.letters.len() {
            return Err(DomainError::LetterPoolTooSmall {
                available: self.letters.len(),
                requested: count,
            });
        }
        Ok(index::sample(rng, self.letters.len(), count)
            .into_iter()
            .map(|i| self.letters[i])
            .collect())
    }

    /// Regional indicator emoji used as the poll reaction for `letter`
    pub fn emoji_for(letter: char) -> Result<String, DomainError> {
        if !letter.is_ascii_alphabetic() {
            return Err(DomainError::InvalidLetter(letter));
        }
        let offset = letter.to_ascii_uppercase() as u32 - 'A' as u32;
        char::from_u32(REGIONAL_INDICATOR_A + offset)
            .map(String::from)
            .ok_or(DomainError::InvalidLetter(letter))
    }

    /// Inverse of [`LetterPool::emoji_for`]
    pub fn letter_for(emoji: &str) -> Option<char> {
        let mut chars = emoji.chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        let offset = (c as u32).checked_sub(REGIONAL_INDICATOR_A)?;
        if offset < 26 {
            char::from_u32('A' as u32 + offset)
        } else {
            None
        }
    }
}
