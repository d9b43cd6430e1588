//! Normalization for statistics aggregation

use super::is_apostrophe;

/// Strip everything but letters, digits and apostrophes from both ends and
/// lower-case the rest. Internal punctuation is kept.
///
/// Returns an empty string for punctuation-only or emoji-only tokens; callers
/// must skip those when recording usage.
pub fn normalize(value: &str) -> String {
    value
        .trim_matches(|c: char| !(c.is_alphanumeric() || is_apostrophe(c)))
        .replace('\u{2019}', "'")
        .to_lowercase()
}
