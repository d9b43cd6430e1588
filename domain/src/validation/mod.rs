//! Token validation engine
//!
//! A pure, deterministic predicate over a candidate word ([`TokenValidator`])
//! plus the [`normalize`] function used for statistics aggregation.
//!
//! The two are deliberately separate: a token can be acceptable for display
//! yet normalize to an empty string (punctuation only), in which case it is
//! kept out of usage statistics.

pub mod emoji;
pub mod normalize;
pub mod rules;
pub mod validator;

pub use normalize::normalize;
pub use rules::{EmotePolicy, ValidationRules};
pub use validator::{InvalidToken, TokenValidator};

/// Characters that join clauses; allowed once, at the head or tail of a token
pub const CONNECTIVES: [char; 3] = [',', '-', ';'];

/// Characters that end the sentence; allowed once, at the tail of a token
pub const TERMINATORS: [char; 3] = ['.', '?', '!'];

/// Leading symbols that mark a currency amount
pub const CURRENCY_SYMBOLS: [char; 4] = ['£', '$', '€', '¥'];

/// Straight and typographic apostrophes
pub fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '\u{2019}'
}
