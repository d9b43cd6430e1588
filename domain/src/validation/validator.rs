//! Acceptability predicate for candidate tokens

use super::emoji;
use super::rules::ValidationRules;
use super::{CONNECTIVES, CURRENCY_SYMBOLS, TERMINATORS, is_apostrophe};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Apostrophe shapes: contraction (`can't`, `'tis`), possessive (`dog's`,
/// `dogs'`), letter/number plural (`A's`), leading elision (`'cause`).
static APOSTROPHE_FORMS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:'?\w+'\w{1,2}|\w+'s|\w+s'|[A-Za-z0-9]'s|'\w+)$")
        .expect("apostrophe pattern is valid")
});

static CURRENCY_AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]+(?:\.[0-9]{2})?$").expect("currency pattern is valid")
});

/// Why a candidate word is not acceptable
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidToken {
    #[error("word is empty")]
    Empty,

    #[error("word contains a line break")]
    ContainsLineBreak,

    #[error("word contains whitespace")]
    ContainsWhitespace,

    #[error("word is {len} characters long (max {max})")]
    TooLong { len: usize, max: usize },

    #[error("an emoji must be the whole word")]
    EmojiNotAlone,

    #[error("emote {0} is not approved")]
    UnapprovedEmote(u64),

    #[error("character '{0}' is not allowed")]
    InvalidCharacter(char),

    #[error("word mixes letters and digits")]
    MixedLettersAndDigits,

    #[error("word has more than one connective")]
    TooManyConnectives,

    #[error("word has more than one terminator")]
    TooManyTerminators,

    #[error("'{0}' may only appear at the start or end of a word")]
    MisplacedPunctuation(char),

    #[error("apostrophe does not form a contraction, possessive or plural")]
    BadApostrophe,

    #[error("currency amount must be a whole number or have exactly two decimals")]
    BadCurrency,

    #[error("word repeats a letter {limit} or more times in a row")]
    RepeatedLetters { limit: usize },

    #[error("word must be all lowercase, all uppercase, or capitalised")]
    BadCapitalization,
}

/// Pure, side-effect-free validator for candidate tokens
///
/// # Example
///
/// ```
/// use wordchain_domain::validation::{InvalidToken, TokenValidator};
///
/// let validator = TokenValidator::default();
/// assert!(validator.is_acceptable("Hello,"));
/// assert!(validator.is_acceptable("can't"));
/// assert_eq!(validator.check("hello world"), Err(InvalidToken::ContainsWhitespace));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TokenValidator {
    rules: ValidationRules,
}

impl TokenValidator {
    pub fn new(rules: ValidationRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    pub fn is_acceptable(&self, candidate: &str) -> bool {
        self.check(candidate).is_ok()
    }

    /// Check every rule, returning the first one violated
    pub fn check(&self, candidate: &str) -> Result<(), InvalidToken> {
        if candidate.is_empty() {
            return Err(InvalidToken::Empty);
        }
        if candidate.contains(['\n', '\r']) {
            return Err(InvalidToken::ContainsLineBreak);
        }
        if candidate.chars().any(char::is_whitespace) {
            return Err(InvalidToken::ContainsWhitespace);
        }

        let len = candidate.chars().count();
        if len > self.rules.max_length {
            return Err(InvalidToken::TooLong {
                len,
                max: self.rules.max_length,
            });
        }

        if let Some(id) = emoji::custom_emote_id(candidate) {
            return if self.rules.emotes.allows(id) {
                Ok(())
            } else {
                Err(InvalidToken::UnapprovedEmote(id))
            };
        }
        if emoji::is_single_emoji(candidate) {
            return Ok(());
        }
        if emoji::count_sequences(candidate) > 0 {
            return Err(InvalidToken::EmojiNotAlone);
        }

        let body = unwrap_parentheses(candidate)?;

        if let Some(amount) = body.strip_prefix(CURRENCY_SYMBOLS) {
            return check_currency(amount);
        }

        self.check_word(body)
    }

    fn check_word(&self, body: &str) -> Result<(), InvalidToken> {
        if body.chars().filter(|c| CONNECTIVES.contains(c)).count() > 1 {
            return Err(InvalidToken::TooManyConnectives);
        }
        if body.chars().filter(|c| TERMINATORS.contains(c)).count() > 1 {
            return Err(InvalidToken::TooManyTerminators);
        }

        let core = body.strip_prefix(CONNECTIVES).unwrap_or(body);
        let core = core
            .strip_suffix(TERMINATORS)
            .or_else(|| core.strip_suffix(CONNECTIVES))
            .unwrap_or(core);

        for c in core.chars() {
            if CONNECTIVES.contains(&c) || TERMINATORS.contains(&c) {
                return Err(InvalidToken::MisplacedPunctuation(c));
            }
            if !(c.is_alphanumeric() || is_apostrophe(c)) {
                return Err(InvalidToken::InvalidCharacter(c));
            }
        }

        if core.chars().any(is_apostrophe) {
            let straight = core.replace('\u{2019}', "'");
            if !APOSTROPHE_FORMS.is_match(&straight) {
                return Err(InvalidToken::BadApostrophe);
            }
        } else if core.chars().any(char::is_alphabetic) && core.chars().any(char::is_numeric) {
            return Err(InvalidToken::MixedLettersAndDigits);
        }

        if longest_letter_run(core) >= self.rules.repeated_letter_limit {
            return Err(InvalidToken::RepeatedLetters {
                limit: self.rules.repeated_letter_limit,
            });
        }

        if !has_valid_capitalization(core) {
            return Err(InvalidToken::BadCapitalization);
        }

        Ok(())
    }
}

/// `(word)` is allowed as a whole-token form; any other parenthesis is not
fn unwrap_parentheses(candidate: &str) -> Result<&str, InvalidToken> {
    if !candidate.contains(['(', ')']) {
        return Ok(candidate);
    }

    let inner = candidate
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or(InvalidToken::MisplacedPunctuation('('))?;

    if inner.is_empty() || inner.contains(['(', ')']) {
        return Err(InvalidToken::MisplacedPunctuation('('));
    }
    if inner.chars().any(is_apostrophe) {
        return Err(InvalidToken::BadApostrophe);
    }
    Ok(inner)
}

fn check_currency(amount: &str) -> Result<(), InvalidToken> {
    let trimmed = amount
        .strip_suffix(TERMINATORS)
        .or_else(|| amount.strip_suffix(CONNECTIVES));

    if CURRENCY_AMOUNT.is_match(amount) || trimmed.is_some_and(|t| CURRENCY_AMOUNT.is_match(t)) {
        Ok(())
    } else {
        Err(InvalidToken::BadCurrency)
    }
}

fn longest_letter_run(word: &str) -> usize {
    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<char> = None;

    for c in word.chars().flat_map(char::to_lowercase) {
        if c.is_alphabetic() && previous == Some(c) {
            run += 1;
        } else {
            run = usize::from(c.is_alphabetic());
        }
        longest = longest.max(run);
        previous = Some(c);
    }

    longest
}

/// All lowercase, all uppercase, or one leading capital then lowercase.
/// Uncased scripts are ignored.
fn has_valid_capitalization(word: &str) -> bool {
    let cased: Vec<char> = word
        .chars()
        .filter(|c| c.is_uppercase() || c.is_lowercase())
        .collect();

    let Some((first, rest)) = cased.split_first() else {
        return true;
    };

    cased.iter().all(|c| c.is_uppercase())
        || cased.iter().all(|c| c.is_lowercase())
        || (first.is_uppercase() && rest.iter().all(|c| c.is_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::EmotePolicy;

    fn check(word: &str) -> Result<(), InvalidToken> {
        TokenValidator::default().check(word)
    }

    #[test]
    fn test_accepts_plain_words() {
        for word in ["hello", "Hello", "HELLO", "I", "a", "12345", "café"] {
            assert_eq!(check(word), Ok(()), "{word}");
        }
    }

    #[test]
    fn test_accepts_punctuated_words() {
        for word in ["hello,", "hello.", "why?", "-and", ";then", ",so.", "wow!", ".", "(aside)"] {
            assert_eq!(check(word), Ok(()), "{word}");
        }
    }

    #[test]
    fn test_accepts_apostrophes() {
        for word in ["can't", "it's", "dog's", "dogs'", "A's", "1990's", "'tis", "it\u{2019}s"] {
            assert_eq!(check(word), Ok(()), "{word}");
        }
    }

    #[test]
    fn test_accepts_currency() {
        for word in ["£69", "$5.50", "€100.", "¥3"] {
            assert_eq!(check(word), Ok(()), "{word}");
        }
    }

    #[test]
    fn test_accepts_single_emoji() {
        for word in ["😊", "👩\u{200D}👩\u{200D}👦", "<:custom_emoji:123456789>", "<a:custom_animated:123456789>"] {
            assert_eq!(check(word), Ok(()), "{word}");
        }
    }

    #[test]
    fn test_rejects_empty_and_whitespace() {
        assert_eq!(check(""), Err(InvalidToken::Empty));
        assert_eq!(check("   "), Err(InvalidToken::ContainsWhitespace));
        assert_eq!(check("hello world"), Err(InvalidToken::ContainsWhitespace));
        assert_eq!(check("hello\nworld"), Err(InvalidToken::ContainsLineBreak));
    }

    #[test]
    fn test_rejects_too_long() {
        let word = "a".repeat(3) + &"b".repeat(2).repeat(40);
        assert!(matches!(check(&word), Err(InvalidToken::TooLong { max: 70, .. })));
        let word: String = "ab".repeat(35);
        assert_eq!(check(&word), Ok(()));
    }

    #[test]
    fn test_rejects_mixed_letters_and_digits() {
        assert_eq!(check("hello1"), Err(InvalidToken::MixedLettersAndDigits));
        assert_eq!(check("1990s"), Err(InvalidToken::MixedLettersAndDigits));
    }

    #[test]
    fn test_rejects_bad_apostrophes() {
        assert_eq!(check("he'llowhwhwhw"), Err(InvalidToken::BadApostrophe));
        assert_eq!(check("a'b'c"), Err(InvalidToken::BadApostrophe));
    }

    #[test]
    fn test_rejects_embedded_punctuation() {
        assert_eq!(check("hello-world"), Err(InvalidToken::MisplacedPunctuation('-')));
        assert_eq!(check("e.g"), Err(InvalidToken::MisplacedPunctuation('.')));
        assert_eq!(check("hi.,"), Err(InvalidToken::MisplacedPunctuation('.')));
        assert_eq!(check(",hi,"), Err(InvalidToken::TooManyConnectives));
        assert_eq!(check("what?!"), Err(InvalidToken::TooManyTerminators));
    }

    #[test]
    fn test_rejects_bad_parentheses() {
        assert_eq!(check("(hello"), Err(InvalidToken::MisplacedPunctuation('(')));
        assert_eq!(check("hel(lo)"), Err(InvalidToken::MisplacedPunctuation('(')));
        assert_eq!(check("()"), Err(InvalidToken::MisplacedPunctuation('(')));
    }

    #[test]
    fn test_rejects_bad_currency() {
        assert_eq!(check("$5.5"), Err(InvalidToken::BadCurrency));
        assert_eq!(check("$abc"), Err(InvalidToken::BadCurrency));
        assert_eq!(check("£"), Err(InvalidToken::BadCurrency));
        assert_eq!(check("5$"), Err(InvalidToken::InvalidCharacter('$')));
    }

    #[test]
    fn test_rejects_repeated_letters() {
        assert_eq!(check("cooool"), Err(InvalidToken::RepeatedLetters { limit: 4 }));
        assert_eq!(check("Cccc"), Err(InvalidToken::RepeatedLetters { limit: 4 }));
        assert_eq!(check("cool"), Ok(()));
        assert_eq!(check("1000"), Ok(()));
    }

    #[test]
    fn test_rejects_bad_capitalization() {
        assert_eq!(check("hELLO"), Err(InvalidToken::BadCapitalization));
        assert_eq!(check("HeLLo"), Err(InvalidToken::BadCapitalization));
    }

    #[test]
    fn test_rejects_multiple_emoji() {
        assert_eq!(check("😊😊"), Err(InvalidToken::EmojiNotAlone));
        assert_eq!(check("hi😊"), Err(InvalidToken::EmojiNotAlone));
        assert_eq!(
            check("<:custom_emoji:123456789><:another_emoji:987654321>"),
            Err(InvalidToken::InvalidCharacter('<'))
        );
    }

    #[test]
    fn test_emote_allowlist() {
        let rules = ValidationRules::default()
            .with_emotes(EmotePolicy::Allowlist([123].into_iter().collect()));
        let validator = TokenValidator::new(rules);
        assert!(validator.is_acceptable("<:ok:123>"));
        assert_eq!(
            validator.check("<:nope:456>"),
            Err(InvalidToken::UnapprovedEmote(456))
        );
    }

    #[test]
    fn test_check_is_deterministic() {
        let validator = TokenValidator::default();
        for word in ["hello", "he'llowhwhwhw", "😊", "$5.50", "cooool"] {
            assert_eq!(validator.check(word), validator.check(word));
        }
    }
}
