//! Domain layer for wordchain
//!
//! This crate contains the core game rules, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns and
//! performs no I/O.
//!
//! # Core Concepts
//!
//! ## Round
//!
//! Participants build a sentence one word ([`Token`]) at a time. A round
//! ends naturally when someone submits a word ending in a terminator.
//!
//! ## Game modes
//!
//! - **Plain**: the common rules only
//! - **Letter-constrained**: a letter poll first, then every word must (or
//!   must not) contain the winning letter
//! - **Reversed**: the closing sentence is read back to front
//!
//! ## Validation
//!
//! [`TokenValidator`] decides whether a single word is acceptable;
//! [`normalize`] maps it to the form used for statistics.

pub mod core;
pub mod featured;
pub mod letters;
pub mod round;
pub mod summary;
pub mod validation;
pub mod vote;

// Re-export commonly used types
pub use core::{
    config_issue::{ConfigIssue, ConfigIssueCode, Severity},
    error::DomainError,
    ids::{MessageRef, ParticipantId, RoundId},
};
pub use featured::FeaturedPolicy;
pub use letters::{ConstraintKind, LetterConstraint, LetterPool};
pub use round::{GameMode, Round, RoundEvent, RoundStatus, StartReason, Token, TokenRejection};
pub use summary::{
    ContributorLine, RoundSummary, compose_sentence, contributors_in_order, reverse_sentence,
};
pub use validation::{
    EmotePolicy, InvalidToken, TokenValidator, ValidationRules, normalize,
};
pub use vote::{TallyOutcome, VoteSession, VoteTally};
