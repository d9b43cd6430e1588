//! Round domain
//!
//! A round is one play-through of a [`GameMode`]: participants take turns
//! contributing single [`Token`]s until one of them ends the sentence.
//!
//! # Lifecycle
//!
//! ```text
//! (none) ──▶ Voting ──▶ ProcessingVotes ──▶ InProgress ──▶ Ended ──▶ (none)
//!              │               │                              ▲
//!              └───────────────┴──────── (no votes) ──────────┘
//! ```
//!
//! `Voting` and `ProcessingVotes` only occur in [`GameMode::LetterConstrained`];
//! the other modes go straight to `InProgress`.

pub mod entities;
pub mod events;
pub mod mode;
pub mod rejection;
pub mod status;
pub mod token;

pub use entities::Round;
pub use events::{RoundEvent, StartReason};
pub use mode::GameMode;
pub use rejection::TokenRejection;
pub use status::RoundStatus;
pub use token::Token;
