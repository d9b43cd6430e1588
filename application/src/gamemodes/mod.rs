//! Gamemode handlers
//!
//! A handler owns one round's state for as long as that round is active.
//! All three modes share the contribution protocol implemented by
//! [`chain::ChainCore`]; they differ in how a round opens (the letter poll)
//! and how the closing sentence is composed (reversed mode).
//!
//! Handlers never start rounds. When a round ends they publish
//! [`RoundEvent::Ended`](wordchain_domain::RoundEvent::Ended) and the
//! orchestrator decides what happens next.

pub mod chain;
pub mod error;
pub mod letters;
pub mod plain;
pub mod registry;
pub mod reversed;

pub use error::RoundError;
pub use letters::LetterVoteHandler;
pub use plain::PlainChainHandler;
pub use registry::ModeRegistry;
pub use reversed::ReversedHandler;

use crate::ports::chat_transport::ChatTransport;
use crate::ports::round_events::RoundEventPublisher;
use crate::ports::stats::StatsRepository;
use async_trait::async_trait;
use std::sync::Arc;
use wordchain_domain::{GameMode, MessageRef, RoundId, RoundStatus, Token};

/// What happened to an accepted token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Appended; the round continues
    Accepted,
    /// Appended and ended the sentence; the round has ended
    Completed,
}

/// Collaborators every handler needs
#[derive(Clone)]
pub struct HandlerDeps {
    pub transport: Arc<dyn ChatTransport>,
    pub stats: Arc<dyn StatsRepository>,
    pub events: Arc<dyn RoundEventPublisher>,
}

impl HandlerDeps {
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        stats: Arc<dyn StatsRepository>,
        events: Arc<dyn RoundEventPublisher>,
    ) -> Self {
        Self {
            transport,
            stats,
            events,
        }
    }
}

/// One round of one mode
///
/// A handler instance serves a single round: the orchestrator creates a
/// fresh one through the [`ModeRegistry`] for every start.
#[async_trait]
pub trait GamemodeHandler: Send + Sync {
    /// The mode this handler plays
    fn mode(&self) -> GameMode;

    fn round_id(&self) -> Option<RoundId>;

    fn assign_round_id(&self, id: RoundId);

    fn status(&self) -> RoundStatus;

    /// Force the round into `Ended` without a summary or event
    fn mark_ended(&self);

    /// Reset the chain, enter the mode's initial phase and announce the round
    async fn start(&self) -> Result<(), RoundError>;

    /// Validate and append a token; ends the round on a terminating word
    async fn add_token(&self, token: Token) -> Result<AddOutcome, RoundError>;

    /// Remove the token submitted in `source_ref`
    async fn remove_token(&self, source_ref: MessageRef) -> Result<Token, RoundError>;

    /// End the round and publish its summary. A second call is a no-op.
    async fn end(&self) -> Result<(), RoundError>;
}
