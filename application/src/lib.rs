//! Application layer for wordchain
//!
//! This crate contains the round orchestrator, the gamemode handlers, port
//! definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod gamemodes;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use config::{GameConfig, ReactionEmotes};
pub use gamemodes::{
    AddOutcome, GamemodeHandler, HandlerDeps, LetterVoteHandler, ModeRegistry,
    PlainChainHandler, ReversedHandler, RoundError,
};
pub use ports::{
    chat_transport::{ChatTransport, Reactor, TransportError},
    round_events::{CompositePublisher, NoRoundEvents, RoundEventPublisher},
    stats::{StatsError, StatsRepository},
};
pub use use_cases::mode_vote::{ModeVoteError, ModeVoteOutcome, ModeVoteUseCase};
pub use use_cases::natural_end_relay::NaturalEndRelay;
pub use use_cases::orchestrate_rounds::RoundOrchestrator;
