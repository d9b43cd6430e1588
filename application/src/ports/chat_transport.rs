//! Chat transport port
//!
//! Defines how the game talks to the chat channel it runs in: posting
//! messages, reacting to them, and reading who reacted with what.

use async_trait::async_trait;
use futures::future::join_all;
use thiserror::Error;
use tracing::warn;
use wordchain_domain::{MessageRef, ParticipantId, VoteTally};

/// Errors that can occur during chat transport operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Send failed: {0}")]
    SendFailed(String),

    #[error("Message not found: {0}")]
    MessageNotFound(MessageRef),

    #[error("Reaction failed: {0}")]
    ReactionFailed(String),

    #[error("Transport closed")]
    Closed,
}

/// A participant that reacted to a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reactor {
    pub participant: ParticipantId,
    pub is_bot: bool,
}

impl Reactor {
    pub fn human(participant: impl Into<ParticipantId>) -> Self {
        Self {
            participant: participant.into(),
            is_bot: false,
        }
    }

    pub fn bot(participant: impl Into<ParticipantId>) -> Self {
        Self {
            participant: participant.into(),
            is_bot: true,
        }
    }
}

/// Gateway to the chat channel
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Post a message to the game channel
    async fn post_message(&self, content: &str) -> Result<MessageRef, TransportError>;

    /// React to a message as the bot
    async fn add_reaction(&self, message: MessageRef, emoji: &str) -> Result<(), TransportError>;

    /// Participants that reacted to `message` with `emoji`
    async fn reactors(
        &self,
        message: MessageRef,
        emoji: &str,
    ) -> Result<Vec<Reactor>, TransportError>;
}

/// Count the votes on a poll message
///
/// Each option is represented by one reaction emoji. Bot accounts and
/// `bot_id` are never counted. A failed reaction query counts as zero votes
/// for that option.
pub async fn tally_reactions<T: Clone + PartialEq>(
    transport: &dyn ChatTransport,
    poll: MessageRef,
    options: &[(T, String)],
    bot_id: Option<ParticipantId>,
) -> VoteTally<T> {
    let queries = options
        .iter()
        .map(|(_, emoji)| transport.reactors(poll, emoji));
    let results = join_all(queries).await;

    let counts = options
        .iter()
        .zip(results)
        .map(|((option, emoji), result)| {
            let votes = match result {
                Ok(reactors) => reactors
                    .iter()
                    .filter(|r| !r.is_bot && Some(r.participant) != bot_id)
                    .count(),
                Err(e) => {
                    warn!("Could not read {} reactions on poll {}: {}", emoji, poll, e);
                    0
                }
            };
            (option.clone(), votes)
        })
        .collect();

    VoteTally::from_counts(counts)
}
