//! In-process chat channel.
//!
//! Messages get sequential ids. Reactions follow chat semantics: one
//! reaction per participant per emoji, and only on messages that exist.
//! Every post and reaction is also sent to an optional observer so a front
//! end can render the channel as it changes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::mpsc;
use tracing::debug;
use wordchain_application::{ChatTransport, Reactor, TransportError};
use wordchain_domain::{MessageRef, ParticipantId};

/// A message in the simulated channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMessage {
    pub id: MessageRef,
    pub author: ParticipantId,
    pub content: String,
}

/// Something that happened in the channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelActivity {
    Posted(ChannelMessage),
    Reacted {
        message: MessageRef,
        emoji: String,
        by: Reactor,
    },
}

#[derive(Debug, Default)]
struct ChannelState {
    next_id: u64,
    messages: Vec<ChannelMessage>,
    reactions: HashMap<(MessageRef, String), Vec<Reactor>>,
}

impl ChannelState {
    fn push(&mut self, author: ParticipantId, content: &str) -> ChannelMessage {
        self.next_id += 1;
        let message = ChannelMessage {
            id: MessageRef(self.next_id),
            author,
            content: content.to_string(),
        };
        self.messages.push(message.clone());
        message
    }

    fn exists(&self, id: MessageRef) -> bool {
        self.messages.iter().any(|m| m.id == id)
    }

    /// Returns false when the participant had already reacted with `emoji`
    fn react(
        &mut self,
        message: MessageRef,
        emoji: &str,
        by: Reactor,
    ) -> Result<bool, TransportError> {
        if !self.exists(message) {
            return Err(TransportError::MessageNotFound(message));
        }
        let reactors = self
            .reactions
            .entry((message, emoji.to_string()))
            .or_default();
        if reactors.iter().any(|r| r.participant == by.participant) {
            return Ok(false);
        }
        reactors.push(by);
        Ok(true)
    }
}

/// Simulated chat channel implementing [`ChatTransport`]
pub struct SimulatedChannel {
    bot_id: ParticipantId,
    state: Mutex<ChannelState>,
    observer: Option<mpsc::UnboundedSender<ChannelActivity>>,
}

impl SimulatedChannel {
    /// Create a channel in which the bot posts as `bot_id`
    pub fn new(bot_id: impl Into<ParticipantId>) -> Self {
        Self {
            bot_id: bot_id.into(),
            state: Mutex::new(ChannelState::default()),
            observer: None,
        }
    }

    /// Report every post and reaction to `observer`
    pub fn with_observer(mut self, observer: mpsc::UnboundedSender<ChannelActivity>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn bot_id(&self) -> ParticipantId {
        self.bot_id
    }

    /// A participant posts a message; returns its reference
    pub fn user_message(&self, author: impl Into<ParticipantId>, content: &str) -> MessageRef {
        let message = self.lock().push(author.into(), content);
        let id = message.id;
        self.notify(ChannelActivity::Posted(message));
        id
    }

    /// A participant reacts to a message
    ///
    /// Reacting twice with the same emoji has no further effect.
    pub fn react_as(
        &self,
        message: MessageRef,
        emoji: &str,
        participant: impl Into<ParticipantId>,
    ) -> Result<(), TransportError> {
        self.react(message, emoji, Reactor::human(participant))
    }

    pub fn message(&self, id: MessageRef) -> Option<ChannelMessage> {
        self.lock().messages.iter().find(|m| m.id == id).cloned()
    }

    /// Snapshot of every message, oldest first
    pub fn messages(&self) -> Vec<ChannelMessage> {
        self.lock().messages.clone()
    }

    /// Messages posted by the bot, oldest first
    pub fn bot_posts(&self) -> Vec<ChannelMessage> {
        self.lock()
            .messages
            .iter()
            .filter(|m| m.author == self.bot_id)
            .cloned()
            .collect()
    }

    fn react(&self, message: MessageRef, emoji: &str, by: Reactor) -> Result<(), TransportError> {
        let added = self.lock().react(message, emoji, by)?;
        if added {
            self.notify(ChannelActivity::Reacted {
                message,
                emoji: emoji.to_string(),
                by,
            });
        }
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ChannelState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn notify(&self, activity: ChannelActivity) {
        if let Some(observer) = &self.observer
            && observer.send(activity).is_err()
        {
            debug!("Channel observer has gone away");
        }
    }
}

#[async_trait]
impl ChatTransport for SimulatedChannel {
    async fn post_message(&self, content: &str) -> Result<MessageRef, TransportError> {
        let message = self.lock().push(self.bot_id, content);
        let id = message.id;
        self.notify(ChannelActivity::Posted(message));
        Ok(id)
    }

    async fn add_reaction(&self, message: MessageRef, emoji: &str) -> Result<(), TransportError> {
        self.react(message, emoji, Reactor::bot(self.bot_id))
    }

    async fn reactors(
        &self,
        message: MessageRef,
        emoji: &str,
    ) -> Result<Vec<Reactor>, TransportError> {
        let state = self.lock();
        if !state.exists(message) {
            return Err(TransportError::MessageNotFound(message));
        }
        Ok(state
            .reactions
            .get(&(message, emoji.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}
