//! Fakes for the application ports, shared by the unit tests.

use crate::gamemodes::HandlerDeps;
use crate::ports::chat_transport::{ChatTransport, Reactor, TransportError};
use crate::ports::round_events::RoundEventPublisher;
use crate::ports::stats::{StatsError, StatsRepository};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wordchain_domain::{MessageRef, ParticipantId, RoundEvent, RoundId, Token};

// ==================== Transport ====================

/// Records everything posted; reactions to read back are scripted.
pub struct RecordingTransport {
    next_ref: AtomicU64,
    posts: Mutex<Vec<(MessageRef, String)>>,
    reactions: Mutex<Vec<(MessageRef, String)>>,
    reactors: Mutex<HashMap<(MessageRef, String), Vec<Reactor>>>,
    fail_posts: AtomicBool,
    reaction_delay: Mutex<Option<Duration>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self {
            next_ref: AtomicU64::new(10_000),
            posts: Mutex::new(Vec::new()),
            reactions: Mutex::new(Vec::new()),
            reactors: Mutex::new(HashMap::new()),
            fail_posts: AtomicBool::new(false),
            reaction_delay: Mutex::new(None),
        }
    }

    pub fn fail_posts(&self) {
        self.fail_posts.store(true, Ordering::SeqCst);
    }

    /// Make every `add_reaction` take `delay`
    pub fn slow_reactions(&self, delay: Duration) {
        *self.reaction_delay.lock().unwrap() = Some(delay);
    }

    pub fn posts(&self) -> Vec<String> {
        self.posts.lock().unwrap().iter().map(|(_, c)| c.clone()).collect()
    }

    pub fn post_ref(&self, index: usize) -> MessageRef {
        self.posts.lock().unwrap()[index].0
    }

    pub fn last_post_ref(&self) -> Option<MessageRef> {
        self.posts.lock().unwrap().last().map(|(r, _)| *r)
    }

    pub fn reactions_on(&self, message: impl Into<MessageRef>) -> Vec<String> {
        let message = message.into();
        self.reactions
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, _)| *m == message)
            .map(|(_, e)| e.clone())
            .collect()
    }

    pub fn react_as(&self, message: MessageRef, emoji: &str, reactor: Reactor) {
        self.reactors
            .lock()
            .unwrap()
            .entry((message, emoji.to_string()))
            .or_default()
            .push(reactor);
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn post_message(&self, content: &str) -> Result<MessageRef, TransportError> {
        if self.fail_posts.load(Ordering::SeqCst) {
            return Err(TransportError::SendFailed("missing permissions".to_string()));
        }
        let id = MessageRef(self.next_ref.fetch_add(1, Ordering::SeqCst));
        self.posts.lock().unwrap().push((id, content.to_string()));
        Ok(id)
    }

    async fn add_reaction(&self, message: MessageRef, emoji: &str) -> Result<(), TransportError> {
        let delay = *self.reaction_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.reactions
            .lock()
            .unwrap()
            .push((message, emoji.to_string()));
        Ok(())
    }

    async fn reactors(
        &self,
        message: MessageRef,
        emoji: &str,
    ) -> Result<Vec<Reactor>, TransportError> {
        Ok(self
            .reactors
            .lock()
            .unwrap()
            .get(&(message, emoji.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}

// ==================== Stats ====================

#[derive(Default)]
pub struct MemoryStats {
    usage: Mutex<HashMap<ParticipantId, HashMap<String, u64>>>,
    contributions: Mutex<HashMap<ParticipantId, u64>>,
}

impl MemoryStats {
    pub fn usage_of(&self, author: u64, word: &str) -> u64 {
        self.usage
            .lock()
            .unwrap()
            .get(&ParticipantId(author))
            .and_then(|words| words.get(word).copied())
            .unwrap_or(0)
    }
}

#[async_trait]
impl StatsRepository for MemoryStats {
    async fn record_usage(&self, author: ParticipantId, normalized: &str) -> Result<(), StatsError> {
        *self
            .usage
            .lock()
            .unwrap()
            .entry(author)
            .or_default()
            .entry(normalized.to_string())
            .or_default() += 1;
        Ok(())
    }

    async fn record_contribution(&self, author: ParticipantId) -> Result<(), StatsError> {
        *self.contributions.lock().unwrap().entry(author).or_default() += 1;
        Ok(())
    }

    async fn top_tokens_by_author(
        &self,
        author: ParticipantId,
        n: usize,
    ) -> Result<Vec<String>, StatsError> {
        let usage = self.usage.lock().unwrap();
        let mut words: Vec<(String, u64)> = usage
            .get(&author)
            .map(|w| w.iter().map(|(k, v)| (k.clone(), *v)).collect())
            .unwrap_or_default();
        words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Ok(words.into_iter().take(n).map(|(w, _)| w).collect())
    }

    async fn total_contributions_by_author(
        &self,
        author: ParticipantId,
    ) -> Result<u64, StatsError> {
        Ok(self
            .contributions
            .lock()
            .unwrap()
            .get(&author)
            .copied()
            .unwrap_or(0))
    }
}

// ==================== Events ====================

#[derive(Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<RoundEvent>>,
}

impl RecordingPublisher {
    pub fn events(&self) -> Vec<RoundEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn started(&self) -> Vec<RoundEvent> {
        self.events()
            .into_iter()
            .filter(|e| matches!(e, RoundEvent::Started { .. }))
            .collect()
    }

    pub fn ended(&self) -> Vec<RoundEvent> {
        self.events()
            .into_iter()
            .filter(|e| matches!(e, RoundEvent::Ended { .. }))
            .collect()
    }

    pub fn ended_ids(&self) -> Vec<RoundId> {
        self.ended().iter().map(RoundEvent::round_id).collect()
    }

    /// Rendered summary of the last round-ended event
    pub fn last_summary(&self) -> Option<String> {
        self.ended().last().and_then(|e| match e {
            RoundEvent::Ended { summary, .. } => Some(summary.render()),
            RoundEvent::Started { .. } => None,
        })
    }
}

impl RoundEventPublisher for RecordingPublisher {
    fn publish(&self, event: RoundEvent) {
        self.events.lock().unwrap().push(event);
    }
}

// ==================== Fixtures ====================

/// The three fakes plus the deps bundle built from them
pub struct Harness {
    pub transport: Arc<RecordingTransport>,
    pub stats: Arc<MemoryStats>,
    pub events: Arc<RecordingPublisher>,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            transport: Arc::new(RecordingTransport::new()),
            stats: Arc::new(MemoryStats::default()),
            events: Arc::new(RecordingPublisher::default()),
        }
    }

    pub fn deps(&self) -> HandlerDeps {
        HandlerDeps::new(
            self.transport.clone(),
            self.stats.clone(),
            self.events.clone(),
        )
    }
}

pub fn token(source: u64, author: u64, value: &str) -> Token {
    Token::new(source, author, value, Utc::now())
}
