//! Port for publishing round lifecycle events.
//!
//! Handlers publish [`RoundEvent`]s here instead of talking to the
//! orchestrator or the chat directly. Subscribers include the announcer
//! (chat messages), the natural-end relay and the structured event log.

use wordchain_domain::RoundEvent;

/// Sink for round lifecycle events.
///
/// `publish` is synchronous and non-fallible so a missing subscriber or a
/// failing log never disrupts a round.
pub trait RoundEventPublisher: Send + Sync {
    fn publish(&self, event: RoundEvent);
}

/// No-op implementation for tests and when nothing listens.
pub struct NoRoundEvents;

impl RoundEventPublisher for NoRoundEvents {
    fn publish(&self, _event: RoundEvent) {}
}

/// A publisher that delegates to multiple inner publishers.
///
/// ```text
/// handler.publish(event)
///        |
///        +--> BroadcastEventBus  (announcer, natural-end relay)
///        +--> JsonlRoundLogger   (structured event log)
/// ```
pub struct CompositePublisher {
    delegates: Vec<std::sync::Arc<dyn RoundEventPublisher>>,
}

impl CompositePublisher {
    pub fn new(delegates: Vec<std::sync::Arc<dyn RoundEventPublisher>>) -> Self {
        Self { delegates }
    }
}

impl RoundEventPublisher for CompositePublisher {
    fn publish(&self, event: RoundEvent) {
        for d in &self.delegates {
            d.publish(event.clone());
        }
    }
}
