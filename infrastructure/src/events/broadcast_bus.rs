//! In-process event bus backed by `tokio::sync::broadcast`.

use tokio::sync::broadcast;
use tracing::trace;
use wordchain_application::RoundEventPublisher;
use wordchain_domain::RoundEvent;

/// Default number of events buffered per subscriber
pub const DEFAULT_CAPACITY: usize = 64;

/// Round event bus
///
/// Publishing never blocks. Events published while nobody is subscribed are
/// dropped; a subscriber that falls more than `capacity` events behind sees
/// `RecvError::Lagged` and skips ahead.
pub struct BroadcastEventBus {
    sender: broadcast::Sender<RoundEvent>,
}

impl BroadcastEventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Subscribe to events published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<RoundEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundEventPublisher for BroadcastEventBus {
    fn publish(&self, event: RoundEvent) {
        let kind = event.event_type();
        let round_id = event.round_id();
        match self.sender.send(event) {
            Ok(receivers) => trace!(
                "Published {} for round {} to {} subscriber(s)",
                kind,
                round_id.short(),
                receivers
            ),
            Err(_) => trace!("Dropped {} for round {}: no subscribers", kind, round_id.short()),
        }
    }
}
