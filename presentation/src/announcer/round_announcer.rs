//! Round announcer
//!
//! Turns round lifecycle events into chat messages: a banner when a round
//! starts and the rendered summary when it ends.

use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use wordchain_application::ChatTransport;
use wordchain_domain::{GameMode, RoundEvent, RoundSummary};

pub struct RoundAnnouncer {
    transport: Arc<dyn ChatTransport>,
}

impl RoundAnnouncer {
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        Self { transport }
    }

    /// Chat text announcing a new round
    pub fn start_message(mode: GameMode, banner: &str) -> String {
        format!("**{}**\n{}", mode.display_name(), banner)
    }

    /// Chat text closing a round
    pub fn end_message(summary: &RoundSummary) -> String {
        summary.render()
    }

    /// Post one event to the channel
    pub async fn announce(&self, event: &RoundEvent) {
        let content = match event {
            RoundEvent::Started { mode, banner, .. } => Self::start_message(*mode, banner),
            RoundEvent::Ended { summary, .. } => Self::end_message(summary),
        };

        if let Err(e) = self.transport.post_message(&content).await {
            warn!(
                "Could not announce {} for round {}: {}",
                event.event_type(),
                event.round_id().short(),
                e
            );
        }
    }

    /// Announce events until cancelled or the bus closes
    pub async fn run(self, mut events: broadcast::Receiver<RoundEvent>, cancel: CancellationToken) {
        loop {
            let event = tokio::select! {
                _ = cancel.cancelled() => break,
                event = events.recv() => event,
            };

            match event {
                Ok(event) => self.announce(&event).await,
                Err(RecvError::Lagged(missed)) => {
                    warn!("Round announcer missed {} events", missed);
                }
                Err(RecvError::Closed) => break,
            }
        }
        info!("Round announcer stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use wordchain_application::{Reactor, TransportError};
    use wordchain_domain::{ContributorLine, MessageRef, ParticipantId, RoundId};

    #[derive(Default)]
    struct Posts {
        posts: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl ChatTransport for Posts {
        async fn post_message(&self, content: &str) -> Result<MessageRef, TransportError> {
            if self.fail {
                return Err(TransportError::Closed);
            }
            let mut posts = self.posts.lock().unwrap();
            posts.push(content.to_string());
            Ok(MessageRef(posts.len() as u64))
        }

        async fn add_reaction(&self, _: MessageRef, _: &str) -> Result<(), TransportError> {
            Ok(())
        }

        async fn reactors(&self, _: MessageRef, _: &str) -> Result<Vec<Reactor>, TransportError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_start_message() {
        assert_eq!(
            RoundAnnouncer::start_message(GameMode::Reversed, "Go!"),
            "**Reversed Sentence**\nGo!"
        );
    }

    #[tokio::test]
    async fn test_run_posts_banner_then_summary() {
        let posts = Arc::new(Posts::default());
        let (tx, rx) = broadcast::channel(8);
        let cancel = CancellationToken::new();
        let task = tokio::spawn(RoundAnnouncer::new(posts.clone()).run(rx, cancel.clone()));

        let id = RoundId::new();
        tx.send(RoundEvent::Started {
            round_id: id,
            mode: GameMode::Plain,
            banner: "Begin".to_string(),
        })
        .unwrap();
        tx.send(RoundEvent::Ended {
            round_id: id,
            mode: GameMode::Plain,
            summary: RoundSummary::constructed(
                "The cat sat.",
                vec![ContributorLine {
                    author: ParticipantId(4),
                    top_token: None,
                    total: 1,
                }],
            ),
        })
        .unwrap();
        drop(tx);
        task.await.unwrap();

        let posts = posts.posts.lock().unwrap().clone();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0], "**Plain Chain**\nBegin");
        assert!(posts[1].contains("# The cat sat."));
        assert!(posts[1].contains("<@4> [ Total contributions: 1 ]"));
    }

    #[tokio::test]
    async fn test_post_failure_is_not_fatal() {
        let posts = Arc::new(Posts {
            fail: true,
            ..Default::default()
        });
        let announcer = RoundAnnouncer::new(posts.clone());
        announcer
            .announce(&RoundEvent::Ended {
                round_id: RoundId::new(),
                mode: GameMode::Plain,
                summary: RoundSummary::empty(),
            })
            .await;
        assert!(posts.posts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_stops_the_loop() {
        let posts = Arc::new(Posts::default());
        let (_tx, rx) = broadcast::channel::<RoundEvent>(8);
        let cancel = CancellationToken::new();
        let task = tokio::spawn(RoundAnnouncer::new(posts).run(rx, cancel.clone()));
        cancel.cancel();
        task.await.unwrap();
    }
}
