//! Natural-end relay
//!
//! Handlers announce the end of a round on the event bus and nothing else.
//! The relay listens there and turns every round-ended event into a
//! [`RoundOrchestrator::natural_end`] call, so the decision about what comes
//! next stays with the orchestrator.

use super::orchestrate_rounds::RoundOrchestrator;
use crate::gamemodes::RoundError;
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use wordchain_domain::RoundEvent;

pub struct NaturalEndRelay {
    orchestrator: Arc<RoundOrchestrator>,
}

impl NaturalEndRelay {
    pub fn new(orchestrator: Arc<RoundOrchestrator>) -> Self {
        Self { orchestrator }
    }

    /// Forward round-ended events until cancelled or the bus closes
    pub async fn run(self, mut events: broadcast::Receiver<RoundEvent>, cancel: CancellationToken) {
        loop {
            let event = tokio::select! {
                _ = cancel.cancelled() => break,
                event = events.recv() => event,
            };

            match event {
                Ok(RoundEvent::Ended {
                    round_id, summary, ..
                }) => match self.orchestrator.natural_end(round_id, &summary).await {
                    Ok(Some(next)) => debug!("Round {} followed by {}", round_id.short(), next.short()),
                    Ok(None) => {}
                    Err(RoundError::MismatchedRound(_)) => {}
                    Err(e) => error!("Could not start the next round: {}", e),
                },
                Ok(RoundEvent::Started { .. }) => {}
                Err(RecvError::Lagged(missed)) => {
                    warn!("Natural-end relay missed {} events", missed);
                }
                Err(RecvError::Closed) => break,
            }
        }
        info!("Natural-end relay stopped");
    }
}
