//! Round orchestration use case
//!
//! [`RoundOrchestrator`] is the single owner of "which round, if any, is
//! active". Every external request (start, force-end, add, remove) and every
//! natural end goes through it.
//!
//! # Locking
//!
//! The `{ active handler, last completed id, pending featured mode }` triple
//! lives behind one async mutex. Starting and force-ending hold it for the
//! whole transition so two transitions never interleave. Token submissions
//! hold it only long enough to find the active handler; the handler does
//! its own (transport and stats) work after the region is released.
//!
//! A natural end decides the next mode inside the region, releases it, and
//! then re-enters to start that mode. The re-entry checks that nothing else
//! started a round in between.

use crate::config::GameConfig;
use crate::gamemodes::{AddOutcome, GamemodeHandler, ModeRegistry, RoundError};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use wordchain_domain::{
    FeaturedPolicy, GameMode, MessageRef, RoundId, RoundStatus, RoundSummary, StartReason, Token,
};

#[derive(Default)]
struct OrchestratorState {
    active: Option<Arc<dyn GamemodeHandler>>,
    last_completed: Option<RoundId>,
    pending_featured: Option<GameMode>,
}

pub struct RoundOrchestrator {
    registry: ModeRegistry,
    featured: FeaturedPolicy,
    add_token_timeout: Duration,
    state: Mutex<OrchestratorState>,
    rng: std::sync::Mutex<StdRng>,
}

impl RoundOrchestrator {
    pub fn new(registry: ModeRegistry, config: &GameConfig) -> Self {
        Self {
            registry,
            featured: config.featured.clone(),
            add_token_timeout: config.add_token_timeout,
            state: Mutex::new(OrchestratorState::default()),
            rng: std::sync::Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Use a seeded generator for next-mode and featured picks
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = std::sync::Mutex::new(rng);
        self
    }

    // ==================== Transitions ====================

    /// Start a round of `mode`, force-ending the active one first
    ///
    /// Explicit starts clear the pending featured override and the
    /// completed-round marker. If the handler fails to start, no round is
    /// active afterwards and the error is returned.
    pub async fn start_round(
        &self,
        mode: GameMode,
        reason: StartReason,
    ) -> Result<RoundId, RoundError> {
        let mut state = self.state.lock().await;

        if state.active.is_some() {
            self.terminate_locked(&mut state, "replaced by a new round")
                .await;
        }

        if reason.is_explicit() {
            state.pending_featured = None;
            state.last_completed = None;
        }

        self.launch(&mut state, mode, reason).await
    }

    /// End the active round unconditionally
    ///
    /// Returns `false` when no round was active. Errors from the handler's
    /// own end are logged; the round is cleared regardless.
    pub async fn force_terminate(&self, reason: &str) -> bool {
        let mut state = self.state.lock().await;
        if state.active.is_none() {
            debug!("Force-terminate ({}) with no active round", reason);
            return false;
        }
        self.terminate_locked(&mut state, reason).await;
        true
    }

    /// Handle a round that ended by itself
    ///
    /// Duplicate and stale signals are expected traffic: they are rejected
    /// with [`RoundError::MismatchedRound`] and change nothing. Otherwise the
    /// round is retired and the next one started: the featured override if
    /// the policy picks one, a uniformly random registered mode if not.
    /// Returns the id of the round started next, or `None` when an explicit
    /// start got there first.
    pub async fn natural_end(
        &self,
        round_id: RoundId,
        summary: &RoundSummary,
    ) -> Result<Option<RoundId>, RoundError> {
        let fallback = {
            let mut state = self.state.lock().await;

            if state.last_completed == Some(round_id) {
                debug!("Ignoring duplicate end of round {}", round_id.short());
                return Err(RoundError::MismatchedRound(round_id));
            }

            match state.active.as_ref().map(|h| h.round_id() == Some(round_id)) {
                Some(true) => {}
                Some(false) => {
                    debug!("Ignoring end of round {}: not the active round", round_id.short());
                    return Err(RoundError::MismatchedRound(round_id));
                }
                None => {
                    debug!("Ignoring end of round {}: no active round", round_id.short());
                    return Err(RoundError::MismatchedRound(round_id));
                }
            }

            let Some(handler) = state.active.take() else {
                return Err(RoundError::MismatchedRound(round_id));
            };
            handler.mark_ended();
            state.last_completed = Some(round_id);

            let ended = handler.mode();
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            state.pending_featured = self
                .featured
                .try_select(ended, &mut *rng)
                .filter(|mode| self.registry.contains(*mode));
            let fallback = self
                .registry
                .modes()
                .choose(&mut *rng)
                .copied()
                .unwrap_or(ended);

            info!(
                "Round {} ({}) ended naturally: {}{}",
                round_id.short(),
                ended,
                summary.headline,
                state
                    .pending_featured
                    .map(|m| format!(" [featured next: {}]", m))
                    .unwrap_or_default()
            );
            fallback
        };

        self.start_next(round_id, fallback).await
    }

    /// Second half of a natural end, after the region was released
    async fn start_next(
        &self,
        after: RoundId,
        fallback: GameMode,
    ) -> Result<Option<RoundId>, RoundError> {
        let mut state = self.state.lock().await;
        if state.active.is_some() || state.last_completed != Some(after) {
            info!(
                "Not starting a round after {}: another start took over",
                after.short()
            );
            return Ok(None);
        }
        self.launch(&mut state, fallback, StartReason::Natural)
            .await
            .map(Some)
    }

    async fn launch(
        &self,
        state: &mut OrchestratorState,
        requested: GameMode,
        reason: StartReason,
    ) -> Result<RoundId, RoundError> {
        let mode = match reason {
            StartReason::Natural => state.pending_featured.take().unwrap_or(requested),
            _ => requested,
        };

        let handler = self.registry.create(mode)?;
        if let Err(e) = handler.start().await {
            handler.mark_ended();
            warn!("Failed to start {} round ({}): {}", mode, reason, e);
            return Err(e);
        }

        let id = match handler.round_id() {
            Some(id) => id,
            None => {
                let id = RoundId::new();
                handler.assign_round_id(id);
                id
            }
        };

        info!("Started {} round {} ({})", mode, id.short(), reason);
        state.active = Some(handler);
        Ok(id)
    }

    async fn terminate_locked(&self, state: &mut OrchestratorState, reason: &str) {
        let Some(handler) = state.active.take() else {
            return;
        };
        if let Err(e) = handler.end().await {
            warn!("Round end failed during force-terminate: {}", e);
        }
        handler.mark_ended();
        state.last_completed = handler.round_id();
        info!(
            "Force-terminated {} round {} ({})",
            handler.mode(),
            handler.round_id().map(|id| id.short()).unwrap_or_default(),
            reason
        );
    }

    // ==================== Token Routing ====================

    /// Route a submitted word to the active round
    ///
    /// The handler runs on its own task so an accepted word always finishes
    /// (stats, reactions, the round end). Only the wait is bounded by the
    /// add-token timeout; a caller that overruns stops waiting.
    pub async fn submit_add(&self, token: Token) -> Result<AddOutcome, RoundError> {
        let handler = self.in_progress_handler().await?;
        let task = tokio::spawn(async move { handler.add_token(token).await });
        match tokio::time::timeout(self.add_token_timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                warn!("Add-token task failed: {}", e);
                Err(RoundError::TaskFailed(e.to_string()))
            }
            Err(_) => {
                warn!(
                    "Add-token processing exceeded {:?}; no longer waiting",
                    self.add_token_timeout
                );
                Err(RoundError::Timeout(self.add_token_timeout))
            }
        }
    }

    /// Route a deleted message to the active round
    pub async fn submit_remove(&self, source_ref: MessageRef) -> Result<Token, RoundError> {
        let handler = self.in_progress_handler().await?;
        handler.remove_token(source_ref).await
    }

    async fn in_progress_handler(&self) -> Result<Arc<dyn GamemodeHandler>, RoundError> {
        let state = self.state.lock().await;
        let handler = state.active.as_ref().ok_or(RoundError::NoActiveRound)?;
        match handler.status() {
            RoundStatus::InProgress => Ok(Arc::clone(handler)),
            status => Err(RoundError::NotInProgress(status)),
        }
    }

    // ==================== Queries ====================

    pub async fn current_mode(&self) -> Option<GameMode> {
        self.state.lock().await.active.as_ref().map(|h| h.mode())
    }

    pub async fn current_status(&self) -> Option<RoundStatus> {
        self.state.lock().await.active.as_ref().map(|h| h.status())
    }

    pub async fn is_round_running(&self) -> bool {
        self.current_status().await.is_some_and(|s| s.is_active())
    }

    pub async fn active_round_id(&self) -> Option<RoundId> {
        self.state
            .lock()
            .await
            .active
            .as_ref()
            .and_then(|h| h.round_id())
    }

    pub async fn pending_featured(&self) -> Option<GameMode> {
        self.state.lock().await.pending_featured
    }

    pub fn registered_modes(&self) -> Vec<GameMode> {
        self.registry.modes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Harness, token};
    use futures::future::join_all;
    use wordchain_domain::RoundEvent;

    fn orchestrator(harness: &Harness, config: &GameConfig) -> Arc<RoundOrchestrator> {
        let registry = ModeRegistry::standard(harness.deps(), config);
        Arc::new(RoundOrchestrator::new(registry, config).with_rng(StdRng::seed_from_u64(5)))
    }

    fn plain_only() -> GameConfig {
        GameConfig::default().with_enabled_modes([GameMode::Plain])
    }

    async fn play_the_cat_sat(orchestrator: &RoundOrchestrator) {
        for (i, word) in ["The", "cat", "sat."].iter().enumerate() {
            orchestrator
                .submit_add(token(i as u64, i as u64, word))
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_start_round() {
        let harness = Harness::new();
        let orchestrator = orchestrator(&harness, &plain_only());

        let id = orchestrator
            .start_round(GameMode::Plain, StartReason::Startup)
            .await
            .unwrap();

        assert_eq!(orchestrator.active_round_id().await, Some(id));
        assert_eq!(orchestrator.current_mode().await, Some(GameMode::Plain));
        assert_eq!(
            orchestrator.current_status().await,
            Some(RoundStatus::InProgress)
        );
        assert!(orchestrator.is_round_running().await);
        assert_eq!(harness.events.started().len(), 1);
    }

    #[tokio::test]
    async fn test_start_replaces_active_round() {
        let harness = Harness::new();
        let orchestrator = orchestrator(&harness, &GameConfig::default());

        let first = orchestrator
            .start_round(GameMode::Plain, StartReason::Manual)
            .await
            .unwrap();
        let second = orchestrator
            .start_round(GameMode::Reversed, StartReason::Manual)
            .await
            .unwrap();

        assert_ne!(first, second);
        assert_eq!(harness.events.ended_ids(), vec![first]);
        assert_eq!(orchestrator.current_mode().await, Some(GameMode::Reversed));
    }

    #[tokio::test]
    async fn test_submit_without_round() {
        let harness = Harness::new();
        let orchestrator = orchestrator(&harness, &plain_only());

        assert_eq!(
            orchestrator.submit_add(token(1, 1, "hello")).await,
            Err(RoundError::NoActiveRound)
        );
        assert_eq!(
            orchestrator.submit_remove(MessageRef(1)).await.unwrap_err(),
            RoundError::NoActiveRound
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_while_voting() {
        let harness = Harness::new();
        let orchestrator = orchestrator(&harness, &GameConfig::default());
        orchestrator
            .start_round(GameMode::LetterConstrained, StartReason::Manual)
            .await
            .unwrap();

        assert_eq!(
            orchestrator.submit_add(token(1, 1, "hello")).await,
            Err(RoundError::NotInProgress(RoundStatus::Voting))
        );
        assert!(orchestrator.is_round_running().await);
    }

    #[tokio::test]
    async fn test_consecutive_author_leaves_chain_unchanged() {
        let harness = Harness::new();
        let orchestrator = orchestrator(&harness, &plain_only());
        orchestrator
            .start_round(GameMode::Plain, StartReason::Manual)
            .await
            .unwrap();

        orchestrator.submit_add(token(1, 7, "The")).await.unwrap();
        let err = orchestrator.submit_add(token(2, 7, "cat")).await.unwrap_err();
        assert!(matches!(err, RoundError::Rejected(_)));

        // the rejected message was never part of the chain
        assert_eq!(
            orchestrator.submit_remove(MessageRef(2)).await.unwrap_err(),
            RoundError::TokenNotFound(MessageRef(2))
        );
        assert!(orchestrator.submit_remove(MessageRef(1)).await.is_ok());
    }

    #[tokio::test]
    async fn test_natural_end_starts_next_round_once() {
        let harness = Harness::new();
        let orchestrator = orchestrator(&harness, &plain_only());
        let first = orchestrator
            .start_round(GameMode::Plain, StartReason::Startup)
            .await
            .unwrap();

        play_the_cat_sat(&orchestrator).await;
        assert_eq!(harness.events.ended_ids(), vec![first]);
        let summary = harness.events.last_summary().unwrap();
        assert!(summary.contains("The cat sat."));

        let next = orchestrator
            .natural_end(first, &RoundSummary::empty())
            .await
            .unwrap()
            .unwrap();
        assert_ne!(next, first);
        assert_eq!(orchestrator.active_round_id().await, Some(next));

        let again = orchestrator.natural_end(first, &RoundSummary::empty()).await;
        assert_eq!(again, Err(RoundError::MismatchedRound(first)));
        assert_eq!(harness.events.started().len(), 2);
        assert_eq!(orchestrator.active_round_id().await, Some(next));
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_natural_ends() {
        let harness = Harness::new();
        let orchestrator = orchestrator(&harness, &plain_only());
        let first = orchestrator
            .start_round(GameMode::Plain, StartReason::Startup)
            .await
            .unwrap();
        play_the_cat_sat(&orchestrator).await;

        let summary = RoundSummary::empty();
        let results = join_all((0..4).map(|_| orchestrator.natural_end(first, &summary))).await;

        let started: Vec<_> = results.iter().filter(|r| r.is_ok()).collect();
        assert_eq!(started.len(), 1);
        assert_eq!(harness.events.started().len(), 2);
    }

    #[tokio::test]
    async fn test_mismatched_natural_end_is_ignored() {
        let harness = Harness::new();
        let orchestrator = orchestrator(&harness, &plain_only());
        let active = orchestrator
            .start_round(GameMode::Plain, StartReason::Startup)
            .await
            .unwrap();

        let stranger = RoundId::new();
        assert_eq!(
            orchestrator.natural_end(stranger, &RoundSummary::empty()).await,
            Err(RoundError::MismatchedRound(stranger))
        );
        assert_eq!(orchestrator.active_round_id().await, Some(active));
        assert_eq!(harness.events.started().len(), 1);
    }

    #[tokio::test]
    async fn test_force_terminate() {
        let harness = Harness::new();
        let orchestrator = orchestrator(&harness, &plain_only());
        assert!(!orchestrator.force_terminate("nothing to end").await);

        let id = orchestrator
            .start_round(GameMode::Plain, StartReason::Manual)
            .await
            .unwrap();
        assert!(orchestrator.force_terminate("operator").await);
        assert!(!orchestrator.is_round_running().await);
        assert_eq!(harness.events.ended_ids(), vec![id]);

        // the handler's own end event must not start another round
        assert_eq!(
            orchestrator.natural_end(id, &RoundSummary::empty()).await,
            Err(RoundError::MismatchedRound(id))
        );
        assert_eq!(orchestrator.active_round_id().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_start_leaves_orchestrator_idle() {
        let harness = Harness::new();
        let orchestrator = orchestrator(&harness, &GameConfig::default());
        let previous = orchestrator
            .start_round(GameMode::Plain, StartReason::Manual)
            .await
            .unwrap();

        harness.transport.fail_posts();
        let err = orchestrator
            .start_round(GameMode::LetterConstrained, StartReason::Manual)
            .await
            .unwrap_err();

        assert!(matches!(err, RoundError::StartFailed { .. }));
        assert_eq!(orchestrator.active_round_id().await, None);
        assert!(!orchestrator.is_round_running().await);
        assert_eq!(harness.events.ended_ids(), vec![previous]);
    }

    #[tokio::test]
    async fn test_unregistered_mode() {
        let harness = Harness::new();
        let orchestrator = orchestrator(&harness, &plain_only());
        assert_eq!(
            orchestrator
                .start_round(GameMode::Reversed, StartReason::Manual)
                .await,
            Err(RoundError::ModeNotRegistered(GameMode::Reversed))
        );
    }

    #[tokio::test]
    async fn test_featured_override_is_used_once() {
        let harness = Harness::new();
        let config = GameConfig::default()
            .with_enabled_modes([GameMode::Plain, GameMode::Reversed])
            .with_featured(FeaturedPolicy::new(1.0, [GameMode::Reversed]));
        let orchestrator = orchestrator(&harness, &config);

        let first = orchestrator
            .start_round(GameMode::Plain, StartReason::Startup)
            .await
            .unwrap();
        play_the_cat_sat(&orchestrator).await;
        orchestrator
            .natural_end(first, &RoundSummary::empty())
            .await
            .unwrap();

        assert_eq!(orchestrator.current_mode().await, Some(GameMode::Reversed));
        assert_eq!(orchestrator.pending_featured().await, None);
    }

    #[tokio::test]
    async fn test_explicit_start_after_force_end_ignores_old_end_signal() {
        let harness = Harness::new();
        let orchestrator = orchestrator(&harness, &plain_only());
        let first = orchestrator
            .start_round(GameMode::Plain, StartReason::Manual)
            .await
            .unwrap();
        let second = orchestrator
            .start_round(GameMode::Plain, StartReason::Manual)
            .await
            .unwrap();

        // the first round's end event arrives late
        assert!(
            orchestrator
                .natural_end(first, &RoundSummary::empty())
                .await
                .is_err()
        );
        assert_eq!(orchestrator.active_round_id().await, Some(second));
        assert_eq!(harness.events.started().len(), 2);
    }

    #[tokio::test]
    async fn test_at_most_one_active_round_under_concurrent_starts() {
        let harness = Harness::new();
        let orchestrator = orchestrator(&harness, &GameConfig::default());

        let starts = (0..8).map(|i| {
            let orchestrator = Arc::clone(&orchestrator);
            let mode = GameMode::ALL[i % 2 * 2];
            tokio::spawn(async move { orchestrator.start_round(mode, StartReason::Manual).await })
        });
        let ids: Vec<RoundId> = join_all(starts)
            .await
            .into_iter()
            .map(|r| r.unwrap().unwrap())
            .collect();

        let events = harness.events.events();
        let started = events
            .iter()
            .filter(|e| matches!(e, RoundEvent::Started { .. }))
            .count();
        let ended = events
            .iter()
            .filter(|e| matches!(e, RoundEvent::Ended { .. }))
            .count();
        assert_eq!(started, 8);
        assert_eq!(started - ended, 1);

        let active = orchestrator.active_round_id().await.unwrap();
        assert!(ids.contains(&active));
        assert!(!harness.events.ended_ids().contains(&active));
    }

    #[tokio::test]
    async fn test_unknown_end_between_natural_end_and_next_start() {
        let harness = Harness::new();
        let orchestrator = orchestrator(&harness, &plain_only());
        let first = orchestrator
            .start_round(GameMode::Plain, StartReason::Startup)
            .await
            .unwrap();
        play_the_cat_sat(&orchestrator).await;

        // queue the valid end, then an unknown one, behind a held region
        let held = orchestrator.state.lock().await;
        let valid = tokio::spawn({
            let orchestrator = Arc::clone(&orchestrator);
            async move { orchestrator.natural_end(first, &RoundSummary::empty()).await }
        });
        tokio::task::yield_now().await;
        let stranger = RoundId::new();
        let unknown = tokio::spawn({
            let orchestrator = Arc::clone(&orchestrator);
            async move { orchestrator.natural_end(stranger, &RoundSummary::empty()).await }
        });
        tokio::task::yield_now().await;
        drop(held);

        let next = valid.await.unwrap().unwrap().unwrap();
        assert_eq!(
            unknown.await.unwrap(),
            Err(RoundError::MismatchedRound(stranger))
        );
        assert_eq!(orchestrator.active_round_id().await, Some(next));
        assert_eq!(harness.events.started().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_terminating_word_still_ends_round() {
        let harness = Harness::new();
        let config = plain_only().with_add_token_timeout(Duration::from_secs(1));
        let orchestrator = orchestrator(&harness, &config);
        let id = orchestrator
            .start_round(GameMode::Plain, StartReason::Manual)
            .await
            .unwrap();
        orchestrator.submit_add(token(1, 1, "The")).await.unwrap();
        orchestrator.submit_add(token(2, 2, "cat")).await.unwrap();

        harness.transport.slow_reactions(Duration::from_secs(10));
        assert_eq!(
            orchestrator.submit_add(token(3, 3, "sat.")).await,
            Err(RoundError::Timeout(Duration::from_secs(1)))
        );

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(harness.events.ended_ids(), vec![id]);
        assert!(harness.events.last_summary().unwrap().contains("The cat sat."));
        assert!(!orchestrator.is_round_running().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_add_times_out() {
        let harness = Harness::new();
        let config = plain_only().with_add_token_timeout(Duration::from_secs(1));
        let orchestrator = orchestrator(&harness, &config);
        orchestrator
            .start_round(GameMode::Plain, StartReason::Manual)
            .await
            .unwrap();

        harness.transport.slow_reactions(Duration::from_secs(10));
        assert_eq!(
            orchestrator.submit_add(token(1, 1, "hello")).await,
            Err(RoundError::Timeout(Duration::from_secs(1)))
        );
    }
}
