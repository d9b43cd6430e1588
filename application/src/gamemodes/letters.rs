//! Letter-constrained mode
//!
//! ```text
//! start ──▶ Voting ──(window elapses)──▶ ProcessingVotes ──▶ InProgress ──▶ Ended
//!                                               │                            ▲
//!                                               └──────── no votes ──────────┘
//! ```
//!
//! The poll deadline runs on a detached task. Ending the round cancels it;
//! if it fires anyway after the round moved on, the status checks make it a
//! no-op.

use super::chain::{ChainCore, forward};
use super::{AddOutcome, GamemodeHandler, HandlerDeps, RoundError};
use crate::config::GameConfig;
use crate::ports::chat_transport::tally_reactions;
use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use wordchain_domain::{
    ConstraintKind, GameMode, LetterConstraint, LetterPool, MessageRef, ParticipantId, RoundId,
    RoundStatus, RoundSummary, TallyOutcome, Token,
};

const BANNER: &str = "Letter vote! Pick a letter from the poll; the winner decides what every word must (or must not) contain.";
const NO_VOTES: &str = "No votes were cast in the letter poll. The round has ended without a letter.";

/// Letter poll first, then the common rules plus the winning constraint
pub struct LetterVoteHandler {
    inner: Arc<LetterRound>,
}

struct LetterRound {
    core: ChainCore,
    pool: LetterPool,
    candidate_count: usize,
    vote_window: Duration,
    bot_id: Option<ParticipantId>,
    candidates: Mutex<Vec<char>>,
    constraint: Mutex<Option<LetterConstraint>>,
    rng: Mutex<StdRng>,
    cancel: CancellationToken,
}

impl LetterVoteHandler {
    pub fn new(deps: HandlerDeps, config: &GameConfig) -> Self {
        Self::with_rng(deps, config, StdRng::from_os_rng())
    }

    pub fn with_rng(deps: HandlerDeps, config: &GameConfig, rng: StdRng) -> Self {
        Self {
            inner: Arc::new(LetterRound {
                core: ChainCore::new(GameMode::LetterConstrained, deps, config),
                pool: config.letter_pool(),
                candidate_count: config.vote_candidates,
                vote_window: config.vote_window,
                bot_id: config.bot_id,
                candidates: Mutex::new(Vec::new()),
                constraint: Mutex::new(None),
                rng: Mutex::new(rng),
                cancel: CancellationToken::new(),
            }),
        }
    }

    /// Letters offered in this round's poll, in poll order
    pub fn candidates(&self) -> Vec<char> {
        self.inner.candidates.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// The constraint in force, once the poll has a winner
    pub fn constraint(&self) -> Option<LetterConstraint> {
        self.inner.constraint()
    }
}

impl Drop for LetterVoteHandler {
    fn drop(&mut self) {
        self.inner.cancel.cancel();
    }
}

impl LetterRound {
    fn constraint(&self) -> Option<LetterConstraint> {
        *self.constraint.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn draw_letters(&self) -> Result<Vec<(char, String)>, RoundError> {
        let letters = {
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            self.pool.draw(&mut *rng, self.candidate_count)?
        };
        *self.candidates.lock().unwrap_or_else(|e| e.into_inner()) = letters.clone();
        letters
            .into_iter()
            .map(|letter| -> Result<(char, String), RoundError> {
                Ok((letter, LetterPool::emoji_for(letter)?))
            })
            .collect()
    }

    /// Tally the poll once the window has elapsed
    async fn resolve(&self, poll: MessageRef, options: Vec<(char, String)>) {
        if !self
            .core
            .transition(RoundStatus::Voting, RoundStatus::ProcessingVotes)
        {
            debug!("Letter poll {} closed after the round moved on", poll);
            return;
        }

        let transport = self.core.deps().transport.clone();
        let tally = tally_reactions(transport.as_ref(), poll, &options, self.bot_id).await;
        if self.cancel.is_cancelled() {
            return;
        }
        info!("Letter poll {} closed: {}", poll, tally.summary());

        match tally.outcome() {
            TallyOutcome::NoVotes => {
                if let Some((id, _)) = self.core.close() {
                    self.core.announce_end(id, RoundSummary::notice(NO_VOTES));
                }
            }
            TallyOutcome::Winner {
                option: letter,
                votes,
            } => {
                let kind = {
                    let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
                    ConstraintKind::flip(&mut *rng)
                };
                let constraint = LetterConstraint::new(letter, kind);
                *self.constraint.lock().unwrap_or_else(|e| e.into_inner()) = Some(constraint);

                let message = render_result(constraint, votes);
                if let Err(e) = transport.post_message(&message).await {
                    warn!("Could not post letter poll result: {}", e);
                }

                if self
                    .core
                    .transition(RoundStatus::ProcessingVotes, RoundStatus::InProgress)
                {
                    info!("Letter round continues with: {}", constraint);
                }
            }
        }
    }
}

fn render_poll(options: &[(char, String)], window: Duration) -> String {
    let mut out = format!(
        "**Vote for a letter!** React within {} seconds.",
        window.as_secs()
    );
    for (i, (letter, emoji)) in options.iter().enumerate() {
        out.push_str(&format!("\n{}. {} {}", i + 1, emoji, letter));
    }
    out
}

fn render_result(constraint: LetterConstraint, votes: usize) -> String {
    let rule = match constraint.kind() {
        ConstraintKind::MustContain => "Every word must contain",
        ConstraintKind::MustNotContain => "No word may contain",
    };
    format!(
        "The letter **{}** won with {} vote{}! {} the letter {}.",
        constraint.letter(),
        votes,
        if votes == 1 { "" } else { "s" },
        rule,
        constraint.letter()
    )
}

#[async_trait]
impl GamemodeHandler for LetterVoteHandler {
    fn mode(&self) -> GameMode {
        GameMode::LetterConstrained
    }

    fn round_id(&self) -> Option<RoundId> {
        self.inner.core.round_id()
    }

    fn assign_round_id(&self, id: RoundId) {
        self.inner.core.assign_id(id);
    }

    fn status(&self) -> RoundStatus {
        self.inner.core.status()
    }

    fn mark_ended(&self) {
        self.inner.cancel.cancel();
        self.inner.core.mark_ended();
    }

    async fn start(&self) -> Result<(), RoundError> {
        let inner = &self.inner;
        let id = inner.core.begin(RoundStatus::Voting);

        let options = match inner.draw_letters() {
            Ok(options) => options,
            Err(e) => {
                inner.core.mark_ended();
                return Err(e);
            }
        };

        let transport = inner.core.deps().transport.clone();
        let poll = match transport
            .post_message(&render_poll(&options, inner.vote_window))
            .await
        {
            Ok(poll) => poll,
            Err(e) => {
                inner.core.mark_ended();
                return Err(RoundError::StartFailed {
                    mode: GameMode::LetterConstrained,
                    reason: format!("letter poll could not be posted: {}", e),
                });
            }
        };

        for (_, emoji) in &options {
            if let Err(e) = transport.add_reaction(poll, emoji).await {
                warn!("Could not add poll reaction {}: {}", emoji, e);
            }
        }

        inner.core.announce_start(id, BANNER);

        let round = Arc::clone(inner);
        tokio::spawn(async move {
            tokio::select! {
                _ = round.cancel.cancelled() => debug!("Letter poll {} cancelled", poll),
                _ = tokio::time::sleep(round.vote_window) => round.resolve(poll, options).await,
            }
        });

        Ok(())
    }

    async fn add_token(&self, token: Token) -> Result<AddOutcome, RoundError> {
        let constraint = self.inner.constraint();
        let outcome = self.inner.core.add(token, constraint).await?;
        if outcome == AddOutcome::Completed {
            self.end().await?;
        }
        Ok(outcome)
    }

    async fn remove_token(&self, source_ref: MessageRef) -> Result<Token, RoundError> {
        self.inner.core.remove(source_ref)
    }

    async fn end(&self) -> Result<(), RoundError> {
        self.inner.cancel.cancel();
        self.inner.core.finish(forward).await;
        Ok(())
    }
}
