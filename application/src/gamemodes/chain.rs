//! Contribution protocol shared by every mode
//!
//! [`ChainCore`] holds the round entity behind a synchronous mutex that is
//! never held across an `.await`. Admission and append happen under one
//! acquisition, so concurrent submissions cannot both pass the turn rules.

use super::{AddOutcome, HandlerDeps, RoundError};
use crate::config::{GameConfig, ReactionEmotes};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};
use wordchain_domain::{
    ContributorLine, GameMode, LetterConstraint, MessageRef, Round, RoundEvent, RoundId,
    RoundStatus, RoundSummary, Token, TokenRejection, TokenValidator, contributors_in_order,
    normalize,
};

pub struct ChainCore {
    round: Mutex<Round>,
    validator: TokenValidator,
    emotes: ReactionEmotes,
    deps: HandlerDeps,
}

impl ChainCore {
    pub fn new(mode: GameMode, deps: HandlerDeps, config: &GameConfig) -> Self {
        Self {
            round: Mutex::new(Round::new(mode)),
            validator: TokenValidator::new(config.rules.clone()),
            emotes: config.emotes.clone(),
            deps,
        }
    }

    fn round(&self) -> MutexGuard<'_, Round> {
        self.round.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn deps(&self) -> &HandlerDeps {
        &self.deps
    }

    pub fn mode(&self) -> GameMode {
        self.round().mode()
    }

    pub fn round_id(&self) -> Option<RoundId> {
        self.round().id()
    }

    pub fn assign_id(&self, id: RoundId) {
        self.round().assign_id(id);
    }

    pub fn status(&self) -> RoundStatus {
        self.round().status()
    }

    pub fn len(&self) -> usize {
        self.round().len()
    }

    /// Move from `from` to `to`; returns `false` if the round was elsewhere
    pub fn transition(&self, from: RoundStatus, to: RoundStatus) -> bool {
        let mut round = self.round();
        if round.status() != from {
            return false;
        }
        round.set_status(to);
        true
    }

    pub fn mark_ended(&self) {
        self.round().finish();
    }

    /// Empty the chain, enter `initial` and return the round id
    pub fn begin(&self, initial: RoundStatus) -> RoundId {
        let mut round = self.round();
        round.reset(initial);
        round.ensure_id()
    }

    /// Publish the round-started event
    pub fn announce_start(&self, id: RoundId, banner: impl Into<String>) {
        let mode = self.mode();
        info!("Round {} started ({})", id.short(), mode);
        self.deps.events.publish(RoundEvent::Started {
            round_id: id,
            mode,
            banner: banner.into(),
        });
    }

    /// Validate and append `token`
    ///
    /// On a rejection nothing is mutated and the reject emote is added to
    /// the source message. On acceptance the usage statistics are updated.
    /// The caller ends the round on [`AddOutcome::Completed`].
    pub async fn add(
        &self,
        token: Token,
        constraint: Option<LetterConstraint>,
    ) -> Result<AddOutcome, RoundError> {
        let admitted = {
            let mut round = self.round();
            let checked = round.admit(&token, &self.validator).and_then(|()| {
                match constraint {
                    Some(c) if !c.permits(&token.value) => Err(TokenRejection::LetterConstraint(c)),
                    _ => Ok(()),
                }
            });
            if checked.is_ok() {
                round.push(token.clone());
            }
            checked
        };

        if let Err(rejection) = admitted {
            debug!("Rejected {:?} from {}: {}", token.value, token.author, rejection);
            self.react(token.source_ref, &self.emotes.reject).await;
            return Err(rejection.into());
        }

        self.react(token.source_ref, &self.emotes.accept).await;
        self.record_stats(&token).await;

        if token.ends_sentence() {
            self.react(token.source_ref, &self.emotes.win).await;
            Ok(AddOutcome::Completed)
        } else {
            Ok(AddOutcome::Accepted)
        }
    }

    pub fn remove(&self, source_ref: MessageRef) -> Result<Token, RoundError> {
        let removed = self
            .round()
            .remove(source_ref)
            .ok_or(RoundError::TokenNotFound(source_ref))?;
        debug!("Removed {:?} (message {})", removed.value, source_ref);
        Ok(removed)
    }

    /// End the round once
    ///
    /// Returns the id and final chain, or `None` if the round had already
    /// ended. Only the caller that gets `Some` may publish the end event.
    pub fn close(&self) -> Option<(RoundId, Vec<Token>)> {
        let mut round = self.round();
        if !round.finish() {
            return None;
        }
        let id = round.ensure_id();
        Some((id, round.chain().to_vec()))
    }

    /// Build the closing summary for `chain`
    ///
    /// `compose` turns the chain's values into the sentence shown.
    pub async fn summarize(&self, chain: &[Token], compose: fn(&[&str]) -> String) -> RoundSummary {
        if chain.is_empty() {
            return RoundSummary::empty();
        }

        let values: Vec<&str> = chain.iter().map(|t| t.value.as_str()).collect();
        let sentence = compose(&values);

        let mut contributors = Vec::new();
        for author in contributors_in_order(chain) {
            let top_token = match self.deps.stats.top_tokens_by_author(author, 1).await {
                Ok(mut top) => {
                    if top.is_empty() {
                        None
                    } else {
                        Some(top.swap_remove(0))
                    }
                }
                Err(e) => {
                    warn!("Top word lookup failed for {}: {}", author, e);
                    None
                }
            };
            let total = match self.deps.stats.total_contributions_by_author(author).await {
                Ok(total) => total,
                Err(e) => {
                    warn!("Contribution count failed for {}: {}", author, e);
                    0
                }
            };
            contributors.push(ContributorLine {
                author,
                top_token,
                total,
            });
        }

        RoundSummary::constructed(sentence, contributors)
    }

    /// Publish the round-ended event
    pub fn announce_end(&self, id: RoundId, summary: RoundSummary) {
        let mode = self.mode();
        info!("Round {} ended ({}): {}", id.short(), mode, summary.headline);
        self.deps.events.publish(RoundEvent::Ended {
            round_id: id,
            mode,
            summary,
        });
    }

    /// Close, summarize and announce. Returns `false` if already ended.
    pub async fn finish(&self, compose: fn(&[&str]) -> String) -> bool {
        let Some((id, chain)) = self.close() else {
            return false;
        };
        let summary = self.summarize(&chain, compose).await;
        self.announce_end(id, summary);
        true
    }

    async fn react(&self, message: MessageRef, emoji: &str) {
        if let Err(e) = self.deps.transport.add_reaction(message, emoji).await {
            warn!("Could not react {} on message {}: {}", emoji, message, e);
        }
    }

    async fn record_stats(&self, token: &Token) {
        let normalized = normalize(&token.value);
        if normalized.is_empty() {
            return;
        }
        if let Err(e) = self.deps.stats.record_usage(token.author, &normalized).await {
            warn!("Could not record usage of {:?}: {}", normalized, e);
        }
        if let Err(e) = self.deps.stats.record_contribution(token.author).await {
            warn!("Could not record contribution by {}: {}", token.author, e);
        }
    }
}

/// Plain reading of the chain
pub fn forward(values: &[&str]) -> String {
    wordchain_domain::compose_sentence(values)
}

/// The chain read back to front
pub fn backward(values: &[&str]) -> String {
    wordchain_domain::reverse_sentence(&wordchain_domain::compose_sentence(values))
}
