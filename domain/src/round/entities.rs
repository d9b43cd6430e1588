//! Round entity

use super::mode::GameMode;
use super::rejection::TokenRejection;
use super::status::RoundStatus;
use super::token::Token;
use crate::core::ids::{MessageRef, ParticipantId, RoundId};
use crate::validation::TokenValidator;

/// One play-through of a mode (Entity)
///
/// Holds the chain of accepted tokens and enforces the turn rules shared by
/// every mode. A freshly constructed round is inert (`Ended`, no id) until
/// [`Round::reset`] puts it into the mode's initial phase.
#[derive(Debug, Clone)]
pub struct Round {
    id: Option<RoundId>,
    mode: GameMode,
    status: RoundStatus,
    chain: Vec<Token>,
    last_contributor: Option<ParticipantId>,
}

impl Round {
    /// Fewest words a finished sentence may have, terminating word included
    ///
    /// Counting the terminator lets "The cat sat." finish a round.
    pub const MIN_TOKENS_BEFORE_END: usize = 3;

    pub fn new(mode: GameMode) -> Self {
        Self {
            id: None,
            mode,
            status: RoundStatus::Ended,
            chain: Vec::new(),
            last_contributor: None,
        }
    }

    pub fn id(&self) -> Option<RoundId> {
        self.id
    }

    /// Return the id, assigning a fresh one if none was set
    pub fn ensure_id(&mut self) -> RoundId {
        *self.id.get_or_insert_with(RoundId::new)
    }

    pub fn assign_id(&mut self, id: RoundId) {
        self.id = Some(id);
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn set_status(&mut self, status: RoundStatus) {
        self.status = status;
    }

    pub fn chain(&self) -> &[Token] {
        &self.chain
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn last_contributor(&self) -> Option<ParticipantId> {
        self.last_contributor
    }

    pub fn is_ended(&self) -> bool {
        self.status == RoundStatus::Ended
    }

    /// Empty the chain and enter `initial`
    pub fn reset(&mut self, initial: RoundStatus) {
        self.chain.clear();
        self.last_contributor = None;
        self.status = initial;
    }

    /// Check whether `token` may be appended, without mutating the round.
    ///
    /// Checks run in order: phase, word validity, minimum length before a
    /// terminator, turn alternation, and whether the sentence already ended.
    pub fn admit(&self, token: &Token, validator: &TokenValidator) -> Result<(), TokenRejection> {
        if !self.status.accepts_tokens() {
            return Err(TokenRejection::NotAccepting(self.status));
        }

        validator.check(&token.value)?;

        if self.chain.len() + 1 < Self::MIN_TOKENS_BEFORE_END && token.ends_sentence() {
            return Err(TokenRejection::TooEarlyToEnd {
                min: Self::MIN_TOKENS_BEFORE_END,
            });
        }

        if self.last_contributor == Some(token.author) {
            return Err(TokenRejection::ConsecutiveAuthor(token.author));
        }

        if self.chain.last().is_some_and(Token::ends_sentence) {
            return Err(TokenRejection::SentenceAlreadyEnded);
        }

        Ok(())
    }

    /// Append an admitted token
    pub fn push(&mut self, token: Token) {
        self.last_contributor = Some(token.author);
        self.chain.push(token);
    }

    /// Remove the token submitted in `source_ref`
    ///
    /// The last contributor follows the new tail of the chain.
    pub fn remove(&mut self, source_ref: MessageRef) -> Option<Token> {
        let index = self.chain.iter().position(|t| t.source_ref == source_ref)?;
        let removed = self.chain.remove(index);
        self.last_contributor = self.chain.last().map(|t| t.author);
        Some(removed)
    }

    /// Move to `Ended`. Returns `false` if the round had already ended.
    pub fn finish(&mut self) -> bool {
        if self.is_ended() {
            return false;
        }
        self.status = RoundStatus::Ended;
        self.ensure_id();
        true
    }
}
