//! Reversed sentence mode
//!
//! Plays exactly like the plain chain; only the closing sentence differs.

use super::chain::{ChainCore, backward};
use super::{AddOutcome, GamemodeHandler, HandlerDeps, RoundError};
use crate::config::GameConfig;
use async_trait::async_trait;
use wordchain_domain::{GameMode, MessageRef, RoundId, RoundStatus, Token};

const BANNER: &str =
    "Reversed sentence! Build a sentence as usual; it will be read back to front when it ends.";

pub struct ReversedHandler {
    core: ChainCore,
}

impl ReversedHandler {
    pub fn new(deps: HandlerDeps, config: &GameConfig) -> Self {
        Self {
            core: ChainCore::new(GameMode::Reversed, deps, config),
        }
    }
}

#[async_trait]
impl GamemodeHandler for ReversedHandler {
    fn mode(&self) -> GameMode {
        GameMode::Reversed
    }

    fn round_id(&self) -> Option<RoundId> {
        self.core.round_id()
    }

    fn assign_round_id(&self, id: RoundId) {
        self.core.assign_id(id);
    }

    fn status(&self) -> RoundStatus {
        self.core.status()
    }

    fn mark_ended(&self) {
        self.core.mark_ended();
    }

    async fn start(&self) -> Result<(), RoundError> {
        let id = self.core.begin(RoundStatus::InProgress);
        self.core.announce_start(id, BANNER);
        Ok(())
    }

    async fn add_token(&self, token: Token) -> Result<AddOutcome, RoundError> {
        let outcome = self.core.add(token, None).await?;
        if outcome == AddOutcome::Completed {
            self.end().await?;
        }
        Ok(outcome)
    }

    async fn remove_token(&self, source_ref: MessageRef) -> Result<Token, RoundError> {
        self.core.remove(source_ref)
    }

    async fn end(&self) -> Result<(), RoundError> {
        self.core.finish(backward).await;
        Ok(())
    }
}
