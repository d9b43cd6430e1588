//! Plain chain mode

use super::chain::{ChainCore, forward};
use super::{AddOutcome, GamemodeHandler, HandlerDeps, RoundError};
use crate::config::GameConfig;
use async_trait::async_trait;
use wordchain_domain::{GameMode, MessageRef, RoundId, RoundStatus, Token};

const BANNER: &str = "A new sentence begins! Add one word at a time and end it with . ? or !";

/// Common rules only
pub struct PlainChainHandler {
    core: ChainCore,
}

impl PlainChainHandler {
    pub fn new(deps: HandlerDeps, config: &GameConfig) -> Self {
        Self {
            core: ChainCore::new(GameMode::Plain, deps, config),
        }
    }
}

#[async_trait]
impl GamemodeHandler for PlainChainHandler {
    fn mode(&self) -> GameMode {
        GameMode::Plain
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
        self.core.finish(forward).await;
        Ok(())
    }
}
