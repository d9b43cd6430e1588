//! Mode registry
//!
//! An enum-keyed table of handler factories. The orchestrator asks it for a
//! fresh handler on every start; which mode a handler plays is reported by
//! the handler itself through [`GamemodeHandler::mode`].

use super::{
    GamemodeHandler, HandlerDeps, LetterVoteHandler, PlainChainHandler, ReversedHandler,
    RoundError,
};
use crate::config::GameConfig;
use std::collections::BTreeMap;
use std::sync::Arc;
use wordchain_domain::GameMode;

type HandlerFactory = Box<dyn Fn() -> Arc<dyn GamemodeHandler> + Send + Sync>;

#[derive(Default)]
pub struct ModeRegistry {
    factories: BTreeMap<GameMode, HandlerFactory>,
}

impl ModeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in handler of every enabled mode
    pub fn standard(deps: HandlerDeps, config: &GameConfig) -> Self {
        let mut registry = Self::new();
        for mode in &config.enabled_modes {
            let deps = deps.clone();
            let config = config.clone();
            registry = match mode {
                GameMode::Plain => registry.register(*mode, move || {
                    Arc::new(PlainChainHandler::new(deps.clone(), &config)) as Arc<dyn GamemodeHandler>
                }),
                GameMode::LetterConstrained => registry.register(*mode, move || {
                    Arc::new(LetterVoteHandler::new(deps.clone(), &config)) as Arc<dyn GamemodeHandler>
                }),
                GameMode::Reversed => registry.register(*mode, move || {
                    Arc::new(ReversedHandler::new(deps.clone(), &config)) as Arc<dyn GamemodeHandler>
                }),
            };
        }
        registry
    }

    /// Register (or replace) the factory for `mode`
    pub fn register<F>(mut self, mode: GameMode, factory: F) -> Self
    where
        F: Fn() -> Arc<dyn GamemodeHandler> + Send + Sync + 'static,
    {
        self.factories.insert(mode, Box::new(factory));
        self
    }

    /// Instantiate a handler for `mode`
    pub fn create(&self, mode: GameMode) -> Result<Arc<dyn GamemodeHandler>, RoundError> {
        self.factories
            .get(&mode)
            .map(|factory| factory())
            .ok_or(RoundError::ModeNotRegistered(mode))
    }

    /// Registered modes in declaration order
    pub fn modes(&self) -> Vec<GameMode> {
        self.factories.keys().copied().collect()
    }

    pub fn contains(&self, mode: GameMode) -> bool {
        self.factories.contains_key(&mode)
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}
