//! Application-level configuration.
//!
//! - [`GameConfig`]: vote windows, letter pool, enabled modes, validation
//!   rules, featured policy and reaction emotes

pub mod game_config;

pub use game_config::{GameConfig, ReactionEmotes};
