//! Infrastructure layer for wordchain
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: configuration loading, the round event bus, the stats
//! store, the simulated chat channel and the JSONL round log.

pub mod config;
pub mod events;
pub mod logging;
pub mod stats;
pub mod transport;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigValidationError, FileConfig};
pub use events::BroadcastEventBus;
pub use logging::JsonlRoundLogger;
pub use stats::InMemoryStats;
pub use transport::{ChannelActivity, ChannelMessage, SimulatedChannel};
