//! Chat transport adapters.
//!
//! Only an in-process [`SimulatedChannel`] ships with the crate. It backs the
//! CLI driver and lets the game be played locally without a chat platform.

mod simulated;

pub use simulated::{ChannelActivity, ChannelMessage, SimulatedChannel};
