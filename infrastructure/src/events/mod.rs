//! Round event distribution.
//!
//! [`BroadcastEventBus`] fans round events out to every subscriber (the
//! natural-end relay, the announcer) over a tokio broadcast channel.

mod broadcast_bus;

pub use broadcast_bus::BroadcastEventBus;
