//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod chat_transport;
pub mod round_events;
pub mod stats;
