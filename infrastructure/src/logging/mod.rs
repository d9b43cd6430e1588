//! Logging infrastructure: structured round-event logging.
//!
//! Provides [`JsonlRoundLogger`], a JSONL file writer that implements the
//! [`RoundEventPublisher`](wordchain_application::RoundEventPublisher) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlRoundLogger;
