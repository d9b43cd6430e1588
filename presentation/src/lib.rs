//! Presentation layer for wordchain
//!
//! This crate contains the CLI definition, the round announcer that turns
//! round events into chat messages, console formatting and the driver
//! command parser.

pub mod announcer;
pub mod cli;
pub mod driver;
pub mod output;

// Re-export commonly used types
pub use announcer::RoundAnnouncer;
pub use cli::commands::Cli;
pub use driver::{DriverCommand, ParseError};
pub use output::console::ConsoleFormatter;
