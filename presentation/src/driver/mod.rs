//! Line-oriented driver input for the simulated channel.

mod command;

pub use command::{DriverCommand, ParseError};
