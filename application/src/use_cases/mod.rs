//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod mode_vote;
pub mod natural_end_relay;
pub mod orchestrate_rounds;
