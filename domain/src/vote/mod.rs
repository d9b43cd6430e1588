//! Reaction vote domain
//!
//! Used for the letter poll that opens a letter-constrained round and for
//! staff-initiated mode votes. Both resolve the same way: the option with
//! the most reactions wins, ties go to the option declared first, and a poll
//! in which nobody voted resolves to [`TallyOutcome::NoVotes`].

pub mod session;
pub mod tally;

pub use session::VoteSession;
pub use tally::{TallyOutcome, VoteTally};
