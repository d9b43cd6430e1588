//! Round summaries
//!
//! Turning a finished chain into the text announced at the end of a round:
//! the composed sentence (read forwards or, in reversed mode, back to front)
//! and a line per contributor.

pub mod round_summary;
pub mod sentence;

pub use round_summary::{ContributorLine, RoundSummary, contributors_in_order};
pub use sentence::{compose_sentence, reverse_sentence};
