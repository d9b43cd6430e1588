//! Letter vote domain
//!
//! A letter-constrained round opens with a poll over a few letters drawn
//! from the [`LetterPool`]. The winning letter becomes a [`LetterConstraint`]
//! that every word in the round must (or must not) contain.

pub mod constraint;
pub mod pool;

pub use constraint::{ConstraintKind, LetterConstraint};
pub use pool::LetterPool;
