//! Featured round selection
//!
//! After a round ends naturally the orchestrator may spotlight a configured
//! mode for the next round instead of picking uniformly at random.

pub mod policy;

pub use policy::FeaturedPolicy;
