//! Word statistics port
//!
//! Usage and contribution counts persist across rounds. They feed the
//! per-contributor lines of a round summary.

use async_trait::async_trait;
use thiserror::Error;
use wordchain_domain::ParticipantId;

/// Errors that can occur when reading or writing statistics
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("Stats store unavailable: {0}")]
    Unavailable(String),

    #[error("Stats query failed: {0}")]
    QueryFailed(String),
}

/// Store of word usage and contribution counts
///
/// Words are recorded in normalized form (see
/// [`normalize`](wordchain_domain::normalize)); callers skip words that
/// normalize to an empty string.
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Count one use of `normalized` by `author`
    async fn record_usage(&self, author: ParticipantId, normalized: &str)
    -> Result<(), StatsError>;

    /// Count one accepted word by `author`
    async fn record_contribution(&self, author: ParticipantId) -> Result<(), StatsError>;

    /// The author's most used words, most frequent first
    async fn top_tokens_by_author(
        &self,
        author: ParticipantId,
        n: usize,
    ) -> Result<Vec<String>, StatsError>;

    /// Accepted words by the author across all rounds
    async fn total_contributions_by_author(&self, author: ParticipantId)
    -> Result<u64, StatsError>;
}
