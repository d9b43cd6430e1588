//! Process-local stats store.
//!
//! Keeps per-author word usage counts and contribution totals for the
//! lifetime of the process. Nothing is persisted.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use wordchain_application::{StatsError, StatsRepository};
use wordchain_domain::ParticipantId;

#[derive(Debug, Default)]
struct AuthorStats {
    usage: HashMap<String, u64>,
    contributions: u64,
}

/// In-memory [`StatsRepository`]
#[derive(Debug, Default)]
pub struct InMemoryStats {
    authors: Mutex<HashMap<ParticipantId, AuthorStats>>,
}

impl InMemoryStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of authors with at least one recorded entry
    pub fn author_count(&self) -> usize {
        self.authors.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl StatsRepository for InMemoryStats {
    async fn record_usage(
        &self,
        author: ParticipantId,
        normalized: &str,
    ) -> Result<(), StatsError> {
        let mut authors = self.authors.lock().unwrap_or_else(|e| e.into_inner());
        *authors
            .entry(author)
            .or_default()
            .usage
            .entry(normalized.to_string())
            .or_insert(0) += 1;
        Ok(())
    }

    async fn record_contribution(&self, author: ParticipantId) -> Result<(), StatsError> {
        let mut authors = self.authors.lock().unwrap_or_else(|e| e.into_inner());
        authors.entry(author).or_default().contributions += 1;
        Ok(())
    }

    /// Most used words first; ties are broken alphabetically
    async fn top_tokens_by_author(
        &self,
        author: ParticipantId,
        n: usize,
    ) -> Result<Vec<String>, StatsError> {
        let authors = self.authors.lock().unwrap_or_else(|e| e.into_inner());
        let Some(stats) = authors.get(&author) else {
            return Ok(Vec::new());
        };

        let mut words: Vec<(&String, &u64)> = stats.usage.iter().collect();
        words.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        Ok(words.into_iter().take(n).map(|(w, _)| w.clone()).collect())
    }

    async fn total_contributions_by_author(
        &self,
        author: ParticipantId,
    ) -> Result<u64, StatsError> {
        let authors = self.authors.lock().unwrap_or_else(|e| e.into_inner());
        Ok(authors.get(&author).map_or(0, |s| s.contributions))
    }
}
