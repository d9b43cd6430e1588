//! Vote tally with first-declared tie-break

use serde::{Deserialize, Serialize};

/// Result of tallying a poll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TallyOutcome<T> {
    /// The option with the highest count (earliest declared on ties)
    Winner { option: T, votes: usize },
    /// Every count was zero
    NoVotes,
}

impl<T> TallyOutcome<T> {
    pub fn is_no_votes(&self) -> bool {
        matches!(self, TallyOutcome::NoVotes)
    }

    pub fn winner(&self) -> Option<&T> {
        match self {
            TallyOutcome::Winner { option, .. } => Some(option),
            TallyOutcome::NoVotes => None,
        }
    }
}

/// Reaction counts per option, in declaration order
///
/// # Example
///
/// ```
/// use wordchain_domain::vote::{TallyOutcome, VoteTally};
///
/// let tally = VoteTally::from_counts(vec![('A', 2), ('B', 2), ('C', 1)]);
/// assert_eq!(tally.outcome(), TallyOutcome::Winner { option: 'A', votes: 2 });
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally<T> {
    counts: Vec<(T, usize)>,
}

impl<T: Clone + PartialEq> VoteTally<T> {
    /// Start a tally with every candidate at zero
    pub fn new(candidates: impl IntoIterator<Item = T>) -> Self {
        Self {
            counts: candidates.into_iter().map(|c| (c, 0)).collect(),
        }
    }

    /// Build a tally from already-counted reactions
    pub fn from_counts(counts: Vec<(T, usize)>) -> Self {
        Self { counts }
    }

    /// Add `votes` to `option`. Unknown options are ignored.
    pub fn record(&mut self, option: &T, votes: usize) {
        if let Some((_, count)) = self.counts.iter_mut().find(|(c, _)| c == option) {
            *count += votes;
        }
    }

    pub fn count(&self, option: &T) -> usize {
        self.counts
            .iter()
            .find(|(c, _)| c == option)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    pub fn total_votes(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }

    pub fn candidates(&self) -> impl Iterator<Item = &T> {
        self.counts.iter().map(|(c, _)| c)
    }

    /// Resolve the poll
    pub fn outcome(&self) -> TallyOutcome<T> {
        let mut best: Option<&(T, usize)> = None;
        for entry in &self.counts {
            // strict comparison keeps the earliest option on ties
            if entry.1 > 0 && best.is_none_or(|b| entry.1 > b.1) {
                best = Some(entry);
            }
        }

        match best {
            Some((option, votes)) => TallyOutcome::Winner {
                option: option.clone(),
                votes: *votes,
            },
            None => TallyOutcome::NoVotes,
        }
    }

    /// Visual summary (e.g. "A:2 B:2 C:1")
    pub fn summary(&self) -> String
    where
        T: std::fmt::Display,
    {
        self.counts
            .iter()
            .map(|(c, n)| format!("{}:{}", c, n))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
