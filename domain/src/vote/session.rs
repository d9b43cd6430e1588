//! An open poll with a deadline

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A poll in progress (Entity)
///
/// Tie-break is always first-declared-wins, so candidate order matters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteSession<T> {
    candidates: Vec<T>,
    opened_at: DateTime<Utc>,
    deadline: DateTime<Utc>,
}

impl<T> VoteSession<T> {
    pub fn open(candidates: Vec<T>, opened_at: DateTime<Utc>, window: Duration) -> Self {
        Self {
            candidates,
            opened_at,
            deadline: opened_at + window,
        }
    }

    pub fn candidates(&self) -> &[T] {
        &self.candidates
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    pub fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.deadline
    }

    /// Time left before the deadline (zero once expired)
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.deadline - now).max(Duration::zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadline() {
        let now = Utc::now();
        let session = VoteSession::open(vec!['A', 'B'], now, Duration::seconds(30));
        assert_eq!(session.deadline(), now + Duration::seconds(30));
        assert!(!session.is_expired(now));
        assert!(session.is_expired(now + Duration::seconds(30)));
        assert_eq!(session.remaining(now + Duration::seconds(10)), Duration::seconds(20));
        assert_eq!(session.remaining(now + Duration::seconds(40)), Duration::zero());
    }
}
