//! Identifiers
//!
//! Participants and messages are identified by the chat platform's numeric
//! snowflakes. Rounds get a fresh UUID each time one starts.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A chat participant (message author or reactor)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticipantId(pub u64);

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ParticipantId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Opaque reference to a chat message (the source of a token, or a poll)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageRef(pub u64);

impl std::fmt::Display for MessageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for MessageRef {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Unique identifier of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoundId(Uuid);

impl RoundId {
    /// Generate a fresh random id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// First eight hex digits, enough to tell rounds apart in logs
    pub fn short(&self) -> String {
        self.0.simple().to_string().chars().take(8).collect()
    }
}

impl Default for RoundId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for RoundId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for RoundId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
