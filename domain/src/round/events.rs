//! Round lifecycle events
//!
//! Published to the notification bus by gamemode handlers. The presentation
//! layer turns them into chat messages; the orchestrator listens for
//! [`RoundEvent::Ended`] to drive natural round transitions.

use super::mode::GameMode;
use crate::core::ids::RoundId;
use crate::summary::RoundSummary;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a round is being started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartReason {
    /// First round after the process comes up
    Startup,
    /// Operator or command request
    Manual,
    /// Result of a staff mode vote
    StaffVote,
    /// Orchestrator auto-next after a natural end
    Natural,
}

impl StartReason {
    /// Explicit starts clear any pending featured override
    pub fn is_explicit(&self) -> bool {
        !matches!(self, StartReason::Natural)
    }
}

impl fmt::Display for StartReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartReason::Startup => write!(f, "startup"),
            StartReason::Manual => write!(f, "manual request"),
            StartReason::StaffVote => write!(f, "staff vote"),
            StartReason::Natural => write!(f, "natural flow"),
        }
    }
}

/// Event emitted over a round's lifetime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoundEvent {
    Started {
        round_id: RoundId,
        mode: GameMode,
        banner: String,
    },
    Ended {
        round_id: RoundId,
        mode: GameMode,
        summary: RoundSummary,
    },
}

impl RoundEvent {
    pub fn round_id(&self) -> RoundId {
        match self {
            RoundEvent::Started { round_id, .. } | RoundEvent::Ended { round_id, .. } => *round_id,
        }
    }

    pub fn mode(&self) -> GameMode {
        match self {
            RoundEvent::Started { mode, .. } | RoundEvent::Ended { mode, .. } => *mode,
        }
    }

    /// Event type identifier (e.g. for structured logs)
    pub fn event_type(&self) -> &'static str {
        match self {
            RoundEvent::Started { .. } => "round_started",
            RoundEvent::Ended { .. } => "round_ended",
        }
    }
}
