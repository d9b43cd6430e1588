//! Staff mode vote use case
//!
//! Lets staff put the next game mode to a reaction poll. A single option
//! skips the poll and starts that mode straight away.

use super::orchestrate_rounds::RoundOrchestrator;
use crate::config::GameConfig;
use crate::gamemodes::RoundError;
use crate::ports::chat_transport::{ChatTransport, TransportError, tally_reactions};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};
use wordchain_domain::{GameMode, ParticipantId, RoundId, StartReason, TallyOutcome};

/// Keycap emojis 1️⃣ to 9️⃣ label the options
const MAX_OPTIONS: usize = 9;

/// Errors that can occur during a staff mode vote
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModeVoteError {
    #[error("A mode vote is already running")]
    VoteAlreadyRunning,

    #[error("Too many options: {0} (at most 9)")]
    TooManyOptions(usize),

    #[error("Mode {0} is not enabled")]
    ModeNotEnabled(GameMode),

    #[error("Poll could not be posted: {0}")]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Round(#[from] RoundError),
}

/// How a staff vote ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeVoteOutcome {
    /// The mode was started; `votes` is `None` when there was no poll
    Started {
        mode: GameMode,
        round_id: RoundId,
        votes: Option<usize>,
    },
    /// Nobody voted; the current round was left alone
    NoVotes,
}

/// Keycap emoji for option `n` (1-based)
pub fn keycap(n: usize) -> String {
    format!("{}\u{FE0F}\u{20E3}", n)
}

pub struct ModeVoteUseCase {
    orchestrator: Arc<RoundOrchestrator>,
    transport: Arc<dyn ChatTransport>,
    vote_window: Duration,
    bot_id: Option<ParticipantId>,
    running: AtomicBool,
}

/// Clears the running flag however the vote ends
struct RunningGuard<'a>(&'a AtomicBool);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl ModeVoteUseCase {
    pub fn new(
        orchestrator: Arc<RoundOrchestrator>,
        transport: Arc<dyn ChatTransport>,
        config: &GameConfig,
    ) -> Self {
        Self {
            orchestrator,
            transport,
            vote_window: config.vote_window,
            bot_id: config.bot_id,
            running: AtomicBool::new(false),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Run a vote over `options` (every registered mode when empty)
    pub async fn run(
        &self,
        options: Vec<GameMode>,
        note: Option<&str>,
    ) -> Result<ModeVoteOutcome, ModeVoteError> {
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ModeVoteError::VoteAlreadyRunning);
        }
        let _guard = RunningGuard(&self.running);

        let options = self.resolve_options(options)?;

        if let [mode] = options.as_slice() {
            let round_id = self
                .orchestrator
                .start_round(*mode, StartReason::StaffVote)
                .await?;
            return Ok(ModeVoteOutcome::Started {
                mode: *mode,
                round_id,
                votes: None,
            });
        }

        let labelled: Vec<(GameMode, String)> = options
            .iter()
            .enumerate()
            .map(|(i, mode)| (*mode, keycap(i + 1)))
            .collect();

        let poll = self
            .transport
            .post_message(&self.render_poll(&labelled, note))
            .await?;
        for (_, emoji) in &labelled {
            if let Err(e) = self.transport.add_reaction(poll, emoji).await {
                warn!("Could not add mode vote reaction {}: {}", emoji, e);
            }
        }

        tokio::time::sleep(self.vote_window).await;

        let tally = tally_reactions(self.transport.as_ref(), poll, &labelled, self.bot_id).await;
        info!("Mode vote {} closed: {}", poll, tally.summary());

        match tally.outcome() {
            TallyOutcome::NoVotes => {
                self.notify("No votes were cast. The current round continues.")
                    .await;
                Ok(ModeVoteOutcome::NoVotes)
            }
            TallyOutcome::Winner {
                option: mode,
                votes,
            } => {
                self.notify(&format!(
                    "**{}** won the mode vote with {} vote{}!",
                    mode.display_name(),
                    votes,
                    if votes == 1 { "" } else { "s" }
                ))
                .await;
                let round_id = self
                    .orchestrator
                    .start_round(mode, StartReason::StaffVote)
                    .await?;
                Ok(ModeVoteOutcome::Started {
                    mode,
                    round_id,
                    votes: Some(votes),
                })
            }
        }
    }

    fn resolve_options(&self, options: Vec<GameMode>) -> Result<Vec<GameMode>, ModeVoteError> {
        let registered = self.orchestrator.registered_modes();
        let mut resolved: Vec<GameMode> = Vec::new();
        let requested = if options.is_empty() {
            registered.clone()
        } else {
            options
        };
        for mode in requested {
            if !registered.contains(&mode) {
                return Err(ModeVoteError::ModeNotEnabled(mode));
            }
            if !resolved.contains(&mode) {
                resolved.push(mode);
            }
        }
        if resolved.len() > MAX_OPTIONS {
            return Err(ModeVoteError::TooManyOptions(resolved.len()));
        }
        Ok(resolved)
    }

    fn render_poll(&self, options: &[(GameMode, String)], note: Option<&str>) -> String {
        let mut out = format!(
            "**Vote for the next game mode!** React within {} seconds.",
            self.vote_window.as_secs()
        );
        if let Some(note) = note.filter(|n| !n.trim().is_empty()) {
            out.push('\n');
            out.push_str(note.trim());
        }
        for (mode, emoji) in options {
            out.push_str(&format!("\n{} {}", emoji, mode.display_name()));
        }
        out
    }

    async fn notify(&self, message: &str) {
        if let Err(e) = self.transport.post_message(message).await {
            warn!("Could not post mode vote result: {}", e);
        }
    }
}
