//! Stdin driver for the simulated channel
//!
//! Each line becomes a channel action (a posted word, a reaction, a deleted
//! message) or an operator command against the orchestrator.

use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};
use wordchain_application::{
    AddOutcome, ModeVoteOutcome, ModeVoteUseCase, RoundError, RoundOrchestrator,
};
use wordchain_domain::{GameMode, StartReason, Token};
use wordchain_infrastructure::SimulatedChannel;
use wordchain_presentation::{ConsoleFormatter, DriverCommand};

pub struct Driver {
    orchestrator: Arc<RoundOrchestrator>,
    mode_vote: Arc<ModeVoteUseCase>,
    channel: Arc<SimulatedChannel>,
}

impl Driver {
    pub fn new(
        orchestrator: Arc<RoundOrchestrator>,
        mode_vote: Arc<ModeVoteUseCase>,
        channel: Arc<SimulatedChannel>,
    ) -> Self {
        Self {
            orchestrator,
            mode_vote,
            channel,
        }
    }

    /// Read commands from stdin until `quit` or end of input
    pub async fn run(&self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        while let Some(line) = lines.next_line().await? {
            match DriverCommand::parse(&line) {
                Ok(None) => {}
                Ok(Some(DriverCommand::Quit)) => break,
                Ok(Some(command)) => self.execute(command).await,
                Err(e) => eprintln!("{}", ConsoleFormatter::error(&e.to_string())),
            }
        }

        Ok(())
    }

    async fn execute(&self, command: DriverCommand) {
        match command {
            DriverCommand::Submit { author, word } => {
                let source = self.channel.user_message(author, &word);
                let token = Token::new(source, author, word, Utc::now());
                match self.orchestrator.submit_add(token).await {
                    Ok(AddOutcome::Completed) => debug!("Message {} ended the sentence", source),
                    Ok(AddOutcome::Accepted) => {}
                    Err(e) => report(&e),
                }
            }
            DriverCommand::Delete(message) => match self.orchestrator.submit_remove(message).await {
                Ok(token) => println!(
                    "{}",
                    ConsoleFormatter::notice(&format!("Removed '{}' from the chain", token.value))
                ),
                Err(e) => report(&e),
            },
            DriverCommand::React {
                message,
                emoji,
                participant,
            } => {
                if let Err(e) = self.channel.react_as(message, &emoji, participant) {
                    eprintln!("{}", ConsoleFormatter::error(&e.to_string()));
                }
            }
            DriverCommand::Start(mode) => {
                if let Err(e) = self.orchestrator.start_round(mode, StartReason::Manual).await {
                    report(&e);
                }
            }
            DriverCommand::End => {
                if !self.orchestrator.force_terminate("operator request").await {
                    println!("{}", ConsoleFormatter::notice("No round is running"));
                }
            }
            DriverCommand::Vote(modes) => self.spawn_vote(modes),
            DriverCommand::Status => println!(
                "{}",
                ConsoleFormatter::status(
                    self.orchestrator.current_mode().await,
                    self.orchestrator.current_status().await,
                    self.orchestrator.active_round_id().await,
                )
            ),
            DriverCommand::Help => println!("{}", DriverCommand::usage()),
            DriverCommand::Quit => {}
        }
    }

    /// The vote waits out its window, so it runs beside the input loop
    fn spawn_vote(&self, modes: Vec<GameMode>) {
        let mode_vote = self.mode_vote.clone();
        tokio::spawn(async move {
            match mode_vote.run(modes, Some("Requested from the console")).await {
                Ok(ModeVoteOutcome::Started { mode, votes, .. }) => {
                    let detail = votes.map_or(String::new(), |v| format!(" with {} vote(s)", v));
                    println!(
                        "{}",
                        ConsoleFormatter::notice(&format!("Mode vote started {}{}", mode, detail))
                    );
                }
                Ok(ModeVoteOutcome::NoVotes) => {
                    println!("{}", ConsoleFormatter::notice("Mode vote ended without votes"));
                }
                Err(e) => {
                    warn!("Mode vote failed: {}", e);
                    eprintln!("{}", ConsoleFormatter::error(&e.to_string()));
                }
            }
        });
    }
}

/// Rejections are part of play; anything else is an error
fn report(error: &RoundError) {
    if error.is_expected() {
        println!("{}", ConsoleFormatter::notice(&error.to_string()));
    } else {
        warn!("{}", error);
        eprintln!("{}", ConsoleFormatter::error(&error.to_string()));
    }
}
