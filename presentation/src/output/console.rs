//! Console formatting for the simulated channel

use colored::Colorize;
use wordchain_domain::{GameMode, MessageRef, ParticipantId, RoundId, RoundStatus};

/// Formats channel activity and driver feedback for the terminal
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Startup banner
    pub fn welcome(modes: &[GameMode]) -> String {
        let names: Vec<&str> = modes.iter().map(|m| m.as_str()).collect();
        format!(
            "{}\n{} {}\n{}\n",
            Self::header("wordchain"),
            "Modes:".cyan().bold(),
            names.join(", "),
            "Type 'help' for commands.".dimmed()
        )
    }

    /// A message posted in the channel
    pub fn post(id: MessageRef, author: ParticipantId, is_bot: bool, content: &str) -> String {
        let label = format!("#{} {}", id, Self::who(author, is_bot));
        let label = if is_bot {
            label.yellow().bold()
        } else {
            label.green()
        };

        if content.contains('\n') {
            format!("{}\n{}", label, Self::indent(content, "  | "))
        } else {
            format!("{} {}", label, content)
        }
    }

    /// A reaction added to a message
    pub fn reaction(message: MessageRef, emoji: &str, by: ParticipantId, is_bot: bool) -> String {
        format!("  {} {} on #{} by {}", "+".dimmed(), emoji, message, Self::who(by, is_bot))
            .dimmed()
            .to_string()
    }

    /// Current round status line
    pub fn status(
        mode: Option<GameMode>,
        status: Option<RoundStatus>,
        round: Option<RoundId>,
    ) -> String {
        match (mode, status, round) {
            (Some(mode), Some(status), Some(round)) => format!(
                "{} {} ({}) round {}",
                "Status:".cyan().bold(),
                mode.display_name(),
                status.as_str(),
                round.short()
            ),
            _ => format!("{} no round is running", "Status:".cyan().bold()),
        }
    }

    pub fn notice(text: &str) -> String {
        format!("{} {}", "»".cyan(), text)
    }

    pub fn error(text: &str) -> String {
        format!("{} {}", "error:".red().bold(), text)
    }

    fn who(participant: ParticipantId, is_bot: bool) -> String {
        if is_bot {
            "bot".to_string()
        } else {
            format!("user {}", participant)
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
