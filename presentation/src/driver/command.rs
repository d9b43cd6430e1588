//! Driver command parsing
//!
//! One line of input is either a word submission (`<user-id> <word>`) or an
//! operator command. Parsing is pure; the binary executes the result.

use thiserror::Error;
use wordchain_domain::{GameMode, MessageRef, ParticipantId};

/// Input line parse errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown command: {0} (try 'help')")]
    UnknownCommand(String),

    #[error("Missing {0}")]
    MissingArgument(&'static str),

    #[error("Not a number: {0}")]
    InvalidNumber(String),

    #[error("Unknown mode: {0}")]
    UnknownMode(String),
}

/// A parsed driver line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverCommand {
    /// A participant posts a word
    Submit { author: ParticipantId, word: String },
    /// The message holding a submitted word is deleted
    Delete(MessageRef),
    React {
        message: MessageRef,
        emoji: String,
        participant: ParticipantId,
    },
    Start(GameMode),
    End,
    /// Staff mode vote; empty means every enabled mode
    Vote(Vec<GameMode>),
    Status,
    Help,
    Quit,
}

impl DriverCommand {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let line = line.trim();
        let Some((head, rest)) = split_first(line) else {
            return Ok(None);
        };

        let command = match head.to_lowercase().as_str() {
            "del" | "delete" => {
                DriverCommand::Delete(MessageRef(number(first(rest, "message id")?)?))
            }
            "react" => {
                let mut args = rest.split_whitespace();
                let mut next = |what| args.next().ok_or(ParseError::MissingArgument(what));
                let message = number(next("message id")?)?;
                let emoji = next("emoji")?;
                let participant = number(next("user id")?)?;
                DriverCommand::React {
                    message: MessageRef(message),
                    emoji: emoji.to_string(),
                    participant: ParticipantId(participant),
                }
            }
            "start" => DriverCommand::Start(mode(first(rest, "mode")?)?),
            "end" => DriverCommand::End,
            "vote" => DriverCommand::Vote(
                rest.split_whitespace()
                    .map(mode)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            "status" => DriverCommand::Status,
            "help" | "?" => DriverCommand::Help,
            "quit" | "exit" => DriverCommand::Quit,
            _ if head.chars().all(|c| c.is_ascii_digit()) => {
                if rest.is_empty() {
                    return Err(ParseError::MissingArgument("word"));
                }
                DriverCommand::Submit {
                    author: ParticipantId(number(head)?),
                    word: rest.to_string(),
                }
            }
            _ => return Err(ParseError::UnknownCommand(head.to_string())),
        };

        Ok(Some(command))
    }

    /// Usage text for the `help` command
    pub fn usage() -> &'static str {
        "\
<user-id> <word>                      submit a word as that user
del <message-id>                      delete the message holding a word
react <message-id> <emoji> <user-id>  react to a message (poll votes)
start <plain|letters|reversed>        force-start a round
end                                   force-end the current round
vote [modes...]                       run a staff mode vote
status                                show the current round
quit                                  leave"
    }
}

fn split_first(line: &str) -> Option<(&str, &str)> {
    if line.is_empty() {
        return None;
    }
    match line.split_once(char::is_whitespace) {
        Some((head, rest)) => Some((head, rest.trim())),
        None => Some((line, "")),
    }
}

fn first<'a>(rest: &'a str, what: &'static str) -> Result<&'a str, ParseError> {
    rest.split_whitespace()
        .next()
        .ok_or(ParseError::MissingArgument(what))
}

fn number(s: &str) -> Result<u64, ParseError> {
    s.parse()
        .map_err(|_| ParseError::InvalidNumber(s.to_string()))
}

fn mode(s: &str) -> Result<GameMode, ParseError> {
    s.parse()
        .map_err(|_| ParseError::UnknownMode(s.to_string()))
}
