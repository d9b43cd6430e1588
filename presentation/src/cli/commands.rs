//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for wordchain
#[derive(Parser, Debug)]
#[command(name = "wordchain")]
#[command(author, version, about = "Sentence chain game - build a sentence one word at a time")]
#[command(long_about = r#"
wordchain runs a sentence-building game in a simulated chat channel.

Participants take turns adding one word each. A word ending in '.', '?' or '!'
finishes the sentence, the round ends with a summary, and the next round
starts in a randomly chosen mode:

  plain      Plain chain
  letters    Letter vote: every word must (or must not) contain the winning letter
  reversed   Reversed sentence: the finished sentence is read back to front

Configuration files are loaded from (in priority order):
1. WORDCHAIN_* environment variables (e.g. WORDCHAIN_GAME__VOTE_WINDOW_SECONDS=10)
2. --config <path>       Explicit config file
3. ./wordchain.toml      Project-level config
4. ~/.config/wordchain/config.toml   Global config

Lines read from stdin drive the channel:
  <user-id> <word>                 submit a word
  del <message-id>                 delete a submitted word
  react <message-id> <emoji> <user-id>
  start <mode> | end | vote [modes...] | status | help | quit
"#)]
pub struct Cli {
    /// Mode of the first round (overrides game.initial_mode)
    #[arg(short, long, value_name = "MODE")]
    pub mode: Option<String>,

    /// Seconds letter polls and staff votes stay open
    #[arg(long, value_name = "SECONDS")]
    pub vote_window: Option<u64>,

    /// Seed for next-mode and featured picks (reproducible schedules)
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Participant id the bot posts as (overrides bot.id)
    #[arg(long, value_name = "ID")]
    pub bot_id: Option<u64>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Directory for daily rolling log files (overrides logging.directory)
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// JSONL file receiving every round event (overrides logging.event_log)
    #[arg(long, value_name = "PATH")]
    pub event_log: Option<PathBuf>,

    /// Suppress colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Default tracing filter for the verbosity level
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace", // -vvv or more
        }
    }
}
