//! Bot identity from TOML (`[bot]` section)

use serde::{Deserialize, Serialize};

/// Raw bot configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBotConfig {
    /// The bot's own participant id; its reactions never count as votes
    pub id: Option<u64>,
}
