//! Log output locations from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for the daily rolling tracing log. Unset logs to stderr only.
    pub directory: Option<String>,
    /// JSONL round-event log file. Unset disables the event log.
    pub event_log: Option<String>,
}

impl FileLoggingConfig {
    pub fn directory_path(&self) -> Option<PathBuf> {
        self.directory.as_deref().map(expand_home)
    }

    pub fn event_log_path(&self) -> Option<PathBuf> {
        self.event_log.as_deref().map(expand_home)
    }
}

/// Expand a leading `~/` to the home directory
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_paths() {
        let config = FileLoggingConfig::default();
        assert!(config.directory_path().is_none());
        assert!(config.event_log_path().is_none());
    }

    #[test]
    fn test_plain_path_is_kept() {
        let config = FileLoggingConfig {
            directory: Some("/var/log/wordchain".into()),
            event_log: Some("rounds.jsonl".into()),
        };
        assert_eq!(
            config.directory_path(),
            Some(PathBuf::from("/var/log/wordchain"))
        );
        assert_eq!(config.event_log_path(), Some(PathBuf::from("rounds.jsonl")));
    }
}
