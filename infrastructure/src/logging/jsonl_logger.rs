//! JSONL file writer for round events.
//!
//! Each [`RoundEvent`] is serialized as a single JSON line with a `type`
//! field and `timestamp`, appended to the file via a buffered writer.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;
use wordchain_application::RoundEventPublisher;
use wordchain_domain::RoundEvent;

/// JSONL round-event logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlRoundLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlRoundLogger {
    /// Create a logger appending to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create round log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open round log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(event: &RoundEvent) -> serde_json::Value {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        // The serde tag is replaced by the qualified event type
        match serde_json::to_value(event) {
            Ok(serde_json::Value::Object(mut map)) => {
                map.insert(
                    "type".to_string(),
                    serde_json::Value::String(event.event_type().to_string()),
                );
                map.insert(
                    "timestamp".to_string(),
                    serde_json::Value::String(timestamp),
                );
                serde_json::Value::Object(map)
            }
            _ => serde_json::json!({
                "type": event.event_type(),
                "timestamp": timestamp,
                "round_id": event.round_id(),
            }),
        }
    }
}

impl RoundEventPublisher for JsonlRoundLogger {
    fn publish(&self, event: RoundEvent) {
        let Ok(line) = serde_json::to_string(&Self::record(&event)) else {
            return;
        };

        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
            warn!("Could not write to round log {}: {}", self.path.display(), e);
        }
    }
}

impl Drop for JsonlRoundLogger {
    fn drop(&mut self) {
        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        let _ = writer.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordchain_domain::{ContributorLine, GameMode, ParticipantId, RoundId, RoundSummary};

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_jsonl_logger_writes_valid_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rounds.jsonl");
        let logger = JsonlRoundLogger::new(&path).unwrap();
        let id = RoundId::new();

        logger.publish(RoundEvent::Started {
            round_id: id,
            mode: GameMode::Reversed,
            banner: "A reversed round has started".to_string(),
        });
        logger.publish(RoundEvent::Ended {
            round_id: id,
            mode: GameMode::Reversed,
            summary: RoundSummary::constructed(
                "Sat cat The.",
                vec![ContributorLine {
                    author: ParticipantId(1),
                    top_token: Some("cat".to_string()),
                    total: 3,
                }],
            ),
        });

        // Flush
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);

        // Each line should be valid JSON with type + timestamp
        for line in &lines {
            assert!(line.get("timestamp").is_some());
            assert_eq!(line["round_id"], id.to_string());
            assert_eq!(line["mode"], "reversed");
        }

        assert_eq!(lines[0]["type"], "round_started");
        assert_eq!(lines[0]["banner"], "A reversed round has started");
        assert_eq!(lines[1]["type"], "round_ended");
        assert_eq!(lines[1]["summary"]["sentence"], "Sat cat The.");
    }

    #[test]
    fn test_jsonl_logger_appends_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("rounds.jsonl");

        for _ in 0..2 {
            let logger = JsonlRoundLogger::new(&path).unwrap();
            logger.publish(RoundEvent::Ended {
                round_id: RoundId::new(),
                mode: GameMode::Plain,
                summary: RoundSummary::empty(),
            });
        }

        assert_eq!(read_lines(&path).len(), 2);
        assert!(path.exists());
    }

    #[test]
    fn test_jsonl_logger_returns_none_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        assert!(JsonlRoundLogger::new(blocker.join("rounds.jsonl")).is_none());
    }
}
