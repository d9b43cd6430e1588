//! Structured configuration issues
//!
//! Configuration is checked as a whole after loading. Problems are collected
//! rather than returned one at a time so the operator sees every issue at
//! once.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the game cannot run with this configuration.
    Error,
    /// Non-fatal: the game runs but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A mode name that does not parse.
    UnknownMode,
    /// No mode is enabled, so no round can ever start.
    NoModesEnabled,
    /// The initial mode is not among the enabled modes.
    InitialModeDisabled,
    /// Featured probability outside `[0, 1]`.
    ProbabilityOutOfRange,
    /// Featured rounds are enabled but no eligible mode parses.
    NoFeaturedModes,
    /// A featured-eligible mode that is not enabled.
    FeaturedModeDisabled,
    /// Reserved letters leave fewer letters than poll candidates.
    LetterPoolTooSmall,
    /// A window or timeout of zero seconds.
    ZeroDuration,
    /// Max token length of zero rejects every word.
    ZeroMaxLength,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
