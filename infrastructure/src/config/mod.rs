//! Configuration file loading for wordchain
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `WORDCHAIN_*` environment variables (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./wordchain.toml` or `./.wordchain.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/wordchain/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileBotConfig, FileConfig, FileEmotesConfig, FileFeaturedConfig,
    FileGameConfig, FileLoggingConfig, FileValidationConfig,
};
pub use loader::ConfigLoader;
