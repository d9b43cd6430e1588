//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "wordchain";
const PROJECT_FILES: [&str; 2] = ["wordchain.toml", ".wordchain.toml"];
const ENV_PREFIX: &str = "WORDCHAIN_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (`WORDCHAIN_GAME__VOTE_WINDOW_SECONDS=10`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./wordchain.toml` or `./.wordchain.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/wordchain/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        // An explicit path that doesn't exist is an error, not a silent skip
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file_exact(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(Box::new)
    }

    /// Load a single file over the defaults, ignoring every other source
    pub fn load_file(path: impl AsRef<Path>) -> Result<FileConfig, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Toml::file_exact(path.as_ref()))
            .extract()
            .map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns `$XDG_CONFIG_HOME/wordchain/config.toml` if set, otherwise the
    /// platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Describe the config file locations being used (for debugging)
    pub fn describe_sources() -> Vec<String> {
        let mut lines = vec!["Configuration sources (in priority order):".to_string()];

        lines.push(format!("  [ENV  ] {}*", ENV_PREFIX));

        match Self::project_config_path() {
            Some(path) => lines.push(format!("  [FOUND] Project: {}", path.display())),
            None => lines.push(format!("  [     ] Project: ./{}", PROJECT_FILES.join(" or ./"))),
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            lines.push(format!("  [{}] Global:  {}", mark, path.display()));
        }

        lines.push("  [     ] Default: built-in defaults".to_string());
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use wordchain_domain::GameMode;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.game.vote_window_seconds, 30);
        assert!(!config.featured.enabled);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        // Should return a path (even if file doesn't exist)
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("wordchain"));
    }

    #[test]
    fn test_load_file_merges_over_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[game]
enabled_modes = ["letters"]
initial_mode = "letters"

[featured]
enabled = true
probability = 1.0
eligible_modes = ["letters"]
"#
        )
        .unwrap();

        let config = ConfigLoader::load_file(file.path()).unwrap();
        assert_eq!(config.game.vote_window_seconds, 30);
        assert_eq!(config.game.parse_initial_mode().0, GameMode::LetterConstrained);
        assert_eq!(config.featured.probability, 1.0);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_load_file_missing_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ConfigLoader::load_file(dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn test_load_file_rejects_wrong_types() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[game]\nvote_window_seconds = \"soon\"").unwrap();
        assert!(ConfigLoader::load_file(file.path()).is_err());
    }

    #[test]
    fn test_describe_sources_lists_defaults_last() {
        let lines = ConfigLoader::describe_sources();
        assert!(lines.last().unwrap().contains("Default"));
    }
}
