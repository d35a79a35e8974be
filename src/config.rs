//! Configuration management
//!
//! This module handles loading and managing configuration from:
//! - Command-line arguments
//! - Configuration files (TOML)
//! - Defaults

use crate::error::{Error, Result};
use crate::quiz::ScoringRules;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub default: DefaultConfig,

    #[serde(default)]
    pub rules: ScoringRules,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Default settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DefaultConfig {
    /// Deck file used when `--deck` is not given
    pub deck: Option<PathBuf>,

    /// Riddle file used by the hunt when `--riddles` is not given
    pub riddles: Option<PathBuf>,

    /// Name pre-filled on the start screen
    #[serde(default)]
    pub player_name: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path
    pub file: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// File logs go to; the TUI owns the terminal, so interactive commands
    /// fall back to a file under the local data directory
    pub fn file_for(&self, interactive: bool) -> Option<PathBuf> {
        if self.file.is_some() || !interactive {
            return self.file.clone();
        }
        let dir = dirs::data_local_dir().unwrap_or_else(std::env::temp_dir);
        Some(dir.join("riddle-quest").join("riddle-quest.log"))
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("Failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config file {:?}: {}", path, e)))?;

        config.rules.validate()?;
        Ok(config)
    }

    /// Load configuration from default locations
    ///
    /// Searches in order:
    /// 1. ./config.toml
    /// 2. ~/.riddle-quest/config.toml
    /// 3. /etc/riddle-quest/config.toml
    pub fn load() -> Result<Self> {
        let paths = vec![
            PathBuf::from("config.toml"),
            dirs::home_dir()
                .map(|h| h.join(".riddle-quest").join("config.toml"))
                .unwrap_or_else(|| PathBuf::from("/dev/null")),
            PathBuf::from("/etc/riddle-quest/config.toml"),
        ];

        for path in paths {
            if path.is_file() {
                tracing::info!("Loading config from {:?}", path);
                return Self::from_file(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Config::default())
    }

    /// Deck path from the command line, falling back to the config file
    pub fn deck_path(&self, cli: Option<PathBuf>) -> Option<PathBuf> {
        cli.or_else(|| self.default.deck.clone())
    }

    pub fn riddles_path(&self, cli: Option<PathBuf>) -> Option<PathBuf> {
        cli.or_else(|| self.default.riddles.clone())
    }

    /// Rules with command-line overrides applied
    pub fn rules_with(&self, timer_seconds: Option<u32>, victory_threshold: Option<i64>) -> ScoringRules {
        let mut rules = self.rules;
        if let Some(seconds) = timer_seconds {
            rules = rules.with_timer_seconds(seconds);
        }
        if let Some(threshold) = victory_threshold {
            rules = rules.with_victory_threshold(threshold);
        }
        rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.default.deck.is_none());
        assert_eq!(config.default.player_name, "");
        assert_eq!(config.rules, ScoringRules::default());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_toml_config() {
        let toml = r#"
[default]
deck = "decks/default.toml"
player_name = "Ada"

[rules]
timer_seconds = 45
victory_threshold = 40

[logging]
level = "debug"
file = "riddle-quest.log"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.default.deck, Some(PathBuf::from("decks/default.toml")));
        assert_eq!(config.default.player_name, "Ada");
        assert_eq!(config.rules.timer_seconds, 45);
        assert_eq!(config.rules.victory_threshold, 40);
        assert_eq!(config.rules.correct_points, 5);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, Some(PathBuf::from("riddle-quest.log")));
    }

    #[test]
    fn test_cli_overrides() {
        let config: Config = toml::from_str("[default]\ndeck = \"from-config.toml\"").unwrap();
        assert_eq!(
            config.deck_path(Some(PathBuf::from("cli.toml"))),
            Some(PathBuf::from("cli.toml"))
        );
        assert_eq!(config.deck_path(None), Some(PathBuf::from("from-config.toml")));

        let rules = config.rules_with(Some(10), None);
        assert_eq!(rules.timer_seconds, 10);
        assert_eq!(rules.victory_threshold, 54);
    }

    #[test]
    fn test_interactive_logs_to_file() {
        let logging = LoggingConfig::default();
        assert!(logging.file_for(false).is_none());

        let fallback = logging.file_for(true).unwrap();
        assert!(fallback.ends_with("riddle-quest/riddle-quest.log"));

        let explicit = LoggingConfig {
            file: Some(PathBuf::from("quest.log")),
            ..LoggingConfig::default()
        };
        assert_eq!(explicit.file_for(true), Some(PathBuf::from("quest.log")));
        assert_eq!(explicit.file_for(false), Some(PathBuf::from("quest.log")));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = Config::from_file("/nonexistent/riddle-quest.toml").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
