//! CLI module
//!
//! This module defines the command-line interface using clap and implements
//! the command execution logic.

use crate::{Config, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;
pub mod output;

/// Riddle Quest CLI
#[derive(Parser, Debug)]
#[command(name = "riddle-quest")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Whether the command takes over the terminal with the TUI
    pub fn is_interactive(&self) -> bool {
        matches!(self.command, Commands::Play { .. } | Commands::Hunt { .. })
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play a quest of riddles and multiple-choice questions
    Play {
        /// Path to deck file (built-in deck if omitted)
        #[arg(short, long)]
        deck: Option<PathBuf>,

        /// Player name (asked for on the start screen if omitted)
        #[arg(short, long)]
        name: Option<String>,

        /// Seconds on each sector's question countdown
        #[arg(long)]
        timer_seconds: Option<u32>,

        /// Minimum final score that counts as a victory
        #[arg(long, allow_negative_numbers = true)]
        victory_threshold: Option<i64>,
    },

    /// Play a riddle-only treasure hunt
    Hunt {
        /// Path to riddle file (built-in riddles if omitted)
        #[arg(short, long)]
        riddles: Option<PathBuf>,
    },

    /// Replay a scripted session and print its summary
    Replay {
        /// Path to script file
        #[arg(short, long)]
        script: PathBuf,

        /// Path to deck file (built-in deck if omitted)
        #[arg(short, long)]
        deck: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        output: OutputFormat,
    },

    /// Validate a deck file
    DeckValidate {
        /// Path to deck file
        deck: PathBuf,
    },
}

/// Output format types
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text table
    Table,
}

/// Execute the CLI command
pub async fn execute(args: Cli, config: Config) -> Result<()> {
    match args.command {
        Commands::Play { .. } => commands::play::execute(args, config).await,
        Commands::Hunt { riddles } => commands::hunt::execute(riddles, config).await,
        Commands::Replay { .. } => commands::replay::execute(args, config),
        Commands::DeckValidate { deck } => commands::deck_validate::execute(deck, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "riddle-quest",
            "play",
            "--name",
            "Ada",
            "--timer-seconds",
            "30",
        ])
        .unwrap();
        assert!(cli.is_interactive());

        match cli.command {
            Commands::Play {
                name,
                timer_seconds,
                deck,
                victory_threshold,
            } => {
                assert_eq!(name.as_deref(), Some("Ada"));
                assert_eq!(timer_seconds, Some(30));
                assert!(deck.is_none());
                assert!(victory_threshold.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_replay_parsing() {
        let cli = Cli::try_parse_from([
            "riddle-quest",
            "--config",
            "quest.toml",
            "replay",
            "--script",
            "run.toml",
            "--output",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("quest.toml")));
        assert!(!cli.is_interactive());
        assert!(matches!(
            cli.command,
            Commands::Replay {
                output: OutputFormat::Json,
                ..
            }
        ));
    }

    #[test]
    fn test_replay_requires_script() {
        assert!(Cli::try_parse_from(["riddle-quest", "replay"]).is_err());
    }
}
