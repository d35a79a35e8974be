//! CLI command implementations
//!
//! This module contains the implementation for each CLI command.

use crate::{Config, Result, cli::Cli};
use std::path::PathBuf;

/// Play command implementation
pub mod play {
    use super::*;
    use crate::cli::Commands;
    use crate::quiz::load_machine;

    /// Execute the play command
    pub async fn execute(args: Cli, config: Config) -> Result<()> {
        let (deck, name, timer_seconds, victory_threshold) = match args.command {
            Commands::Play {
                deck,
                name,
                timer_seconds,
                victory_threshold,
            } => (deck, name, timer_seconds, victory_threshold),
            _ => unreachable!("play::execute called with wrong command"),
        };

        let rules = config.rules_with(timer_seconds, victory_threshold);
        let deck_path = config.deck_path(deck);
        let machine = load_machine(deck_path.as_deref(), rules)?;

        tracing::info!(
            "Loaded deck '{}' with {} sectors and {} questions",
            machine.deck().title,
            machine.deck().len(),
            machine.deck().question_count()
        );

        let prefill = name.unwrap_or_else(|| config.default.player_name.clone());

        tracing::info!("Launching TUI...");
        let summary = crate::tui::run_quest(machine, prefill)?;
        if let Some(summary) = summary {
            crate::cli::output::output_table(&mut std::io::stdout(), &summary)?;
        }

        Ok(())
    }
}

/// Hunt command implementation
pub mod hunt {
    use super::*;
    use crate::quiz::{RiddleHunt, hunt};

    /// Execute the hunt command
    pub async fn execute(riddles: Option<PathBuf>, config: Config) -> Result<()> {
        let riddles = match config.riddles_path(riddles) {
            Some(path) => {
                tracing::info!("Loading riddles from {:?}", path);
                hunt::load_riddles(path)?
            }
            None => hunt::builtin_riddles()?,
        };

        let game = RiddleHunt::new(riddles)?;
        tracing::info!("Launching TUI with {} riddles...", game.total());
        crate::tui::run_hunt(game)?;

        Ok(())
    }
}

/// Replay command implementation
pub mod replay {
    use super::*;
    use crate::cli::{Commands, OutputFormat};
    use crate::quiz::{load_machine, script::Script};

    /// Execute the replay command
    pub fn execute(args: Cli, config: Config) -> Result<()> {
        let (script_path, deck, output_format) = match args.command {
            Commands::Replay {
                script,
                deck,
                output,
            } => (script, deck, output),
            _ => unreachable!("replay::execute called with wrong command"),
        };

        tracing::info!("Replaying script {:?}", script_path);
        let script = Script::from_file(&script_path)?;
        let mut machine = load_machine(config.deck_path(deck).as_deref(), config.rules)?;

        let summary = script.replay(&mut machine)?;
        tracing::info!(
            "Replay ended in phase {} with score {}",
            summary.phase,
            summary.score
        );

        match output_format {
            OutputFormat::Json => crate::cli::output::output_json(&mut std::io::stdout(), &summary),
            OutputFormat::Table => {
                crate::cli::output::output_table(&mut std::io::stdout(), &summary)
            }
        }
    }
}

/// Deck validate command implementation
pub mod deck_validate {
    use super::*;
    use crate::quiz::Deck;

    /// Execute the deck-validate command
    pub fn execute(deck_path: PathBuf, config: Config) -> Result<()> {
        tracing::info!("Validating deck: {:?}", deck_path);

        let deck = match Deck::from_file(&deck_path) {
            Ok(d) => d,
            Err(e) => {
                eprintln!("❌ Failed to load deck: {}", e);
                return Err(e);
            }
        };

        let report = deck.validate(Some(&config.rules));

        println!("📋 Deck Validation Report");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("File: {:?}", deck_path);
        println!();
        println!("Deck: {}", deck.title);
        println!("  Sectors:   {}", deck.len());
        println!("  Questions: {}", deck.question_count());
        println!(
            "  Max score: {} (victory at {})",
            deck.max_score(&config.rules),
            config.rules.victory_threshold
        );
        println!();
        for sector in &deck.sectors {
            println!("    - {} ({} questions)", sector.name, sector.questions.len());
        }
        println!();

        if !report.errors.is_empty() {
            println!("❌ Errors:");
            for error in &report.errors {
                println!("   {}", error);
            }
            println!();
        }

        if !report.warnings.is_empty() {
            println!("⚠️  Warnings:");
            for warning in &report.warnings {
                println!("   {}", warning);
            }
            println!();
        }

        if report.is_valid() {
            println!("✅ Deck is valid!");
            Ok(())
        } else {
            println!(
                "❌ Deck validation failed with {} error(s)",
                report.errors.len()
            );
            Err(crate::Error::deck("Deck validation failed"))
        }
    }
}
