//! Riddle Quest
//!
//! A Terminal UI riddle and multiple-choice quiz game.
//!
//! This library provides functionality for:
//! - Loading decks of sectors (one riddle plus multiple-choice questions each)
//! - Running a quest session through an explicit phase state machine
//! - Driving the question-phase countdown from a cancellable tick source
//! - A riddle-only treasure hunt variant
//! - Replaying scripted sessions and reporting them as JSON or text

pub mod cli;
pub mod config;
pub mod error;
pub mod quiz;
pub mod tui;

pub use config::Config;
pub use error::{Error, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Initialize logging
///
/// `RUST_LOG` takes precedence over `level`. With a log file, output is
/// appended there so the TUI screen stays clean; otherwise it goes to stderr.
pub fn init_logging(level: &str, file: Option<&std::path::Path>) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    let result = match file {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            registry
                .with(
                    fmt::layer()
                        .with_ansi(false)
                        .with_writer(std::sync::Mutex::new(file)),
                )
                .try_init()
        }
        None => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };

    result.map_err(|e| Error::custom(format!("Failed to initialize logging: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert_eq!(NAME, "riddle-quest");
    }
}
