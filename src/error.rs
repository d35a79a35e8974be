//! This module defines all error types used throughout the application.

use crate::quiz::Phase;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors (file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// An operation was invoked outside the phase it requires
    #[error("Invalid phase transition: cannot {operation} while {phase}")]
    InvalidPhaseTransition {
        operation: &'static str,
        phase: Phase,
    },

    /// Deck contents violate a structural rule
    #[error("Invalid deck: {0}")]
    Deck(String),

    /// TOML/JSON parsing errors
    #[error("Parse error in {file:?}: {message}")]
    Parse { file: PathBuf, message: String },

    /// Replay script errors
    #[error("Script error: {0}")]
    Script(String),

    /// TUI/rendering errors
    #[error("TUI error: {0}")]
    Tui(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// User quit (Ctrl+C, Esc in TUI) before the game got going
    #[error("User quit")]
    UserQuit,

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a custom error with a message
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }

    /// Create a deck validation error
    pub fn deck(msg: impl Into<String>) -> Self {
        Self::Deck(msg.into())
    }

    /// Create a script error
    pub fn script(msg: impl Into<String>) -> Self {
        Self::Script(msg.into())
    }

    /// Create an invalid phase transition error
    pub fn invalid_phase(operation: &'static str, phase: Phase) -> Self {
        Self::InvalidPhaseTransition { operation, phase }
    }

    /// Check if error is a phase contract violation
    pub fn is_invalid_phase(&self) -> bool {
        matches!(self, Error::InvalidPhaseTransition { .. })
    }

    /// Check if error is a user quit
    pub fn is_user_quit(&self) -> bool {
        matches!(self, Error::UserQuit)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Parse {
            file: PathBuf::from("unknown"),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse {
            file: PathBuf::from("<json>"),
            message: err.to_string(),
        }
    }
}

// Helper macros for creating errors

/// Create a custom error with formatting
#[macro_export]
macro_rules! custom_error {
    ($($arg:tt)*) => {
        $crate::error::Error::Custom(format!($($arg)*))
    };
}

/// Bail with a custom error message
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::custom_error!($($arg)*))
    };
}

/// Ensure a condition is true or return error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::custom("test error");
        assert_eq!(err.to_string(), "test error");

        let err = Error::deck("no sectors");
        assert_eq!(err.to_string(), "Invalid deck: no sectors");
    }

    #[test]
    fn test_invalid_phase_message() {
        let err = Error::invalid_phase("submit a question answer", Phase::Riddle);
        assert!(err.is_invalid_phase());
        assert_eq!(
            err.to_string(),
            "Invalid phase transition: cannot submit a question answer while showing a riddle"
        );
    }

    #[test]
    fn test_user_quit() {
        let err = Error::UserQuit;
        assert!(err.is_user_quit());

        let err = Error::custom("other");
        assert!(!err.is_user_quit());
    }

    fn guarded(value: i32) -> Result<i32> {
        crate::ensure!(value > 0, "value must be positive, got {}", value);
        Ok(value)
    }

    #[test]
    fn test_ensure_macro() {
        assert_eq!(guarded(3).unwrap(), 3);
        let err = guarded(-1).unwrap_err();
        assert_eq!(err.to_string(), "value must be positive, got -1");
    }
}
