//! Scoring and timer rules

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Seconds on the question-phase countdown of each sector
pub const TIMER_SECONDS: u32 = 60;
/// Points for a solved riddle
pub const RIDDLE_POINTS: i64 = 5;
/// Points for a correct multiple-choice answer
pub const CORRECT_POINTS: i64 = 5;
/// Points lost for a wrong answer or an expired countdown
pub const WRONG_PENALTY: i64 = 2;
/// Minimum final score that counts as a victory
pub const VICTORY_THRESHOLD: i64 = 54;
/// Largest accepted point or penalty magnitude
pub const MAX_POINTS: i64 = 1_000_000;

/// Tunable constants of a quest session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRules {
    #[serde(default = "default_timer_seconds")]
    pub timer_seconds: u32,

    #[serde(default = "default_riddle_points")]
    pub riddle_points: i64,

    #[serde(default = "default_correct_points")]
    pub correct_points: i64,

    #[serde(default = "default_wrong_penalty")]
    pub wrong_penalty: i64,

    #[serde(default = "default_victory_threshold")]
    pub victory_threshold: i64,
}

fn default_timer_seconds() -> u32 {
    TIMER_SECONDS
}

fn default_riddle_points() -> i64 {
    RIDDLE_POINTS
}

fn default_correct_points() -> i64 {
    CORRECT_POINTS
}

fn default_wrong_penalty() -> i64 {
    WRONG_PENALTY
}

fn default_victory_threshold() -> i64 {
    VICTORY_THRESHOLD
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            timer_seconds: default_timer_seconds(),
            riddle_points: default_riddle_points(),
            correct_points: default_correct_points(),
            wrong_penalty: default_wrong_penalty(),
            victory_threshold: default_victory_threshold(),
        }
    }
}

impl ScoringRules {
    pub fn with_timer_seconds(mut self, seconds: u32) -> Self {
        self.timer_seconds = seconds;
        self
    }

    pub fn with_victory_threshold(mut self, threshold: i64) -> Self {
        self.victory_threshold = threshold;
        self
    }

    /// Reject rule sets the state machine cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.timer_seconds == 0 {
            return Err(Error::Config(
                "timer_seconds must be at least 1".to_string(),
            ));
        }
        if self.riddle_points < 0 || self.correct_points < 0 || self.wrong_penalty < 0 {
            return Err(Error::Config(
                "points and penalties are magnitudes and cannot be negative".to_string(),
            ));
        }
        if self.riddle_points > MAX_POINTS
            || self.correct_points > MAX_POINTS
            || self.wrong_penalty > MAX_POINTS
        {
            return Err(Error::Config(format!(
                "points and penalties cannot exceed {}",
                MAX_POINTS
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let rules = ScoringRules::default();
        assert_eq!(rules.timer_seconds, 60);
        assert_eq!(rules.riddle_points, 5);
        assert_eq!(rules.correct_points, 5);
        assert_eq!(rules.wrong_penalty, 2);
        assert_eq!(rules.victory_threshold, 54);
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let rules: ScoringRules = toml::from_str("timer_seconds = 30").unwrap();
        assert_eq!(rules.timer_seconds, 30);
        assert_eq!(rules.wrong_penalty, WRONG_PENALTY);
    }

    #[test]
    fn test_zero_timer_rejected() {
        let rules = ScoringRules::default().with_timer_seconds(0);
        assert!(matches!(rules.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_negative_penalty_rejected() {
        let rules = ScoringRules {
            wrong_penalty: -2,
            ..ScoringRules::default()
        };
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_oversized_points_rejected() {
        let rules = ScoringRules {
            riddle_points: i64::MAX,
            ..ScoringRules::default()
        };
        assert!(matches!(rules.validate(), Err(Error::Config(_))));

        let at_cap = ScoringRules {
            correct_points: MAX_POINTS,
            ..ScoringRules::default()
        };
        assert!(at_cap.validate().is_ok());
    }
}
