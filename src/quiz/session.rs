//! Session state representation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Mutable record of one player's progress through a deck
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub player_name: String,
    pub started: bool,
    pub finished: bool,
    pub sector_index: usize,
    pub showing_riddle: bool,
    pub question_index: usize,
    pub score: i64,
    pub time_remaining: u32,
}

impl SessionState {
    pub fn new(timer_seconds: u32) -> Self {
        Self {
            player_name: String::new(),
            started: false,
            finished: false,
            sector_index: 0,
            showing_riddle: false,
            question_index: 0,
            score: 0,
            time_remaining: timer_seconds,
        }
    }

    /// The single phase the flags describe
    pub fn phase(&self) -> Phase {
        if !self.started {
            Phase::NotStarted
        } else if self.finished {
            Phase::Finished
        } else if self.showing_riddle {
            Phase::Riddle
        } else {
            Phase::Question
        }
    }
}

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    NotStarted,
    Riddle,
    Question,
    Finished,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::NotStarted => "Not started",
            Phase::Riddle => "Riddle",
            Phase::Question => "Question",
            Phase::Finished => "Finished",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Phase::NotStarted => "not started",
            Phase::Riddle => "showing a riddle",
            Phase::Question => "showing a question",
            Phase::Finished => "finished",
        };
        f.write_str(text)
    }
}

/// What a scoring event was triggered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreKind {
    Riddle,
    Question,
    Timeout,
}

impl ScoreKind {
    pub fn name(&self) -> &'static str {
        match self {
            ScoreKind::Riddle => "riddle",
            ScoreKind::Question => "question",
            ScoreKind::Timeout => "timeout",
        }
    }
}

/// One entry of the session's scoring history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEvent {
    pub sector_index: usize,
    pub sector_name: String,
    pub kind: ScoreKind,
    pub correct: bool,
    pub delta: i64,
}

/// Serializable end-of-session report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub deck: String,
    pub player_name: String,
    pub phase: Phase,
    pub score: i64,
    pub max_score: i64,
    pub victory_threshold: i64,
    pub victory: bool,
    pub sectors_total: usize,
    pub events: Vec<ScoreEvent>,
}

impl SessionSummary {
    pub fn correct_count(&self) -> usize {
        self.events.iter().filter(|e| e.correct).count()
    }

    pub fn timeouts(&self) -> usize {
        self.events
            .iter()
            .filter(|e| e.kind == ScoreKind::Timeout)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_derivation() {
        let mut state = SessionState::new(60);
        assert_eq!(state.phase(), Phase::NotStarted);

        state.started = true;
        state.showing_riddle = true;
        assert_eq!(state.phase(), Phase::Riddle);

        state.showing_riddle = false;
        assert_eq!(state.phase(), Phase::Question);

        state.finished = true;
        assert_eq!(state.phase(), Phase::Finished);
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::Question.to_string(), "showing a question");
        assert_eq!(Phase::Finished.name(), "Finished");
    }
}
