//! Quest state machine
//!
//! `NotStarted -> Riddle(0) -> Question(0, 0..n) -> Riddle(1) -> ... -> Finished`.
//! Every operation checks the current phase first and returns
//! [`Error::InvalidPhaseTransition`] when called out of turn.

use super::{
    Deck, Phase, QuestionItem, RiddleItem, ScoreEvent, ScoreKind, ScoringRules, Sector,
    SessionState, SessionSummary,
};
use crate::{Error, Result};

/// Where the session went after an answer or an expired countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Same sector, next question
    NextQuestion(usize),
    /// Riddle phase of the sector with this index
    NextSector(usize),
    Finished,
}

/// Result of a riddle submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiddleOutcome {
    pub correct: bool,
    pub delta: i64,
}

/// Result of a multiple-choice submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub delta: i64,
    pub advance: Advance,
}

/// Result of a single countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running { remaining: u32 },
    Expired { penalty: i64, advance: Advance },
}

/// Owns the session and enforces the phase transitions
#[derive(Debug, Clone)]
pub struct QuizStateMachine {
    deck: Deck,
    rules: ScoringRules,
    state: SessionState,
    history: Vec<ScoreEvent>,
}

impl QuizStateMachine {
    /// Build a machine over a validated deck
    pub fn new(deck: Deck, rules: ScoringRules) -> Result<Self> {
        deck.ensure_valid()?;
        rules.validate()?;
        Ok(Self {
            state: SessionState::new(rules.timer_seconds),
            deck,
            rules,
            history: Vec::new(),
        })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    pub fn history(&self) -> &[ScoreEvent] {
        &self.history
    }

    pub fn max_score(&self) -> i64 {
        self.deck.max_score(&self.rules)
    }

    /// Current sector while playing
    pub fn current_sector(&self) -> Option<&Sector> {
        match self.phase() {
            Phase::Riddle | Phase::Question => self.deck.sectors.get(self.state.sector_index),
            _ => None,
        }
    }

    pub fn current_riddle(&self) -> Option<&RiddleItem> {
        if self.phase() == Phase::Riddle {
            self.current_sector().map(|s| &s.riddle)
        } else {
            None
        }
    }

    pub fn current_question(&self) -> Option<&QuestionItem> {
        if self.phase() == Phase::Question {
            self.current_sector()
                .and_then(|s| s.questions.get(self.state.question_index))
        } else {
            None
        }
    }

    /// Whether a countdown should be ticking right now
    pub fn timer_should_run(&self) -> bool {
        self.phase() == Phase::Question
    }

    pub fn is_victory(&self) -> bool {
        self.state.score >= self.rules.victory_threshold
    }

    pub fn start(&mut self, player_name: impl Into<String>) -> Result<()> {
        self.require("start a session", |p| p == Phase::NotStarted)?;

        self.state = SessionState {
            player_name: player_name.into(),
            started: true,
            finished: false,
            sector_index: 0,
            showing_riddle: true,
            question_index: 0,
            score: 0,
            time_remaining: self.rules.timer_seconds,
        };
        self.history.clear();

        tracing::info!(
            "Session started for '{}' over {} sectors",
            self.state.player_name,
            self.deck.len()
        );
        Ok(())
    }

    pub fn submit_riddle_answer(&mut self, text: &str) -> Result<RiddleOutcome> {
        self.require("submit a riddle answer", |p| p == Phase::Riddle)?;

        let correct = self.sector().riddle.accepts(text);
        let delta = if correct { self.rules.riddle_points } else { 0 };
        self.record(ScoreKind::Riddle, correct, delta);

        self.state.showing_riddle = false;
        self.state.time_remaining = self.rules.timer_seconds;

        Ok(RiddleOutcome { correct, delta })
    }

    pub fn submit_question_answer(&mut self, choice: &str) -> Result<AnswerOutcome> {
        self.require("submit a question answer", |p| p == Phase::Question)?;

        let sector = self.sector();
        let correct = sector.questions[self.state.question_index].accepts(choice);
        let question_count = sector.questions.len();

        let delta = if correct {
            self.rules.correct_points
        } else {
            -self.rules.wrong_penalty
        };
        self.record(ScoreKind::Question, correct, delta);

        let advance = if self.state.question_index + 1 < question_count {
            self.state.question_index += 1;
            Advance::NextQuestion(self.state.question_index)
        } else {
            self.advance_sector()
        };

        Ok(AnswerOutcome {
            correct,
            delta,
            advance,
        })
    }

    /// One elapsed second of the question-phase countdown
    ///
    /// Expiry abandons every remaining question of the sector, not only the
    /// current one.
    pub fn on_timeout(&mut self) -> Result<TickOutcome> {
        self.require("tick the countdown", |p| p == Phase::Question)?;

        self.state.time_remaining = self.state.time_remaining.saturating_sub(1);
        if self.state.time_remaining > 0 {
            return Ok(TickOutcome::Running {
                remaining: self.state.time_remaining,
            });
        }

        let penalty = self.rules.wrong_penalty;
        tracing::debug!(
            "Countdown expired in sector {} at question {}",
            self.state.sector_index,
            self.state.question_index
        );
        self.record(ScoreKind::Timeout, false, -penalty);
        let advance = self.advance_sector();

        Ok(TickOutcome::Expired { penalty, advance })
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            deck: self.deck.title.clone(),
            player_name: self.state.player_name.clone(),
            phase: self.phase(),
            score: self.state.score,
            max_score: self.max_score(),
            victory_threshold: self.rules.victory_threshold,
            victory: self.is_victory(),
            sectors_total: self.deck.len(),
            events: self.history.clone(),
        }
    }

    fn advance_sector(&mut self) -> Advance {
        if self.state.sector_index + 1 < self.deck.len() {
            self.state.sector_index += 1;
            self.state.showing_riddle = true;
            self.state.question_index = 0;
            self.state.time_remaining = self.rules.timer_seconds;
            tracing::info!(
                "Advanced to sector '{}'",
                self.deck.sectors[self.state.sector_index].name
            );
            Advance::NextSector(self.state.sector_index)
        } else {
            self.state.finished = true;
            tracing::info!(
                "Session finished with score {} (victory: {})",
                self.state.score,
                self.is_victory()
            );
            Advance::Finished
        }
    }

    fn record(&mut self, kind: ScoreKind, correct: bool, delta: i64) {
        self.state.score = self.state.score.saturating_add(delta);
        let event = ScoreEvent {
            sector_index: self.state.sector_index,
            sector_name: self.sector().name.clone(),
            kind,
            correct,
            delta,
        };
        tracing::debug!(
            "{} in '{}': correct={} delta={} score={}",
            kind.name(),
            event.sector_name,
            correct,
            delta,
            self.state.score
        );
        self.history.push(event);
    }

    // Only called after a phase check that guarantees a playing phase.
    fn sector(&self) -> &Sector {
        &self.deck.sectors[self.state.sector_index]
    }

    fn require(&self, operation: &'static str, allowed: impl Fn(Phase) -> bool) -> Result<()> {
        let phase = self.phase();
        if allowed(phase) {
            Ok(())
        } else {
            Err(Error::invalid_phase(operation, phase))
        }
    }
}
