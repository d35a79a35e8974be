//! TUI application state

use crate::{Error, Result};
use crate::quiz::{
    Advance, Countdown, Phase, QuizStateMachine, RiddleHunt, SessionSummary, TickOutcome,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

/// Which game the TUI is driving
#[derive(Debug)]
pub enum Game {
    Quest(QuizStateMachine),
    Hunt(RiddleHunt),
}

/// View modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Play,
    Help,
}

/// Message shown under the current prompt after an answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub message: String,
    pub positive: bool,
}

impl Feedback {
    fn good(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            positive: true,
        }
    }

    fn bad(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            positive: false,
        }
    }
}

/// TUI application state
#[derive(Debug)]
pub struct App {
    pub game: Game,
    pub view_mode: ViewMode,
    pub input: String,
    pub selected_option: usize,
    pub feedback: Option<Feedback>,
    pub countdown: Countdown,
    pub should_quit: bool,
    view_stack: Vec<ViewMode>,
}

impl App {
    fn with_game(game: Game, input: String) -> Self {
        Self {
            game,
            view_mode: ViewMode::Play,
            input,
            selected_option: 0,
            feedback: None,
            countdown: Countdown::default(),
            should_quit: false,
            view_stack: Vec::new(),
        }
    }

    /// Quest app; `player_name` pre-fills the start screen
    pub fn quest(machine: QuizStateMachine, player_name: String) -> Self {
        Self::with_game(Game::Quest(machine), player_name)
    }

    pub fn hunt(hunt: RiddleHunt) -> Self {
        Self::with_game(Game::Hunt(hunt), String::new())
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if self.view_mode != mode {
            self.view_stack.push(self.view_mode);
            self.view_mode = mode;
        }
    }

    pub fn pop_view_mode(&mut self) {
        if let Some(prev_mode) = self.view_stack.pop() {
            self.view_mode = prev_mode;
        } else {
            self.view_mode = ViewMode::Play;
        }
    }

    /// Summary of a quest that got past the start screen
    pub fn summary(&self) -> Option<SessionSummary> {
        match &self.game {
            Game::Quest(machine) if machine.phase() != Phase::NotStarted => {
                Some(machine.summary())
            }
            _ => None,
        }
    }

    /// Hand the app back once the loop stops; leaving the start screen or
    /// an unfinished hunt is a user quit
    pub fn finish(self) -> Result<Self> {
        let abandoned = match &self.game {
            Game::Quest(machine) => machine.phase() == Phase::NotStarted,
            Game::Hunt(hunt) => !hunt.is_finished(),
        };
        if abandoned {
            return Err(Error::UserQuit);
        }
        Ok(self)
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return Ok(());
        }

        match key.code {
            KeyCode::F(1) => {
                if self.view_mode == ViewMode::Help {
                    self.pop_view_mode();
                } else {
                    self.set_view_mode(ViewMode::Help);
                }
                return Ok(());
            }
            KeyCode::Esc => {
                if self.view_mode == ViewMode::Help {
                    self.pop_view_mode();
                } else {
                    self.quit();
                }
                return Ok(());
            }
            _ => {}
        }

        if self.view_mode == ViewMode::Help {
            return Ok(());
        }

        match self.game {
            Game::Quest(_) => self.handle_quest_key(key.code)?,
            Game::Hunt(_) => self.handle_hunt_key(key.code)?,
        }
        self.sync_timer(now);
        Ok(())
    }

    /// Deliver countdown ticks that came due since the last frame
    pub fn on_frame(&mut self, now: Instant) -> Result<()> {
        self.sync_timer(now);
        let ticks = self.countdown.due_ticks(now);

        if let Game::Quest(machine) = &mut self.game {
            for _ in 0..ticks {
                // A tick left over from a sector that already ended is dropped.
                if !machine.timer_should_run() {
                    break;
                }
                if let TickOutcome::Expired { penalty, advance } = machine.on_timeout()? {
                    self.input.clear();
                    self.selected_option = 0;
                    self.feedback = Some(Feedback::bad(format!(
                        "Time's up! -{}. {}",
                        penalty,
                        describe_advance(machine, advance)
                    )));
                }
            }
        }

        self.sync_timer(now);
        Ok(())
    }

    fn sync_timer(&mut self, now: Instant) {
        let should_run = match &self.game {
            Game::Quest(machine) => machine.timer_should_run(),
            Game::Hunt(_) => false,
        };
        self.countdown.sync(should_run, now);
    }

    fn handle_quest_key(&mut self, code: KeyCode) -> Result<()> {
        let Game::Quest(machine) = &mut self.game else {
            return Ok(());
        };

        match machine.phase() {
            Phase::NotStarted => {
                if edit_input(&mut self.input, code) {
                    return Ok(());
                }
                if code == KeyCode::Enter {
                    machine.start(self.input.trim())?;
                    self.input.clear();
                    self.feedback = None;
                }
            }
            Phase::Riddle => {
                if edit_input(&mut self.input, code) {
                    return Ok(());
                }
                if code == KeyCode::Enter {
                    let expected = machine
                        .current_riddle()
                        .map(|r| r.answer.clone())
                        .unwrap_or_default();
                    let outcome = machine.submit_riddle_answer(&self.input)?;
                    self.feedback = Some(if outcome.correct {
                        Feedback::good(format!("Riddle solved! +{}", outcome.delta))
                    } else {
                        Feedback::bad(format!("Not quite. The answer was '{}'.", expected))
                    });
                    self.input.clear();
                    self.selected_option = 0;
                }
            }
            Phase::Question => {
                let Some(question) = machine.current_question() else {
                    return Ok(());
                };
                let option_count = question.options.len();

                match code {
                    KeyCode::Up => {
                        self.selected_option =
                            (self.selected_option + option_count - 1) % option_count;
                    }
                    KeyCode::Down => {
                        self.selected_option = (self.selected_option + 1) % option_count;
                    }
                    KeyCode::Char(c) if c.is_ascii_digit() => {
                        let idx = c.to_digit(10).unwrap_or(0) as usize;
                        if (1..=option_count).contains(&idx) {
                            self.selected_option = idx - 1;
                        }
                    }
                    KeyCode::Enter => {
                        let choice = question.options[self.selected_option.min(option_count - 1)]
                            .clone();
                        let expected = question.answer.clone();
                        let outcome = machine.submit_question_answer(&choice)?;

                        let mut message = if outcome.correct {
                            format!("Correct! +{}", outcome.delta)
                        } else {
                            format!("Wrong, {}. The answer was '{}'.", outcome.delta, expected)
                        };
                        if !matches!(outcome.advance, Advance::NextQuestion(_)) {
                            message.push(' ');
                            message.push_str(&describe_advance(machine, outcome.advance));
                        }
                        self.feedback = Some(if outcome.correct {
                            Feedback::good(message)
                        } else {
                            Feedback::bad(message)
                        });
                        self.selected_option = 0;
                    }
                    _ => {}
                }
            }
            Phase::Finished => {
                if matches!(code, KeyCode::Enter | KeyCode::Char('q')) {
                    self.quit();
                }
            }
        }
        Ok(())
    }

    fn handle_hunt_key(&mut self, code: KeyCode) -> Result<()> {
        let Game::Hunt(hunt) = &mut self.game else {
            return Ok(());
        };

        if hunt.is_finished() {
            if matches!(code, KeyCode::Enter | KeyCode::Char('q')) {
                self.should_quit = true;
            }
            return Ok(());
        }

        if edit_input(&mut self.input, code) {
            return Ok(());
        }
        if code == KeyCode::Enter {
            let correct = hunt.submit(&self.input)?;
            self.feedback = Some(if correct {
                Feedback::good("Correct!")
            } else {
                Feedback::bad("Not this time.")
            });
            self.input.clear();
        }
        Ok(())
    }
}

/// Apply a text-editing key; returns whether the key was consumed
fn edit_input(input: &mut String, code: KeyCode) -> bool {
    match code {
        KeyCode::Char(c) => {
            input.push(c);
            true
        }
        KeyCode::Backspace => {
            input.pop();
            true
        }
        _ => false,
    }
}

fn describe_advance(machine: &QuizStateMachine, advance: Advance) -> String {
    match advance {
        Advance::NextQuestion(idx) => format!("Question {}.", idx + 1),
        Advance::NextSector(idx) => format!("Next sector: {}.", machine.deck().sectors[idx].name),
        Advance::Finished => "Quest complete!".to_string(),
    }
}
