//! Riddle-only treasure hunt
//!
//! One point per solved riddle, no penalties and no countdown.

use super::RiddleItem;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const BUILTIN_RIDDLES: &str = include_str!("../../decks/hunt.toml");

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RiddleFile {
    riddles: Vec<RiddleItem>,
}

/// Load a list of riddles from a TOML file with `[[riddles]]` tables
pub fn load_riddles(path: impl Into<PathBuf>) -> Result<Vec<RiddleItem>> {
    let path = path.into();
    let contents = std::fs::read_to_string(&path)?;
    let file: RiddleFile = toml::from_str(&contents).map_err(|e| Error::Parse {
        file: path.clone(),
        message: e.to_string(),
    })?;
    Ok(file.riddles)
}

pub fn builtin_riddles() -> Result<Vec<RiddleItem>> {
    let file: RiddleFile = toml::from_str(BUILTIN_RIDDLES)?;
    Ok(file.riddles)
}

/// Progress through a sequence of riddles
#[derive(Debug, Clone)]
pub struct RiddleHunt {
    riddles: Vec<RiddleItem>,
    step: usize,
    score: u32,
    finished: bool,
}

impl RiddleHunt {
    pub fn new(riddles: Vec<RiddleItem>) -> Result<Self> {
        if riddles.is_empty() {
            return Err(Error::deck("Riddle hunt needs at least one riddle"));
        }
        Ok(Self {
            riddles,
            step: 0,
            score: 0,
            finished: false,
        })
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn total(&self) -> usize {
        self.riddles.len()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn current(&self) -> Option<&RiddleItem> {
        if self.finished {
            None
        } else {
            self.riddles.get(self.step)
        }
    }

    /// Check an answer and move on; returns whether it was correct
    pub fn submit(&mut self, text: &str) -> Result<bool> {
        if self.finished {
            return Err(Error::invalid_phase(
                "submit a riddle answer",
                super::Phase::Finished,
            ));
        }

        let correct = self.riddles[self.step].accepts(text);
        if correct {
            self.score += 1;
        }
        tracing::debug!("Hunt riddle {} answered, correct={}", self.step + 1, correct);

        if self.step + 1 < self.riddles.len() {
            self.step += 1;
        } else {
            self.finished = true;
            tracing::info!("Hunt finished: {}/{}", self.score, self.riddles.len());
        }
        Ok(correct)
    }

    pub fn is_perfect(&self) -> bool {
        self.finished && self.score as usize == self.riddles.len()
    }

    pub fn should_celebrate(&self) -> bool {
        self.finished && self.score > 0
    }
}
