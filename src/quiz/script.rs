//! Scripted session replay
//!
//! A script is a TOML file naming the player and listing the actions to feed
//! into a [`QuizStateMachine`]:
//!
//! ```toml
//! player_name = "Ada"
//!
//! [[actions]]
//! action = "riddle"
//! answer = "money"
//!
//! [[actions]]
//! action = "answer"
//! choice = "Return on Investment"
//!
//! [[actions]]
//! action = "expire"
//! ```

use super::{QuizStateMachine, SessionSummary, TickOutcome};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One scripted player or timer action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Riddle {
        answer: String,
    },
    Answer {
        choice: String,
    },
    Tick {
        #[serde(default = "default_tick_count")]
        count: u32,
    },
    /// Tick until the countdown runs out
    Expire,
}

fn default_tick_count() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub player_name: String,
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl Script {
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let contents = std::fs::read_to_string(&path)?;
        toml::from_str(&contents).map_err(|e| Error::Parse {
            file: path,
            message: e.to_string(),
        })
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Start the machine and apply every action in order
    pub fn replay(&self, machine: &mut QuizStateMachine) -> Result<SessionSummary> {
        machine.start(self.player_name.clone())?;

        for (idx, action) in self.actions.iter().enumerate() {
            apply(machine, action).map_err(|e| match e {
                Error::InvalidPhaseTransition { .. } => {
                    Error::script(format!("action #{} ({:?}): {}", idx + 1, action, e))
                }
                other => other,
            })?;
        }

        Ok(machine.summary())
    }
}

fn apply(machine: &mut QuizStateMachine, action: &Action) -> Result<()> {
    match action {
        Action::Riddle { answer } => {
            machine.submit_riddle_answer(answer)?;
        }
        Action::Answer { choice } => {
            machine.submit_question_answer(choice)?;
        }
        Action::Tick { count } => {
            for _ in 0..*count {
                machine.on_timeout()?;
            }
        }
        Action::Expire => loop {
            if let TickOutcome::Expired { .. } = machine.on_timeout()? {
                break;
            }
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{Deck, Phase, QuestionItem, RiddleItem, ScoringRules, Sector};

    fn scenario_machine() -> QuizStateMachine {
        let sector = |name: &str, answer: &str| Sector {
            name: name.to_string(),
            riddle: RiddleItem::new("riddle", answer),
            questions: vec![
                QuestionItem::new("q1", &["yes", "no"], "yes"),
                QuestionItem::new("q2", &["yes", "no"], "yes"),
            ],
        };
        let deck = Deck::new(
            "Scenario",
            vec![sector("Finance", "money"), sector("Mathematics", "seven")],
        );
        QuizStateMachine::new(deck, ScoringRules::default()).unwrap()
    }

    const SCENARIO: &str = r#"
player_name = "Ada"

[[actions]]
action = "riddle"
answer = "  MONEY "

[[actions]]
action = "answer"
choice = "yes"

[[actions]]
action = "answer"
choice = "no"

[[actions]]
action = "riddle"
answer = "eight"

[[actions]]
action = "tick"
count = 10

[[actions]]
action = "expire"
    "#;

    #[test]
    fn test_parse_script() {
        let script = Script::from_toml(SCENARIO).unwrap();
        assert_eq!(script.player_name, "Ada");
        assert_eq!(script.actions.len(), 6);
        assert_eq!(script.actions[4], Action::Tick { count: 10 });
        assert_eq!(script.actions[5], Action::Expire);
    }

    #[test]
    fn test_replay_scenario() {
        let script = Script::from_toml(SCENARIO).unwrap();
        let mut machine = scenario_machine();
        let summary = script.replay(&mut machine).unwrap();

        assert_eq!(summary.player_name, "Ada");
        assert_eq!(summary.phase, Phase::Finished);
        assert_eq!(summary.score, 6);
        assert!(!summary.victory);
        assert_eq!(summary.events.len(), 5);
        assert_eq!(summary.timeouts(), 1);
    }

    #[test]
    fn test_tick_defaults_to_one() {
        let script = Script::from_toml(
            r#"
[[actions]]
action = "riddle"
answer = "money"

[[actions]]
action = "tick"
            "#,
        )
        .unwrap();
        let mut machine = scenario_machine();
        script.replay(&mut machine).unwrap();
        assert_eq!(machine.state().time_remaining, 59);
    }

    #[test]
    fn test_out_of_phase_action_fails() {
        let script = Script::from_toml(
            r#"
[[actions]]
action = "answer"
choice = "yes"
            "#,
        )
        .unwrap();
        let mut machine = scenario_machine();
        let err = script.replay(&mut machine).unwrap_err();
        assert!(matches!(err, Error::Script(_)));
        assert!(err.to_string().contains("action #1"));
    }

    #[test]
    fn test_from_file_parse_error_names_path() {
        let path =
            std::env::temp_dir().join(format!("riddle-quest-script-{}.toml", std::process::id()));
        std::fs::write(&path, "[[actions]]\naction = \"dance\"").unwrap();

        let err = Script::from_file(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(
            matches!(err, Error::Parse { ref file, .. } if file == &path),
            "{:?}",
            err
        );
    }
}
