//! Quiz module - Decks, scoring rules and the session state machine

use crate::Result;

pub mod deck;
pub mod hunt;
pub mod machine;
pub mod rules;
pub mod script;
pub mod session;
pub mod timer;

// Re-export key types
pub use deck::{Deck, DeckReport, QuestionItem, RiddleItem, Sector};
pub use hunt::RiddleHunt;
pub use machine::{Advance, AnswerOutcome, QuizStateMachine, RiddleOutcome, TickOutcome};
pub use rules::ScoringRules;
pub use session::{Phase, ScoreEvent, ScoreKind, SessionState, SessionSummary};
pub use timer::Countdown;

/// Build a state machine from an optional deck file, falling back to the built-in deck
pub fn load_machine(
    deck_path: Option<&std::path::Path>,
    rules: ScoringRules,
) -> Result<QuizStateMachine> {
    let deck = match deck_path {
        Some(path) => {
            tracing::info!("Loading deck from {:?}", path);
            Deck::from_file(path)?
        }
        None => Deck::builtin()?,
    };
    QuizStateMachine::new(deck, rules)
}
