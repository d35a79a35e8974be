//! Deck definition
//!
//! A deck is the static, immutable table of sectors a quest is played over.
//! Decks are loaded from TOML files or taken from the built-in deck.

use crate::{Error, Result, quiz::ScoringRules};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

const BUILTIN_DECK: &str = include_str!("../../decks/default.toml");

/// A free-text riddle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiddleItem {
    pub question: String,
    pub answer: String,
}

impl RiddleItem {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Case-insensitive, whitespace-trimmed comparison
    pub fn accepts(&self, text: &str) -> bool {
        normalize(text) == normalize(&self.answer)
    }
}

/// A multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionItem {
    pub text: String,
    pub options: Vec<String>,
    pub answer: String,
}

impl QuestionItem {
    pub fn new(text: impl Into<String>, options: &[&str], answer: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            options: options.iter().map(|o| o.to_string()).collect(),
            answer: answer.into(),
        }
    }

    /// Exact, case-sensitive comparison
    pub fn accepts(&self, choice: &str) -> bool {
        choice == self.answer
    }
}

/// A themed riddle followed by its questions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sector {
    pub name: String,
    pub riddle: RiddleItem,
    #[serde(default)]
    pub questions: Vec<QuestionItem>,
}

impl Sector {
    /// Highest score this sector can contribute
    pub fn max_score(&self, rules: &ScoringRules) -> i64 {
        let questions = i64::try_from(self.questions.len()).unwrap_or(i64::MAX);
        rules
            .riddle_points
            .saturating_add(rules.correct_points.saturating_mul(questions))
    }
}

/// An ordered table of sectors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    #[serde(default = "default_title")]
    pub title: String,
    pub sectors: Vec<Sector>,
}

fn default_title() -> String {
    "Riddle Quest".to_string()
}

/// Findings of a deck validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeckReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl DeckReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

pub(crate) fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

impl Deck {
    pub fn new(title: impl Into<String>, sectors: Vec<Sector>) -> Self {
        Self {
            title: title.into(),
            sectors,
        }
    }

    /// Load a deck from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let contents = std::fs::read_to_string(&path)?;
        Self::from_toml(&contents).map_err(|e| match e {
            Error::Parse { message, .. } => Error::Parse {
                file: path.clone(),
                message,
            },
            other => other,
        })
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let deck: Deck = toml::from_str(contents)?;
        Ok(deck)
    }

    /// The deck shipped with the binary
    pub fn builtin() -> Result<Self> {
        Self::from_toml(BUILTIN_DECK)
    }

    pub fn len(&self) -> usize {
        self.sectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
    }

    pub fn question_count(&self) -> usize {
        self.sectors.iter().map(|s| s.questions.len()).sum()
    }

    /// Highest score a perfect session can reach
    pub fn max_score(&self, rules: &ScoringRules) -> i64 {
        self.sectors
            .iter()
            .fold(0i64, |total, s| total.saturating_add(s.max_score(rules)))
    }

    /// Check the deck's structure and, given rules, whether victory is reachable
    pub fn validate(&self, rules: Option<&ScoringRules>) -> DeckReport {
        let mut report = DeckReport::default();

        if self.sectors.is_empty() {
            report.errors.push("Deck has no sectors".to_string());
        }

        for (idx, sector) in self.sectors.iter().enumerate() {
            let label = if sector.name.trim().is_empty() {
                report
                    .warnings
                    .push(format!("Sector #{} has an empty name", idx + 1));
                format!("#{}", idx + 1)
            } else {
                format!("'{}'", sector.name)
            };

            if sector.riddle.answer.trim().is_empty() {
                report
                    .errors
                    .push(format!("Sector {} has an empty riddle answer", label));
            } else if sector.riddle.answer.trim() != sector.riddle.answer {
                report.warnings.push(format!(
                    "Sector {} riddle answer has surrounding whitespace",
                    label
                ));
            }

            if sector.questions.is_empty() {
                report
                    .errors
                    .push(format!("Sector {} has no questions", label));
            }

            for (q_idx, question) in sector.questions.iter().enumerate() {
                let q_label = format!("Sector {} question {}", label, q_idx + 1);
                if question.options.len() < 2 {
                    report
                        .errors
                        .push(format!("{} needs at least 2 options", q_label));
                }
                if !question.options.contains(&question.answer) {
                    report.errors.push(format!(
                        "{} answer '{}' is not one of its options",
                        q_label, question.answer
                    ));
                }
                let mut seen = HashSet::new();
                if !question.options.iter().all(|o| seen.insert(o)) {
                    report
                        .warnings
                        .push(format!("{} has duplicate options", q_label));
                }
            }
        }

        if let Some(rules) = rules {
            let max = self.max_score(rules);
            if report.is_valid() && max < rules.victory_threshold {
                report.warnings.push(format!(
                    "Victory threshold {} is above the maximum attainable score {}",
                    rules.victory_threshold, max
                ));
            }
        }

        report
    }

    /// Fail on the first structural error
    pub fn ensure_valid(&self) -> Result<()> {
        let report = self.validate(None);
        match report.errors.into_iter().next() {
            Some(first) => Err(Error::deck(first)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_sector() -> Sector {
        Sector {
            name: "Finance".to_string(),
            riddle: RiddleItem::new("What grows when saved?", "money"),
            questions: vec![QuestionItem::new(
                "ROI?",
                &["Return on Investment", "Rate of Inflation"],
                "Return on Investment",
            )],
        }
    }

    #[test]
    fn test_riddle_normalization() {
        let riddle = RiddleItem::new("q", "Keyboard");
        assert!(riddle.accepts("keyboard"));
        assert!(riddle.accepts("  KEYBOARD \n"));
        assert!(!riddle.accepts("key board"));
    }

    #[test]
    fn test_question_exact_match() {
        let question = QuestionItem::new("q", &["Au", "Ag"], "Au");
        assert!(question.accepts("Au"));
        assert!(!question.accepts("au"));
        assert!(!question.accepts(" Au"));
    }

    #[test]
    fn test_builtin_deck_is_valid() {
        let deck = Deck::builtin().unwrap();
        assert_eq!(deck.len(), 4);
        assert_eq!(deck.question_count(), 12);
        assert_eq!(deck.sectors[0].name, "Finance");
        assert_eq!(deck.sectors[1].name, "Mathematics");

        let report = deck.validate(Some(&ScoringRules::default()));
        assert!(report.is_valid(), "{:?}", report.errors);
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
        assert_eq!(deck.max_score(&ScoringRules::default()), 80);
    }

    #[test]
    fn test_parse_toml_deck() {
        let toml = r#"
title = "Tiny"

[[sectors]]
name = "Finance"

[sectors.riddle]
question = "What grows when saved?"
answer = "money"

[[sectors.questions]]
text = "ROI?"
options = ["Return on Investment", "Rate of Inflation"]
answer = "Return on Investment"
        "#;

        let deck = Deck::from_toml(toml).unwrap();
        assert_eq!(deck.title, "Tiny");
        assert_eq!(deck.sectors, vec![sample_sector()]);
        assert!(deck.ensure_valid().is_ok());
    }

    #[test]
    fn test_empty_deck_rejected() {
        let deck = Deck::new("Empty", vec![]);
        let err = deck.ensure_valid().unwrap_err();
        assert_eq!(err.to_string(), "Invalid deck: Deck has no sectors");
    }

    #[test]
    fn test_structural_errors() {
        let mut sector = sample_sector();
        sector.questions.push(QuestionItem::new("lonely", &["only"], "only"));
        sector
            .questions
            .push(QuestionItem::new("missing", &["a", "b"], "c"));
        let mut empty = sample_sector();
        empty.name = "Empty".to_string();
        empty.questions.clear();

        let report = Deck::new("Broken", vec![sector, empty]).validate(None);
        assert_eq!(report.errors.len(), 3);
        assert!(report.errors[0].contains("at least 2 options"));
        assert!(report.errors[1].contains("not one of its options"));
        assert!(report.errors[2].contains("'Empty' has no questions"));
    }

    #[test]
    fn test_warnings() {
        let mut sector = sample_sector();
        sector.name = String::new();
        sector.riddle.answer = " money ".to_string();
        sector.questions[0].options.push("Rate of Inflation".to_string());

        let report = Deck::new("Warn", vec![sector]).validate(Some(&ScoringRules::default()));
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 4);
        assert!(report.warnings[3].contains("maximum attainable score 10"));
    }

    #[test]
    fn test_max_score_saturates() {
        let rules = ScoringRules {
            riddle_points: i64::MAX,
            correct_points: i64::MAX,
            ..ScoringRules::default()
        };
        let deck = Deck::new("Huge", vec![sample_sector(), sample_sector()]);
        assert_eq!(deck.sectors[0].max_score(&rules), i64::MAX);
        assert_eq!(deck.max_score(&rules), i64::MAX);
    }

    #[test]
    fn test_from_file_parse_error_names_path() {
        let path =
            std::env::temp_dir().join(format!("riddle-quest-deck-{}.toml", std::process::id()));
        std::fs::write(&path, "[[sectors]]\nname = ").unwrap();

        let err = Deck::from_file(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(
            matches!(err, Error::Parse { ref file, .. } if file == &path),
            "{:?}",
            err
        );
    }
}
