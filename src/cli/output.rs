//! Output formatting module
//!
//! This module handles formatting session summaries for different output formats.

use crate::{Result, quiz::SessionSummary};
use serde_json::json;

/// Output a session summary as JSON
pub fn output_json(w: &mut impl std::io::Write, summary: &SessionSummary) -> Result<()> {
    let output = json!({
        "summary": {
            "deck": summary.deck,
            "player": summary.player_name,
            "phase": summary.phase.name(),
            "score": summary.score,
            "max_score": summary.max_score,
            "victory_threshold": summary.victory_threshold,
            "victory": summary.victory,
            "correct": summary.correct_count(),
            "timeouts": summary.timeouts(),
        },
        "events": summary.events.iter().map(|event| {
            json!({
                "sector": event.sector_name,
                "sector_index": event.sector_index,
                "kind": event.kind.name(),
                "correct": event.correct,
                "delta": event.delta,
            })
        }).collect::<Vec<_>>(),
    });

    serde_json::to_writer_pretty(&mut *w, &output)?;
    writeln!(w)?; // Add trailing newline
    Ok(())
}

/// Output a session summary as text table
pub fn output_table(w: &mut impl std::io::Write, summary: &SessionSummary) -> Result<()> {
    writeln!(w, "Riddle Quest - Session Results")?;
    writeln!(w, "{}", "=".repeat(60))?;
    writeln!(w)?;

    writeln!(w, "Summary:")?;
    writeln!(w, "  Deck:     {}", summary.deck)?;
    writeln!(w, "  Player:   {}", summary.player_name)?;
    writeln!(w, "  Phase:    {}", summary.phase.name())?;
    writeln!(w, "  Score:    {} / {}", summary.score, summary.max_score)?;
    writeln!(
        w,
        "  Result:   {} (threshold {})",
        if summary.victory { "Victory" } else { "Defeat" },
        summary.victory_threshold
    )?;
    writeln!(w)?;

    if !summary.events.is_empty() {
        writeln!(w, "Events:")?;
        writeln!(w, "{:-<60}", "")?;
        writeln!(
            w,
            "{:<4} {:<24} {:<10} {:>8} {:>8}",
            "#", "Sector", "Kind", "Correct", "Delta"
        )?;
        writeln!(w, "{:-<60}", "")?;

        for (idx, event) in summary.events.iter().enumerate() {
            let sector = if event.sector_name.chars().count() > 22 {
                let short: String = event.sector_name.chars().take(19).collect();
                format!("{}...", short)
            } else {
                event.sector_name.clone()
            };

            writeln!(
                w,
                "{:<4} {:<24} {:<10} {:>8} {:>+8}",
                idx + 1,
                sector,
                event.kind.name(),
                if event.correct { "yes" } else { "no" },
                event.delta
            )?;
        }
        writeln!(w)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{Phase, ScoreEvent, ScoreKind};

    fn create_test_summary() -> SessionSummary {
        SessionSummary {
            deck: "Scenario".to_string(),
            player_name: "Ada".to_string(),
            phase: Phase::Finished,
            score: 3,
            max_score: 10,
            victory_threshold: 54,
            victory: false,
            sectors_total: 1,
            events: vec![
                ScoreEvent {
                    sector_index: 0,
                    sector_name: "Finance".to_string(),
                    kind: ScoreKind::Riddle,
                    correct: true,
                    delta: 5,
                },
                ScoreEvent {
                    sector_index: 0,
                    sector_name: "Finance".to_string(),
                    kind: ScoreKind::Timeout,
                    correct: false,
                    delta: -2,
                },
            ],
        }
    }

    #[test]
    fn test_output_json() {
        let mut output = Vec::new();
        output_json(&mut output, &create_test_summary()).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["summary"]["score"], 3);
        assert_eq!(value["summary"]["victory"], false);
        assert_eq!(value["summary"]["timeouts"], 1);
        assert_eq!(value["events"][1]["kind"], "timeout");
        assert_eq!(value["events"][1]["delta"], -2);
    }

    #[test]
    fn test_output_table() {
        let mut output = Vec::new();
        output_table(&mut output, &create_test_summary()).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Score:    3 / 10"));
        assert!(text.contains("Defeat (threshold 54)"));
        assert!(text.contains("timeout"));
        assert!(text.contains("-2"));
    }
}
