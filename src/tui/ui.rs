//! TUI UI rendering

use super::app::{App, Feedback, Game, ViewMode};
use crate::quiz::{Phase, QuizStateMachine, RiddleHunt};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
};

const CONFETTI_COLORS: [Color; 6] = [
    Color::Yellow,
    Color::Magenta,
    Color::Cyan,
    Color::Green,
    Color::LightRed,
    Color::LightBlue,
];
const CONFETTI_GLYPHS: [&str; 4] = ["*", "+", "·", "✦"];

/// Draw the UI based on current app state
pub fn draw(f: &mut Frame, app: &App) {
    if app.view_mode == ViewMode::Help {
        draw_help(f);
        return;
    }

    match &app.game {
        Game::Quest(machine) => match machine.phase() {
            Phase::NotStarted => draw_name_entry(f, app, machine),
            Phase::Riddle => draw_riddle(f, app, machine),
            Phase::Question => draw_question(f, app, machine),
            Phase::Finished => draw_quest_results(f, machine),
        },
        Game::Hunt(hunt) => {
            if hunt.is_finished() {
                draw_hunt_results(f, hunt)
            } else {
                draw_hunt_riddle(f, app, hunt)
            }
        }
    }
}

/// Header / body / footer split shared by every screen
fn frame_chunks(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(3), // Footer
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

fn header(text: String) -> Paragraph<'static> {
    Paragraph::new(text)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL))
}

fn footer(text: String) -> Paragraph<'static> {
    Paragraph::new(text)
        .style(Style::default().fg(Color::White))
        .block(Block::default().borders(Borders::ALL))
}

fn input_box(input: &str) -> Paragraph<'_> {
    Paragraph::new(Line::from(vec![
        Span::raw(input),
        Span::styled("█", Style::default().fg(Color::Yellow)),
    ]))
    .block(Block::default().borders(Borders::ALL).title("Your answer"))
}

fn feedback_line(feedback: Option<&Feedback>) -> Paragraph<'_> {
    let line = match feedback {
        Some(fb) => Line::from(Span::styled(
            fb.message.as_str(),
            Style::default()
                .fg(if fb.positive { Color::Green } else { Color::Red })
                .add_modifier(Modifier::BOLD),
        )),
        None => Line::from(""),
    };
    Paragraph::new(line).wrap(Wrap { trim: true })
}

/// Decorative confetti rows for a celebration
fn confetti(width: u16, rows: usize) -> Vec<Line<'static>> {
    (0..rows)
        .map(|row| {
            let spans = (0..width as usize / 2)
                .map(|col| {
                    let seed = row * 7 + col * 3;
                    Span::styled(
                        format!("{} ", CONFETTI_GLYPHS[seed % CONFETTI_GLYPHS.len()]),
                        Style::default().fg(CONFETTI_COLORS[(seed / 2) % CONFETTI_COLORS.len()]),
                    )
                })
                .collect::<Vec<_>>();
            Line::from(spans)
        })
        .collect()
}

fn draw_name_entry(f: &mut Frame, app: &App, machine: &QuizStateMachine) {
    let chunks = frame_chunks(f.area());
    f.render_widget(header(format!("{} - Welcome", machine.deck().title)), chunks[0]);

    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(chunks[1]);

    let rules = machine.rules();
    let intro = vec![
        Line::from(format!(
            "{} sectors await. Each opens with a riddle, then {} questions on the clock.",
            machine.deck().len(),
            machine.deck().sectors.first().map_or(0, |s| s.questions.len())
        )),
        Line::from(""),
        Line::from(format!(
            "Riddle: +{}   Correct answer: +{}   Wrong answer or time out: -{}",
            rules.riddle_points, rules.correct_points, rules.wrong_penalty
        )),
        Line::from(format!(
            "You have {} seconds per sector. Score {} or more to win.",
            rules.timer_seconds, rules.victory_threshold
        )),
        Line::from(""),
        Line::from("Enter your name to begin:"),
    ];
    let intro_widget = Paragraph::new(intro)
        .block(Block::default().borders(Borders::ALL).title("How to play"))
        .wrap(Wrap { trim: false });
    f.render_widget(intro_widget, body[0]);

    let name = Paragraph::new(Line::from(vec![
        Span::raw(app.input.as_str()),
        Span::styled("█", Style::default().fg(Color::Yellow)),
    ]))
    .block(Block::default().borders(Borders::ALL).title("Player name"));
    f.render_widget(name, body[1]);

    f.render_widget(
        footer("[Enter] Start | [F1] Help | [Esc] Quit".to_string()),
        chunks[2],
    );
}

fn draw_riddle(f: &mut Frame, app: &App, machine: &QuizStateMachine) {
    let chunks = frame_chunks(f.area());
    let state = machine.state();
    let sector_name = machine.current_sector().map_or("", |s| s.name.as_str());

    f.render_widget(
        header(format!(
            "Sector {}/{}: {} - Riddle",
            state.sector_index + 1,
            machine.deck().len(),
            sector_name
        )),
        chunks[0],
    );

    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Riddle
            Constraint::Length(3), // Input
            Constraint::Length(2), // Feedback
        ])
        .split(chunks[1]);

    let riddle = machine
        .current_riddle()
        .map(|r| r.question.clone())
        .unwrap_or_default();
    let riddle_widget = Paragraph::new(riddle)
        .style(Style::default().add_modifier(Modifier::ITALIC))
        .block(Block::default().borders(Borders::ALL).title("🗝️ Riddle"))
        .wrap(Wrap { trim: false });
    f.render_widget(riddle_widget, body[0]);
    f.render_widget(input_box(&app.input), body[1]);
    f.render_widget(feedback_line(app.feedback.as_ref()), body[2]);

    f.render_widget(
        footer(format!(
            "{} | Score: {} | [Enter] Submit | [F1] Help | [Esc] Quit",
            state.player_name, state.score
        )),
        chunks[2],
    );
}

fn draw_question(f: &mut Frame, app: &App, machine: &QuizStateMachine) {
    let chunks = frame_chunks(f.area());
    let state = machine.state();
    let Some(sector) = machine.current_sector() else {
        return;
    };

    f.render_widget(
        header(format!(
            "Sector {}/{}: {} - Question {}/{}",
            state.sector_index + 1,
            machine.deck().len(),
            sector.name,
            state.question_index + 1,
            sector.questions.len()
        )),
        chunks[0],
    );

    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Timer
            Constraint::Length(4), // Question
            Constraint::Min(0),    // Options
            Constraint::Length(2), // Feedback
        ])
        .split(chunks[1]);

    let total = machine.rules().timer_seconds.max(1);
    let ratio = (state.time_remaining as f64 / total as f64).clamp(0.0, 1.0);
    let timer_color = if ratio > 0.5 {
        Color::Green
    } else if ratio > 0.2 {
        Color::Yellow
    } else {
        Color::Red
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Time"))
        .gauge_style(Style::default().fg(timer_color))
        .ratio(ratio)
        .label(format!("{}s", state.time_remaining));
    f.render_widget(gauge, body[0]);

    if let Some(question) = machine.current_question() {
        let text = Paragraph::new(question.text.as_str())
            .block(Block::default().borders(Borders::ALL).title("Question"))
            .wrap(Wrap { trim: false });
        f.render_widget(text, body[1]);

        let items: Vec<ListItem> = question
            .options
            .iter()
            .enumerate()
            .map(|(idx, option)| {
                let is_selected = idx == app.selected_option;
                let prefix = if is_selected { "► " } else { "  " };
                let style = if is_selected {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                        .bg(Color::DarkGray)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(format!("{}{}. {}", prefix, idx + 1, option)).style(style)
            })
            .collect();
        let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Options"));
        f.render_widget(list, body[2]);
    }

    f.render_widget(feedback_line(app.feedback.as_ref()), body[3]);

    f.render_widget(
        footer(format!(
            "{} | Score: {} | [↑/↓/1-9] Select | [Enter] Answer | [F1] Help | [Esc] Quit",
            state.player_name, state.score
        )),
        chunks[2],
    );
}

fn draw_quest_results(f: &mut Frame, machine: &QuizStateMachine) {
    let chunks = frame_chunks(f.area());
    let state = machine.state();
    let victory = machine.is_victory();

    f.render_widget(
        header(format!("{} - Results", machine.deck().title)),
        chunks[0],
    );

    let mut lines = Vec::new();
    if victory {
        lines.extend(confetti(chunks[1].width.saturating_sub(2), 2));
        lines.push(Line::from(""));
    }
    let name = if state.player_name.is_empty() {
        "Adventurer"
    } else {
        state.player_name.as_str()
    };
    lines.push(Line::from(Span::styled(
        format!("Well played, {}!", name),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("Final score: "),
        Span::styled(
            state.score.to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" of {}", machine.max_score())),
    ]));
    lines.push(Line::from(""));
    lines.push(if victory {
        Line::from(Span::styled(
            "🏆 Victory! The quest is yours.",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(Span::styled(
            format!(
                "💡 {} points needed for victory. Try again!",
                machine.rules().victory_threshold
            ),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
    });
    lines.push(Line::from(""));
    for event in machine.history() {
        lines.push(Line::from(format!(
            "  {:<14} {:<9} {:>+4}",
            event.sector_name,
            event.kind.name(),
            event.delta
        )));
    }
    if victory {
        lines.push(Line::from(""));
        lines.extend(confetti(chunks[1].width.saturating_sub(2), 2));
    }

    let results = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Results"))
        .wrap(Wrap { trim: false });
    f.render_widget(results, chunks[1]);

    f.render_widget(footer("[Enter/q] Quit".to_string()), chunks[2]);
}

fn draw_hunt_riddle(f: &mut Frame, app: &App, hunt: &RiddleHunt) {
    let chunks = frame_chunks(f.area());
    f.render_widget(
        header(format!("🗝️ Riddle {} of {}", hunt.step() + 1, hunt.total())),
        chunks[0],
    );

    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(2),
        ])
        .split(chunks[1]);

    let question = hunt.current().map(|r| r.question.as_str()).unwrap_or("");
    let riddle_widget = Paragraph::new(question)
        .block(Block::default().borders(Borders::ALL).title("Riddle"))
        .wrap(Wrap { trim: false });
    f.render_widget(riddle_widget, body[0]);
    f.render_widget(input_box(&app.input), body[1]);
    f.render_widget(feedback_line(app.feedback.as_ref()), body[2]);

    f.render_widget(
        footer("[Enter] Submit Answer | [F1] Help | [Esc] Quit".to_string()),
        chunks[2],
    );
}

fn draw_hunt_results(f: &mut Frame, hunt: &RiddleHunt) {
    let chunks = frame_chunks(f.area());
    f.render_widget(header("🎉 Treasure Found!".to_string()), chunks[0]);

    let mut lines = Vec::new();
    if hunt.should_celebrate() {
        lines.extend(confetti(chunks[1].width.saturating_sub(2), 3));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(vec![
        Span::raw("You solved "),
        Span::styled(
            hunt.score().to_string(),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw(format!(" riddles out of {}.", hunt.total())),
    ]));
    lines.push(Line::from(""));
    lines.push(if hunt.is_perfect() {
        Line::from(Span::styled(
            "🏆 Perfect! You're a true treasure hunter!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(Span::styled(
            "💡 Try again to get all the riddles!",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
    });

    let results = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    f.render_widget(results, chunks[1]);

    f.render_widget(footer("[Enter/q] Quit".to_string()), chunks[2]);
}

/// Draw help screen
fn draw_help(f: &mut Frame) {
    let chunks = frame_chunks(f.area());
    f.render_widget(header("Help".to_string()), chunks[0]);

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let help_text = vec![
        Line::from(vec![Span::styled("Riddles", bold)]),
        Line::from("  type         - Enter your answer (case and spacing don't matter)"),
        Line::from("  Backspace    - Delete a character"),
        Line::from("  Enter        - Submit"),
        Line::from(""),
        Line::from(vec![Span::styled("Questions", bold)]),
        Line::from("  ↑/↓          - Move between options"),
        Line::from("  1-9          - Jump to an option"),
        Line::from("  Enter        - Answer with the selected option"),
        Line::from(""),
        Line::from(vec![Span::styled("Countdown", bold)]),
        Line::from("  The clock runs during a sector's questions only."),
        Line::from("  When it runs out you lose points and the rest of the sector is skipped."),
        Line::from(""),
        Line::from(vec![Span::styled("General", bold)]),
        Line::from("  F1           - Toggle this help screen"),
        Line::from("  Esc          - Close help / quit"),
        Line::from("  Ctrl+C       - Quit"),
    ];

    let help_widget = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Keyboard Shortcuts"),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(help_widget, chunks[1]);

    f.render_widget(footer("[F1/Esc] Back | [Ctrl+C] Quit".to_string()), chunks[2]);
}
