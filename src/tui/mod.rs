//! TUI module - Terminal UI for playing quests and hunts

use crate::{
    Result,
    quiz::{QuizStateMachine, RiddleHunt, SessionSummary},
};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::io;
use std::time::{Duration, Instant};

pub mod app;
pub mod ui;

use app::App;

const FRAME_POLL: Duration = Duration::from_millis(100);

/// Play a quest; quitting from the start screen is `Error::UserQuit`
pub fn run_quest(machine: QuizStateMachine, player_name: String) -> Result<Option<SessionSummary>> {
    let app = run(App::quest(machine, player_name))?;
    Ok(app.summary())
}

/// Play a riddle hunt
pub fn run_hunt(hunt: RiddleHunt) -> Result<()> {
    run(App::hunt(hunt))?;
    Ok(())
}

/// Run the TUI application until the player quits
fn run(app: App) -> Result<App> {
    // Setup terminal
    enable_raw_mode().map_err(|e| crate::Error::Tui(e.to_string()))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| crate::Error::Tui(e.to_string()))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| crate::Error::Tui(e.to_string()))?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode().map_err(|e| crate::Error::Tui(e.to_string()))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(|e| crate::Error::Tui(e.to_string()))?;
    terminal
        .show_cursor()
        .map_err(|e| crate::Error::Tui(e.to_string()))?;

    res
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<App> {
    loop {
        app.on_frame(Instant::now())?;

        terminal
            .draw(|f| ui::draw(f, &app))
            .map_err(|e| crate::Error::Tui(e.to_string()))?;

        // Wake up in time for the next countdown tick
        let timeout = app
            .countdown
            .until_next(Instant::now())
            .map_or(FRAME_POLL, |d| d.min(FRAME_POLL));

        if event::poll(timeout).map_err(|e| crate::Error::Tui(e.to_string()))?
            && let Event::Key(key) = event::read().map_err(|e| crate::Error::Tui(e.to_string()))?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key, Instant::now())?;
        }

        if app.should_quit {
            return app.finish();
        }
    }
}
