pub mod app;
pub mod ui;

use std::io;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use swipedo_core::{CompletedPlacement, Mode};
use tracing::{error, info};

use crate::tui::app::App;

pub fn run(placement: CompletedPlacement) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!(?placement, "tui started");
    let mut app = App::new(placement);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = %err, "tui loop failed");
        println!("{:?}", err);
    }
    info!(tasks = app.session.list().len(), "tui closed");

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .map_err(|e| io::Error::other(e.to_string()))?;

        if event::poll(std::time::Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if !handle_key(app, key) {
                    return Ok(());
                }
            }
        }
        app.tick();
    }
}

/// Returns false when the user asked to quit.
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match app.session.mode().clone() {
        Mode::Idle | Mode::Revealed { .. } => match key.code {
            KeyCode::Char('q') => return false,
            KeyCode::Down | KeyCode::Char('j') => app.next(),
            KeyCode::Up | KeyCode::Char('k') => app.previous(),
            KeyCode::Char(' ') => app.toggle(),
            KeyCode::Enter | KeyCode::Char('e') => app.begin_edit(),
            KeyCode::Char('a') => app.enter_add_mode(),
            KeyCode::Right | KeyCode::Char('l') => app.reveal(),
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Esc => app.cancel(),
            KeyCode::Char('x') => app.quick_delete(),
            KeyCode::Char('D') | KeyCode::Delete => app.request_delete(),
            KeyCode::Char('t') => app.begin_pick_date(),
            _ => {}
        },
        Mode::ConfirmingDelete { .. } => match key.code {
            KeyCode::Char('y') | KeyCode::Enter => app.confirm_delete(),
            KeyCode::Char('n') | KeyCode::Esc => app.cancel(),
            _ => {}
        },
        Mode::PickingDate { .. } => match key.code {
            KeyCode::Left | KeyCode::Char('h') => app.shift_date(-1),
            KeyCode::Right | KeyCode::Char('l') => app.shift_date(1),
            KeyCode::Up | KeyCode::Char('k') => app.shift_date(-7),
            KeyCode::Down | KeyCode::Char('j') => app.shift_date(7),
            KeyCode::Char('t') => app.pick_today(),
            KeyCode::Char('c') => app.clear_date(),
            KeyCode::Enter => app.confirm_date(),
            KeyCode::Esc => app.cancel(),
            _ => {}
        },
        Mode::Adding { .. } | Mode::Editing { .. } => match key.code {
            KeyCode::Enter => app.submit(),
            KeyCode::Esc => app.cancel(),
            KeyCode::Tab => app.tab(),
            KeyCode::Char(c) => app.input_char(c),
            KeyCode::Backspace => app.delete_char(),
            KeyCode::Left => app.move_cursor_left(),
            KeyCode::Right => app.move_cursor_right(),
            _ => {}
        },
    }
    true
}
