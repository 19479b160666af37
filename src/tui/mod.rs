//! Interactive review console.

pub mod app;
pub mod event;
pub mod ui;

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};

pub use app::App;

use crate::console::ConsoleEvent;
use event::{handle_key_event, poll_input};

/// Run the console until the user quits, then wait for any deletion still
/// in flight. Returns the bytes reclaimed.
pub fn run(mut app: App, tick_rate: Duration) -> Result<u64> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app, tick_rate);

    // Restore the terminal even if the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let pending = app.pending_deletions();
    if pending > 0 {
        tracing::info!(batches = pending, "Waiting for deletions to finish");
    }
    app.finish();

    result.map(|()| app.state.reclaimed_bytes())
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    tick_rate: Duration,
) -> Result<()> {
    let size = terminal.size()?;
    app.dispatch(ConsoleEvent::Resize {
        rows: ui::list_height(Rect::new(0, 0, size.width, size.height)),
    });

    while !app.should_quit() {
        app.pump();

        if app.take_render() {
            let view = app.state.view();
            let show_help = app.show_help;
            terminal.draw(|frame| ui::render(frame, &view, app.registry(), show_help))?;
        }

        match poll_input(tick_rate)? {
            Some(Event::Key(key)) => {
                if let Some(action) = handle_key_event(app.mode(), key) {
                    app.handle_key(action);
                }
            }
            Some(Event::Resize(width, height)) => {
                app.dispatch(ConsoleEvent::Resize {
                    rows: ui::list_height(Rect::new(0, 0, width, height)),
                });
            }
            _ => {}
        }
    }

    Ok(())
}
