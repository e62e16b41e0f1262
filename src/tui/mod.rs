//! Terminal User Interface module for paperqa.
//!
//! Provides a single-screen TUI with a query input, a result panel and
//! transient notifications, using ratatui for rendering and crossterm for
//! terminal management.

use std::io;
use std::panic;
use std::sync::Arc;
use std::thread::{self, ThreadId};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self as crossterm_event, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info};

use crate::api::QueryClientTrait;
use crate::submission::SubmissionFlow;

mod app;
pub mod event;
mod ui;

pub use app::{App, Focus};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Initializes the terminal for TUI rendering.
///
/// Enables raw mode and enters the alternate screen.
/// Returns a configured Terminal instance.
///
/// # Errors
///
/// Returns an error if terminal initialization fails.
fn init_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("failed to create terminal")?;
    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// Disables raw mode and leaves the alternate screen.
/// This should always be called before exiting the TUI,
/// even in error cases, to prevent terminal corruption.
///
/// # Errors
///
/// Returns an error if terminal restoration fails.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;
    Ok(())
}

/// Minimal terminal restoration for panic handler.
///
/// Does not require a Terminal reference, making it safe to call
/// from a panic hook where we may not have access to the Terminal.
/// Ignores errors since we're likely already in a bad state.
fn restore_terminal_panic() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Initializes a panic hook that restores the terminal before panicking.
///
/// Must be called from the UI thread. A panic on that thread restores the
/// terminal and then runs the original hook. A panic on a query worker
/// leaves the terminal alone and is only logged; the submission flow
/// reports the lost request itself.
fn init_panic_hook() {
    install_panic_hook(thread::current().id(), restore_terminal_panic);
}

fn install_panic_hook(ui_thread: ThreadId, restore: fn()) {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        if thread::current().id() == ui_thread {
            restore();
            original_hook(panic_info);
        } else {
            // stderr would draw over the running UI
            error!(%panic_info, "query worker panicked");
        }
    }));
}

/// Runs the main event loop for the TUI.
///
/// Polls for keyboard events, applies finished queries, and re-renders.
/// Exits when the user quits or an error occurs.
///
/// # Errors
///
/// Returns an error if event polling, rendering, or terminal operations fail.
/// Terminal state is always restored, even on error.
pub fn run_event_loop(app: &mut App) -> Result<()> {
    let mut terminal = init_terminal()?;

    // Ensure terminal is restored even if we panic or error
    let result = run_event_loop_internal(app, &mut terminal);

    // Always restore terminal state
    if let Err(e) = restore_terminal(&mut terminal) {
        eprintln!("Error restoring terminal: {e}");
    }

    result
}

/// Internal event loop implementation.
///
/// Separated from `run_event_loop` to ensure terminal restoration happens
/// in the outer function.
fn run_event_loop_internal(
    app: &mut App,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        // Render the current state
        terminal.draw(|frame| {
            ui::draw(frame, app);
        })?;

        if crossterm_event::poll(POLL_INTERVAL)?
            && let Event::Key(key) = crossterm_event::read()?
            && key.kind == KeyEventKind::Press
        {
            let should_quit = event::handle_key_event(app, key);
            if should_quit {
                break;
            }
        }

        // Pick up finished queries and expire notifications
        app.tick(Instant::now());
    }

    Ok(())
}

/// Entry point for the TUI application.
///
/// Wires `client` into a submission flow and runs the event loop until the
/// user quits.
///
/// # Errors
///
/// Returns an error if terminal initialization or the event loop fails.
pub fn run(client: Arc<dyn QueryClientTrait>) -> Result<()> {
    // Install panic hook to restore terminal on panic
    init_panic_hook();

    let mut app = App::new(SubmissionFlow::new(client));

    info!("starting terminal UI");
    run_event_loop(&mut app).context("TUI event loop failed")?;
    info!("terminal UI closed");

    Ok(())
}
