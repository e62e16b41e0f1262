//! Keyboard event handling for the TUI.
//!
//! Maps crossterm keyboard events to application state changes.
//! Key behavior depends on which panel has focus.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Focus};

const PAGE: u16 = 10;

/// Handles a keyboard event and updates the app state accordingly.
///
/// Returns `true` if the application should quit, `false` otherwise.
///
/// # Event Handling
///
/// - `Ctrl+C`: Quit application (from any focus state)
/// - `Tab` / `Shift+Tab`: Switch focus between input and results
/// - `Esc`: Return to the query input
/// - When `QueryInput` focused: characters edit the query, `Enter` submits
/// - When `Results` focused: j/k and arrows scroll, `q` quits
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if key.code == KeyCode::Tab {
        app.next_focus();
        return false;
    }
    if key.code == KeyCode::BackTab {
        app.prev_focus();
        return false;
    }

    if key.code == KeyCode::Esc {
        app.reset_focus();
        return false;
    }

    match app.focus() {
        Focus::QueryInput => {
            handle_query_input(app, key);
            false
        }
        Focus::Results => handle_results(app, key),
    }
}

/// Handles keyboard input when the query input is focused.
fn handle_query_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit(),
        KeyCode::Char(c) if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT => {
            app.push_input_char(c);
        }
        KeyCode::Backspace => app.pop_input_char(),
        _ => {}
    }
}

/// Handles keyboard input when the result panel is focused.
///
/// Returns `true` on `q`.
fn handle_results(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') if key.modifiers.is_empty() => return true,
        KeyCode::Char('j') | KeyCode::Down => app.scroll_down(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_up(1),
        KeyCode::PageDown => app.scroll_down(PAGE),
        KeyCode::PageUp => app.scroll_up(PAGE),
        KeyCode::Home | KeyCode::Char('g') => app.scroll_to_top(),
        _ => {}
    }
    false
}
