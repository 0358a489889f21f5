//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::AppState;

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
    /// Discard all data and start a new fetch pass.
    Reload,
}

/// Handles key input and updates state.
///
/// `samples` holds the sample count of every card currently shown, in display
/// order.
pub fn handle_key(state: &mut AppState, key: KeyEvent, samples: &[usize]) -> KeyAction {
    if state.show_quit_confirm {
        return handle_quit_confirm(state, key);
    }
    if state.show_help {
        return handle_help(state, key);
    }
    handle_normal_mode(state, key, samples)
}

fn handle_quit_confirm(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.show_quit_confirm = false;
            KeyAction::Quit
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.show_quit_confirm = false;
            KeyAction::Quit
        }
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
            state.show_quit_confirm = false;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

fn handle_help(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Char('q') => {
            state.show_help = false;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

/// Handles keys in normal mode.
fn handle_normal_mode(state: &mut AppState, key: KeyEvent, samples: &[usize]) -> KeyAction {
    state.status_message = None;
    let cards = samples.len();
    let focused_samples = samples.get(state.focused).copied().unwrap_or(0);

    match key.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            state.show_quit_confirm = true;
            KeyAction::None
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,

        KeyCode::Char('?') | KeyCode::Char('h') => {
            state.show_help = true;
            KeyAction::None
        }

        KeyCode::Char('r') | KeyCode::Char('R') => {
            state.status_message = Some("Reloading...".to_string());
            KeyAction::Reload
        }

        // Card focus
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
            state.focus_next(cards);
            KeyAction::None
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => {
            state.focus_prev(cards);
            KeyAction::None
        }

        // Sample inspection
        KeyCode::Left => {
            state.cursor_left(focused_samples);
            KeyAction::None
        }
        KeyCode::Right => {
            state.cursor_right(focused_samples);
            KeyAction::None
        }
        KeyCode::Home => {
            state.cursor_first(focused_samples);
            KeyAction::None
        }
        KeyCode::End | KeyCode::Esc => {
            state.cursor_latest();
            KeyAction::None
        }

        _ => KeyAction::None,
    }
}
