//! Key handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::console::ConsoleEvent;

/// What a key press means in the current mode.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyAction {
    Console(ConsoleEvent),
    ToggleHelp,
}

/// What the console loop currently shows on top of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Confirm,
    Help,
}

/// Wait up to `timeout` for a terminal event.
pub fn poll_input(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        return Ok(Some(event::read()?));
    }
    Ok(None)
}

/// Map a key to an action. Key releases and unbound keys map to nothing.
pub fn handle_key_event(mode: Mode, key: KeyEvent) -> Option<KeyAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    // Global keys (work in any mode)
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(KeyAction::Console(ConsoleEvent::Quit));
    }

    match mode {
        Mode::Normal => handle_normal_mode(key),
        Mode::Confirm => handle_confirm_mode(key),
        Mode::Help => handle_help_mode(key),
    }
}

fn handle_normal_mode(key: KeyEvent) -> Option<KeyAction> {
    let event = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => ConsoleEvent::Quit,

        // Navigation
        KeyCode::Up | KeyCode::Char('k') => ConsoleEvent::MoveUp,
        KeyCode::Down | KeyCode::Char('j') => ConsoleEvent::MoveDown,
        KeyCode::PageDown | KeyCode::Right | KeyCode::Char('l') => ConsoleEvent::PageNext,
        KeyCode::PageUp | KeyCode::Left | KeyCode::Char('h') => ConsoleEvent::PagePrev,

        // Selection
        KeyCode::Char(' ') => ConsoleEvent::ToggleSelection,
        KeyCode::Char('a') => ConsoleEvent::SelectAll,

        // View
        KeyCode::Char('s') => ConsoleEvent::CycleSort,
        KeyCode::Char('f') | KeyCode::Tab => ConsoleEvent::CycleFilter,

        // Actions
        KeyCode::Enter | KeyCode::Char('d') => ConsoleEvent::RequestConfirmation,
        KeyCode::Char('c') => ConsoleEvent::CancelScan,
        KeyCode::Char('r') => ConsoleEvent::Rescan,

        KeyCode::Char('?') => return Some(KeyAction::ToggleHelp),
        _ => return None,
    };
    Some(KeyAction::Console(event))
}

fn handle_confirm_mode(key: KeyEvent) -> Option<KeyAction> {
    let event = match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => ConsoleEvent::Confirm,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => ConsoleEvent::CancelConfirmation,
        KeyCode::Char('q') => ConsoleEvent::Quit,
        _ => return None,
    };
    Some(KeyAction::Console(event))
}

fn handle_help_mode(key: KeyEvent) -> Option<KeyAction> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Enter => {
            Some(KeyAction::ToggleHelp)
        }
        _ => None,
    }
}
