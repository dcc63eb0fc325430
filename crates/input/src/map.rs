//! Key mapping from terminal events to game keys.

use crate::types::Key;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a keyboard event to a game key.
///
/// Letters are lowercased so bindings work with caps lock on. Ctrl-C maps to
/// [`Key::Esc`] because raw mode swallows the interrupt signal.
pub fn map_key_event(key: KeyEvent) -> Option<Key> {
    if should_quit(key) {
        return Some(Key::Esc);
    }
    match key.code {
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Char(c) => c.to_lowercase().next().map(Key::Char),
        _ => None,
    }
}

/// Check if key should end the race.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
            && key.modifiers.contains(KeyModifiers::CONTROL))
}
