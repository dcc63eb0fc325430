//! Non-blocking keyboard source backed by crossterm.

use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use tui_racer_core::InputSource;

use crate::map::map_key_event;
use crate::types::Key;

/// Reads pending key presses from the terminal without waiting.
///
/// Key releases and auto-repeat events are ignored; holding a key is
/// delivered as the terminal's repeated presses.
#[derive(Debug, Default)]
pub struct TerminalInput {
    errors: u64,
}

impl TerminalInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of failed polls since creation.
    pub fn errors(&self) -> u64 {
        self.errors
    }

    fn read_key(&mut self) -> std::io::Result<Option<Option<Key>>> {
        if !event::poll(Duration::ZERO)? {
            return Ok(None);
        }
        let key = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => map_key_event(key),
            _ => None,
        };
        Ok(Some(key))
    }
}

impl InputSource for TerminalInput {
    fn poll_key(&mut self) -> Option<Key> {
        loop {
            match self.read_key() {
                // Skip events that do not map to a key.
                Ok(Some(None)) => continue,
                Ok(Some(key)) => return key,
                Ok(None) => return None,
                Err(e) => {
                    self.errors += 1;
                    log::warn!("terminal input poll failed: {}", e);
                    return None;
                }
            }
        }
    }
}
