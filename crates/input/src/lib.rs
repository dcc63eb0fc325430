//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::Key`] and provides
//! [`TerminalInput`], a non-blocking [`tui_racer_core::InputSource`] that
//! drains whatever the terminal has queued since the previous frame.

pub mod map;
pub mod source;

pub use tui_racer_types as types;

pub use map::{map_key_event, should_quit};
pub use source::TerminalInput;
