//! Terminal rendering module.
//!
//! Each player draws into its own [`Pane`], an off-screen double-buffered
//! framebuffer implementing [`tui_racer_core::Surface`]. Once per frame the
//! driver composes the published pane contents into one screen
//! [`FrameBuffer`] following the [`SplitLayout`], and the
//! [`TerminalRenderer`] flushes it as a diff against the previous frame.
//!
//! Nothing here knows about the race rules; panes only store characters.

pub mod fb;
pub mod layout;
pub mod message;
pub mod pane;
pub mod renderer;

pub use tui_racer_core as core;
pub use tui_racer_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer};
pub use layout::{Rect, SplitLayout};
pub use message::{draw_message, MESSAGE_STYLE};
pub use pane::Pane;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
