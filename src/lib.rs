//! TUI Racer (workspace facade crate).
//!
//! Re-exports the workspace crates as `tui_racer::{core,input,term,types}`
//! and adds the settings loader used by the binary.

pub mod settings;

pub use tui_racer_core as core;
pub use tui_racer_input as input;
pub use tui_racer_term as term;
pub use tui_racer_types as types;
