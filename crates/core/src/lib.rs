//! Core race logic - pure, deterministic, and testable
//!
//! This crate contains the racecourse generator, the car silhouette, the
//! per-player physics and the multi-player race orchestration. It never
//! touches a terminal: players draw into a [`Surface`] and the race reads
//! keys from an [`InputSource`], so a whole race can run headless against
//! in-memory surfaces and a scripted [`KeyQueue`].
//!
//! # Module Structure
//!
//! - [`course`]: terrain grid and its constrained random-walk generator
//! - [`silhouette`]: car bitmap rasterized from five control points
//! - [`player`]: one car, its pane, movement timing and collisions
//! - [`race`]: turn counter, input distribution, shared-track footprints
//! - [`surface`]: the drawing and input capabilities the core consumes
//! - [`error`]: setup errors reported before the first frame
//!
//! # Example
//!
//! ```
//! use tui_racer_core::Racecourse;
//! use tui_racer_types::RaceConfig;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let config = RaceConfig {
//!     race_length: 50,
//!     race_width: 30,
//!     minimal_width: 12,
//!     ..RaceConfig::default()
//! };
//! let course = Racecourse::generate(&config, &mut StdRng::seed_from_u64(1)).unwrap();
//!
//! for row in 0..50 {
//!     let (left, right) = course.bounds(row).unwrap();
//!     assert!(right - left >= 12);
//! }
//! ```
//!
//! # Timing
//!
//! A race advances in turns, one per [`Race::tick`]. A car moves one row
//! per move and waits `(row - viewport_top) / speed_base` turns between
//! moves, so pushing the car towards the top of its view makes it faster.

pub mod course;
pub mod error;
pub mod player;
pub mod race;
pub mod silhouette;
pub mod surface;

pub use tui_racer_types as types;

pub use course::Racecourse;
pub use error::ConfigurationError;
pub use player::{CarState, PlayerAgent};
pub use race::{Race, RaceSummary};
pub use silhouette::CarSilhouette;
pub use surface::{InputSource, KeyQueue, Surface};

/// Errors returned while setting up a race.
pub type RaceError = ConfigurationError;
