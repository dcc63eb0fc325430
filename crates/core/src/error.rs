//! Setup errors.
//!
//! Everything here is detected before the first frame renders. Once a race
//! is constructed, ticking it cannot fail; out-of-bounds grid access after
//! that point is an invariant breach and panics instead.

use std::error::Error;
use std::fmt;

use crate::types::MAX_CAR_SIZE;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// The narrowest road does not fit on the track.
    MinimalWidthTooLarge { minimal: u16, width: u16 },
    /// Track has no rows or no columns.
    EmptyCourse { length: u16, width: u16 },
    /// The track does not fit in a player's pane.
    TrackTooWide { track: u16, pane: u16 },
    /// A player's pane cannot show the whole car.
    PaneTooShort { pane: u16, car: u16 },
    /// The car would start on or past the finish line.
    CourseTooShort { length: u16, car: u16 },
    PlayerCount(u8),
    /// One surface per player is required.
    SurfaceCount { expected: usize, got: usize },
    CarSize(u16),
    SpeedBase,
    Chance { name: &'static str, value: f64 },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::MinimalWidthTooLarge { minimal, width } => write!(
                f,
                "minimal road width {} exceeds race width {}",
                minimal, width
            ),
            ConfigurationError::EmptyCourse { length, width } => {
                write!(f, "racecourse of {}x{} has no cells", length, width)
            }
            ConfigurationError::TrackTooWide { track, pane } => write!(
                f,
                "track is {} columns wide but the player view has only {}",
                track, pane
            ),
            ConfigurationError::PaneTooShort { pane, car } => write!(
                f,
                "player view has {} rows, the car needs {}",
                pane, car
            ),
            ConfigurationError::CourseTooShort { length, car } => write!(
                f,
                "race length {} must exceed the car size {}",
                length, car
            ),
            ConfigurationError::PlayerCount(n) => {
                write!(f, "{} players requested, 1 or 2 supported", n)
            }
            ConfigurationError::SurfaceCount { expected, got } => {
                write!(f, "expected {} player views, got {}", expected, got)
            }
            ConfigurationError::CarSize(size) => {
                write!(f, "car size {} outside 1..={}", size, MAX_CAR_SIZE)
            }
            ConfigurationError::SpeedBase => f.write_str("speed base must be positive"),
            ConfigurationError::Chance { name, value } => {
                write!(f, "{} chance {} outside 0..=1", name, value)
            }
        }
    }
}

impl Error for ConfigurationError {}
