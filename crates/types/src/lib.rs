//! Shared race types and constants
//!
//! Plain data used by every other crate: keys and bindings, terrain cells,
//! colors, and the [`RaceConfig`] the whole race is parameterized by. No
//! dependencies, so the core stays free of terminal code.
//!
//! # Coordinates
//!
//! Everything is addressed as `(row, col)`:
//!
//! - `(0, 0)` is the upper left corner of the racecourse
//! - Row 0 is the finish line, cars drive towards decreasing rows
//! - Column 0 carries the distance meter digit
//!
//! # Race Defaults
//!
//! | Setting | Value | Description |
//! |---------|-------|-------------|
//! | `DEFAULT_FRAME_DELAY_MS` | 25 | Driver sleep between frames |
//! | `DEFAULT_RACE_LENGTH` | 500 | Rows from start to finish |
//! | `DEFAULT_CAR_SIZE` | 10 | Side of the car silhouette square |
//! | `DEFAULT_SPEED_BASE` | 5 | Rows of viewport distance per extra turn of move delay |
//! | `DEFAULT_ROCK_CHANCE` | 0.025 | Chance of a rock on a generated row |
//! | `DEFAULT_TURN_CHANCE` | 0.125 | Chance of a kerb changing direction on a row |
//!
//! A race width or minimal width of 0 means "fit the screen", see
//! [`RaceConfig::resolved`].
//!
//! # Examples
//!
//! ```
//! use tui_racer_types::{Key, RaceConfig, TrackMode, Terrain};
//!
//! let config = RaceConfig::default();
//! assert_eq!(config.track, TrackMode::Shared);
//! assert_eq!(config.controls[0].accelerate, Key::Up);
//!
//! // Widths are filled in from the screen size.
//! let resolved = config.resolved(80, 24);
//! assert_eq!(resolved.race_width, 80);
//! assert_eq!(resolved.minimal_width, 25);
//!
//! assert_eq!(TrackMode::from_str("similar"), Some(TrackMode::Similar));
//! assert_eq!(Terrain::Distance(7).glyph('^'), '7');
//! ```

use std::fmt;

/// Maximum number of players sharing the keyboard
pub const MAX_PLAYERS: usize = 2;

/// Largest supported car silhouette
pub const MAX_CAR_SIZE: u16 = 20;

/// Sleep between two frames of the driver loop
pub const DEFAULT_FRAME_DELAY_MS: u64 = 25;

/// Rows from the starting grid to the finish line
pub const DEFAULT_RACE_LENGTH: u16 = 500;

/// Side of the car silhouette
pub const DEFAULT_CAR_SIZE: u16 = 10;

/// Move delay grows by one turn per `speed_base` rows between car and viewport top
pub const DEFAULT_SPEED_BASE: u16 = 5;

/// Chance of generating a rock on a given row
pub const DEFAULT_ROCK_CHANCE: f64 = 0.025;

/// Chance of a kerb turning on a given row
pub const DEFAULT_TURN_CHANCE: f64 = 0.125;

/// Glyph used for cars and for their footprint markers on a shared track
pub const DEFAULT_CAR_GLYPH: char = '^';

/// Glyph of a rock on the course
pub const ROCK_GLYPH: char = '*';

/// Glyph of explosion sparks
pub const SPARK_GLYPH: char = '*';

/// Re-roll attempts per row when a kerb picks a new direction
pub const KERB_TURN_TRIES: u32 = 5;

/// Car colors by player index.
pub const CAR_COLORS: [Palette; MAX_PLAYERS] = [Palette::Yellow, Palette::Cyan];

/// Colors an exploding car throws sparks in.
pub const SPARK_COLORS: [Palette; 7] = [
    Palette::Red,
    Palette::Green,
    Palette::Yellow,
    Palette::Blue,
    Palette::Magenta,
    Palette::Cyan,
    Palette::White,
];

/// A keyboard key as seen by the game.
///
/// Letters are stored lowercase so bindings are case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Ends the race for everybody
    Esc,
    Char(char),
}

impl Key {
    /// Parse a key binding name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_racer_types::Key;
    ///
    /// assert_eq!(Key::from_str("up"), Some(Key::Up));
    /// assert_eq!(Key::from_str("W"), Some(Key::Char('w')));
    /// assert_eq!(Key::from_str("escape"), Some(Key::Esc));
    /// assert_eq!(Key::from_str("ctrl"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "up" => Some(Key::Up),
            "down" => Some(Key::Down),
            "left" => Some(Key::Left),
            "right" => Some(Key::Right),
            "esc" | "escape" => Some(Key::Esc),
            _ => {
                let mut chars = lower.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Key::Char(c)),
                    _ => None,
                }
            }
        }
    }

    /// Whether this key ends the race
    pub fn is_quit(&self) -> bool {
        matches!(self, Key::Esc)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Up => f.write_str("up"),
            Key::Down => f.write_str("down"),
            Key::Left => f.write_str("left"),
            Key::Right => f.write_str("right"),
            Key::Esc => f.write_str("esc"),
            Key::Char(c) => write!(f, "{}", c),
        }
    }
}

/// The eight classic terminal colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Palette {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    #[default]
    White,
}

/// Character attributes for a single write to a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Attr {
    pub color: Palette,
    pub bold: bool,
}

impl Attr {
    pub const fn new(color: Palette, bold: bool) -> Self {
        Self { color, bold }
    }
}

/// Which of the two course boundaries a kerb cell belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

/// Shape of a kerb cell, relative to the road
///
/// - **Straight**: the boundary did not move on this row
/// - **In**: the boundary moved towards the road (narrowing)
/// - **Out**: the boundary moved away from the road (widening)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bend {
    Straight,
    In,
    Out,
}

impl Bend {
    /// Classify a boundary step (-1, 0 or +1 columns) for the given side.
    pub fn from_step(side: Side, step: i32) -> Self {
        match (side, step.signum()) {
            (_, 0) => Bend::Straight,
            (Side::Left, 1) | (Side::Right, -1) => Bend::In,
            _ => Bend::Out,
        }
    }
}

/// A cell of the racecourse
///
/// Everything other than [`Terrain::Empty`] is an obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Terrain {
    #[default]
    Empty,
    Kerb(Side, Bend),
    Rock,
    /// Distance meter, the row index modulo 10
    Distance(u8),
    /// Transient footprint of another car on a shared track
    Marker,
}

impl Terrain {
    /// The character this cell is drawn with.
    ///
    /// `marker` is the glyph used for car footprints.
    pub fn glyph(self, marker: char) -> char {
        match self {
            Terrain::Empty => ' ',
            Terrain::Kerb(_, Bend::Straight) => '|',
            Terrain::Kerb(Side::Left, Bend::In) | Terrain::Kerb(Side::Right, Bend::Out) => '/',
            Terrain::Kerb(Side::Left, Bend::Out) | Terrain::Kerb(Side::Right, Bend::In) => '\\',
            Terrain::Rock => ROCK_GLYPH,
            Terrain::Distance(d) => char::from(b'0' + d % 10),
            Terrain::Marker => marker,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Terrain::Empty
    }
}

/// Pending command on the row axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Throttle {
    #[default]
    Coast,
    Accelerate,
    Brake,
}

impl Throttle {
    /// Row delta: accelerating moves one extra row towards the finish.
    pub fn delta(self) -> i32 {
        match self {
            Throttle::Coast => 0,
            Throttle::Accelerate => -1,
            Throttle::Brake => 1,
        }
    }
}

/// Pending command on the column axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Steer {
    #[default]
    Straight,
    Left,
    Right,
}

impl Steer {
    pub fn delta(self) -> i32 {
        match self {
            Steer::Straight => 0,
            Steer::Left => -1,
            Steer::Right => 1,
        }
    }
}

/// Key bindings of a single player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub accelerate: Key,
    pub brake: Key,
    pub left: Key,
    pub right: Key,
}

impl Controls {
    /// Arrow keys for the first player, WSAD for the second.
    pub fn for_player(index: usize) -> Self {
        if index == 0 {
            Self {
                accelerate: Key::Up,
                brake: Key::Down,
                left: Key::Left,
                right: Key::Right,
            }
        } else {
            Self {
                accelerate: Key::Char('w'),
                brake: Key::Char('s'),
                left: Key::Char('a'),
                right: Key::Char('d'),
            }
        }
    }
}

/// How players' racecourses relate to each other
///
/// - **Shared**: one course, cars can collide with each other
/// - **Similar**: identical copies of one generated course, no car collisions
/// - **Different**: an independently generated course per player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackMode {
    Shared,
    Similar,
    Different,
}

impl TrackMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "shared" | "h" => Some(TrackMode::Shared),
            "similar" | "s" => Some(TrackMode::Similar),
            "different" | "d" => Some(TrackMode::Different),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrackMode::Shared => "shared",
            TrackMode::Similar => "similar",
            TrackMode::Different => "different",
        }
    }
}

/// Axis along which the screen is divided between players
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitAxis {
    /// Side by side stripes
    Vertical,
    /// Stacked stripes
    Horizontal,
}

impl SplitAxis {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "vertical" | "v" => Some(SplitAxis::Vertical),
            "horizontal" | "h" => Some(SplitAxis::Horizontal),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SplitAxis::Vertical => "vertical",
            SplitAxis::Horizontal => "horizontal",
        }
    }
}

/// Every parameter the race consumes.
///
/// Passed by reference into course generation, players and the race; never
/// mutated once the race starts.
#[derive(Debug, Clone, PartialEq)]
pub struct RaceConfig {
    pub frame_delay_ms: u64,
    pub split: SplitAxis,
    pub track: TrackMode,
    pub race_length: u16,
    /// 0 fits the track to the player's pane
    pub race_width: u16,
    /// 0 derives the narrowest road from players and car size
    pub minimal_width: u16,
    pub players: u8,
    pub car_glyph: char,
    pub car_size: u16,
    pub speed_base: u16,
    pub rock_chance: f64,
    pub turn_chance: f64,
    pub controls: [Controls; MAX_PLAYERS],
    /// Fixed RNG seed, random when unset
    pub seed: Option<u64>,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            frame_delay_ms: DEFAULT_FRAME_DELAY_MS,
            split: SplitAxis::Vertical,
            track: TrackMode::Shared,
            race_length: DEFAULT_RACE_LENGTH,
            race_width: 0,
            minimal_width: 0,
            players: 1,
            car_glyph: DEFAULT_CAR_GLYPH,
            car_size: DEFAULT_CAR_SIZE,
            speed_base: DEFAULT_SPEED_BASE,
            rock_chance: DEFAULT_ROCK_CHANCE,
            turn_chance: DEFAULT_TURN_CHANCE,
            controls: [Controls::for_player(0), Controls::for_player(1)],
            seed: None,
        }
    }
}

impl RaceConfig {
    /// Fill in the automatic widths for a screen of the given size.
    ///
    /// A zero `race_width` becomes the pane width (the screen width divided
    /// between players on a vertical split). A zero `minimal_width` leaves
    /// room for every car two and a half times over, but never more than the
    /// track minus its two kerbs.
    pub fn resolved(&self, screen_width: u16, _screen_height: u16) -> Self {
        let mut cfg = self.clone();
        let players = u16::from(self.players.max(1));
        if cfg.race_width == 0 {
            cfg.race_width = match cfg.split {
                SplitAxis::Vertical => screen_width / players,
                SplitAxis::Horizontal => screen_width,
            };
        }
        if cfg.minimal_width == 0 {
            let wanted = f64::from(players) * f64::from(cfg.car_size) * 2.5;
            let room = f64::from(cfg.race_width) - 2.0;
            cfg.minimal_width = wanted.min(room).max(0.0) as u16;
        }
        cfg
    }

    pub fn player_count(&self) -> usize {
        usize::from(self.players)
    }
}
