//! Player agent - one car, its pane and its physics.
//!
//! The car moves one row towards the finish per move. How often it moves
//! depends on how far below the top of the viewport it is: every
//! `speed_base` rows of distance add one turn of delay, so a car pushed to
//! the front of its view drives faster.

use rand::Rng;

use crate::course::Racecourse;
use crate::silhouette::CarSilhouette;
use crate::surface::Surface;
use crate::types::{Controls, Key, RaceConfig, Steer, Throttle, TrackMode, CAR_COLORS};

/// Where a car stands in the race.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarState {
    Cruising,
    /// Reached the finish line.
    Finished,
    /// Hit something. The pane stays frozen on the explosion.
    Crashed,
}

impl CarState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CarState::Cruising => "cruising",
            CarState::Finished => "finished",
            CarState::Crashed => "crashed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlayerAgent<S> {
    index: usize,
    surface: S,
    car: CarSilhouette,
    /// Index of this player's course in the race
    course: usize,
    /// Upper left corner of the car on the course
    row: i32,
    col: i32,
    /// First course row visible in the pane
    top_row: i32,
    throttle: Throttle,
    steer: Steer,
    /// Turn of the last move, `None` before the first one
    last_move: Option<u64>,
    controls: Controls,
    speed_base: i32,
    state: CarState,
}

impl<S: Surface> PlayerAgent<S> {
    /// Place player `index` on the starting grid of `course`.
    ///
    /// The car starts at the bottom of its pane. On a shared track the cars
    /// are lined up side by side; otherwise each starts mid-track.
    pub fn new(index: usize, config: &RaceConfig, course: usize, surface: S) -> Self {
        let car_size = i32::from(config.car_size);
        let width = i32::from(config.race_width);
        let length = i32::from(config.race_length);
        let (_, height) = surface.size();

        let col = if config.track == TrackMode::Shared {
            let players = i32::from(config.players);
            (width - (car_size + 1) * (players - 2 * index as i32)) / 2
        } else {
            width / 2
        };

        Self {
            index,
            surface,
            car: CarSilhouette::build(
                config.car_size,
                config.car_glyph,
                CAR_COLORS[index % CAR_COLORS.len()],
            ),
            course,
            row: length - car_size,
            col,
            top_row: (length - i32::from(height)).max(0),
            throttle: Throttle::Coast,
            steer: Steer::Straight,
            last_move: None,
            controls: config.controls[index % config.controls.len()],
            speed_base: i32::from(config.speed_base).max(1),
            state: CarState::Cruising,
        }
    }

    /// Record a key for the next move. The last key per axis wins.
    pub fn parse_input(&mut self, key: Key) {
        let c = self.controls;
        if key == c.accelerate {
            self.throttle = Throttle::Accelerate;
        }
        if key == c.brake {
            self.throttle = Throttle::Brake;
        }
        if key == c.left {
            self.steer = Steer::Left;
        }
        if key == c.right {
            self.steer = Steer::Right;
        }
    }

    /// Turns between moves at the current position.
    pub fn move_interval(&self) -> u64 {
        ((self.row - self.top_row).max(0) / self.speed_base) as u64
    }

    /// Whether the car moves on turn `time`.
    pub fn is_due(&self, time: u64) -> bool {
        match self.last_move {
            None => true,
            Some(last) => time >= last + self.move_interval(),
        }
    }

    /// Advance the car if it is due, redraw the pane and check collisions.
    ///
    /// Returns false once the car has finished or crashed.
    pub fn tick<R: Rng + ?Sized>(&mut self, time: u64, course: &Racecourse, rng: &mut R) -> bool {
        if self.state != CarState::Cruising {
            return false;
        }
        if !self.is_due(time) {
            return true;
        }

        self.last_move = Some(time);
        self.row -= 1;
        self.top_row = (self.top_row - 1).max(0);

        self.row += self.throttle.delta();
        self.col += self.steer.delta();
        self.throttle = Throttle::Coast;
        self.steer = Steer::Straight;

        // Keep the whole car inside the pane.
        let (surface_width, surface_height) = self.surface.size();
        let car_size = i32::from(self.car.size());
        let lowest = self.top_row + i32::from(surface_height) - car_size;
        self.row = self.row.min(lowest).max(self.top_row);

        if self.row <= 0 {
            self.state = CarState::Finished;
            log::info!("player {} finished on turn {}", self.index + 1, time);
            return false;
        }

        course.display(&mut self.surface, self.top_row);

        let mut survive = true;
        for dr in 0..self.car.size() {
            for dc in 0..self.car.size() {
                let (r, c) = (self.row + i32::from(dr), self.col + i32::from(dc));
                if course.taken(r, c) && self.car.collision_check(dr, dc) {
                    survive = false;
                }
            }
        }

        let screen_row = self.row - self.top_row;
        let screen_col = self.col + i32::from(course.center_offset(surface_width));
        if survive {
            self.car.display(&mut self.surface, screen_row, screen_col);
        } else {
            self.car.explode(&mut self.surface, screen_row, screen_col, rng);
            self.state = CarState::Crashed;
            log::info!(
                "player {} crashed at ({}, {}) on turn {}",
                self.index + 1,
                self.row,
                self.col,
                time
            );
        }
        self.surface.flush();

        survive
    }

    /// Put this car's footprint on a shared course.
    pub fn mark_position(&self, course: &mut Racecourse) {
        course.mark(self.row, self.col, &self.car);
    }

    pub fn unmark_position(&self, course: &mut Racecourse) {
        course.unmark(self.row, self.col, &self.car);
    }
}

impl<S> PlayerAgent<S> {
    pub fn index(&self) -> usize {
        self.index
    }

    /// `(row, col)` of the car's upper left corner on the course.
    pub fn position(&self) -> (i32, i32) {
        (self.row, self.col)
    }

    pub fn viewport_top(&self) -> i32 {
        self.top_row
    }

    pub fn state(&self) -> CarState {
        self.state
    }

    pub fn pending(&self) -> (Throttle, Steer) {
        (self.throttle, self.steer)
    }

    pub fn last_move(&self) -> Option<u64> {
        self.last_move
    }

    pub fn car(&self) -> &CarSilhouette {
        &self.car
    }

    pub fn course_index(&self) -> usize {
        self.course
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
