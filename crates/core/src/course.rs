//! Racecourse - the terrain grid and its generator
//!
//! The course is `length` rows of `width` cells, stored flat in row-major
//! order. Row 0 is the finish line; cars start near row `length - 1`.
//!
//! Generation walks two kerbs from the start line towards the finish. Each
//! kerb keeps a per-row direction (-1, 0 or +1 columns) that is occasionally
//! re-rolled, kept off the edge of the grid, and forced outwards whenever the
//! road would become narrower than the configured minimal width.

use rand::Rng;

use crate::error::ConfigurationError;
use crate::silhouette::CarSilhouette;
use crate::surface::Surface;
use crate::types::{Bend, RaceConfig, Side, Terrain, KERB_TURN_TRIES};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Racecourse {
    length: usize,
    width: usize,
    /// Row-major cells (row * width + col)
    cells: Vec<Terrain>,
    /// Logical `(left, right)` kerb columns per row
    bounds: Vec<(i32, i32)>,
    marker: char,
}

/// One of the two kerbs during generation.
#[derive(Debug, Clone, Copy)]
struct Kerb {
    side: Side,
    col: i32,
    step: i32,
}

impl Kerb {
    fn new(side: Side, col: i32) -> Self {
        Self { side, col, step: 0 }
    }

    /// Whether moving by `step` would put the kerb on its wall.
    ///
    /// The left wall is column 0, the right wall is column `width` (just off
    /// the grid).
    fn hits_wall(&self, step: i32, width: i32) -> bool {
        let next = self.col + step;
        match self.side {
            Side::Left => next <= 0,
            Side::Right => next >= width,
        }
    }

    fn terrain(&self) -> Terrain {
        Terrain::Kerb(self.side, Bend::from_step(self.side, self.step))
    }

    fn reroll<R: Rng + ?Sized>(&mut self, rng: &mut R, turn_chance: f64, width: i32) {
        for _ in 0..KERB_TURN_TRIES {
            let turn = rng.gen::<f64>() < turn_chance;
            if !(turn || self.hits_wall(self.step, width)) {
                break;
            }
            self.step = rng.gen_range(-1..=1);
        }
    }

    fn keep_off_wall(&mut self, width: i32) {
        if self.hits_wall(self.step, width) {
            self.step = 0;
        }
    }
}

impl Racecourse {
    /// Generate a fresh course from the race parameters.
    ///
    /// Uses `race_length`, `race_width`, `minimal_width`, `rock_chance`,
    /// `turn_chance` and `car_glyph` (the marker glyph) from `config`.
    pub fn generate<R: Rng + ?Sized>(
        config: &RaceConfig,
        rng: &mut R,
    ) -> Result<Self, ConfigurationError> {
        if config.race_length == 0 || config.race_width == 0 {
            return Err(ConfigurationError::EmptyCourse {
                length: config.race_length,
                width: config.race_width,
            });
        }
        if config.minimal_width > config.race_width {
            return Err(ConfigurationError::MinimalWidthTooLarge {
                minimal: config.minimal_width,
                width: config.race_width,
            });
        }

        let length = usize::from(config.race_length);
        let width = usize::from(config.race_width);
        let w = i32::from(config.race_width);
        // A zero gap would let the kerbs meet.
        let minimal = i32::from(config.minimal_width.max(1));

        let mut course = Self {
            length,
            width,
            cells: vec![Terrain::Empty; length * width],
            bounds: vec![(0, 0); length],
            marker: config.car_glyph,
        };

        // Start the road halfway between the narrowest and widest possible.
        let mut left = Kerb::new(Side::Left, (w - minimal) / 4);
        let mut right = Kerb::new(Side::Right, (3 * w + minimal) / 4);

        for row in (0..length).rev() {
            let r = row as i32;
            course.set(r, 0, Terrain::Distance((row % 10) as u8));

            if rng.gen::<f64>() < config.rock_chance {
                let col = rng.gen_range(0..width) as i32;
                course.set(r, col, Terrain::Rock);
            }

            for kerb in [&mut left, &mut right] {
                kerb.col += kerb.step;
                // A kerb on the right wall is off the grid and not drawn.
                course.set(r, kerb.col, kerb.terrain());
            }
            course.bounds[row] = (left.col, right.col);

            for kerb in [&mut left, &mut right] {
                kerb.reroll(rng, config.turn_chance, w);
                kerb.keep_off_wall(w);
            }
            if (right.col + right.step) - (left.col + left.step) < minimal {
                left.step = -1;
                right.step = 1;
                left.keep_off_wall(w);
                right.keep_off_wall(w);
            }
        }

        log::debug!(
            "generated racecourse {}x{} (minimal width {}, finish gap {})",
            length,
            width,
            minimal,
            course.bounds[0].1 - course.bounds[0].0
        );
        Ok(course)
    }

    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        if row >= self.length || col >= self.width {
            return None;
        }
        Some(row * self.width + col)
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Glyph written for car footprints by [`Racecourse::mark`].
    pub fn marker_glyph(&self) -> char {
        self.marker
    }

    /// Cell at `(row, col)`, `None` off the grid.
    pub fn get(&self, row: i32, col: i32) -> Option<Terrain> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Overwrite a cell. Returns false off the grid.
    pub fn set(&mut self, row: i32, col: i32, terrain: Terrain) -> bool {
        match self.index(row, col) {
            Some(i) => {
                self.cells[i] = terrain;
                true
            }
            None => false,
        }
    }

    /// Cells of one row, `None` outside the course.
    pub fn row(&self, row: i32) -> Option<&[Terrain]> {
        let row = usize::try_from(row).ok()?;
        if row >= self.length {
            return None;
        }
        let start = row * self.width;
        Some(&self.cells[start..start + self.width])
    }

    pub fn cells(&self) -> &[Terrain] {
        &self.cells
    }

    /// Logical `(left, right)` kerb columns of a row.
    ///
    /// The right kerb may sit on column `width`, just off the grid.
    pub fn bounds(&self, row: i32) -> Option<(i32, i32)> {
        usize::try_from(row)
            .ok()
            .and_then(|r| self.bounds.get(r).copied())
    }

    /// Whether something occupies the cell. Everything off the grid counts as
    /// occupied.
    pub fn taken(&self, row: i32, col: i32) -> bool {
        self.get(row, col).map_or(true, |t| !t.is_empty())
    }

    /// Write the car's footprint with its upper left corner at `(row, col)`.
    ///
    /// Only empty cells are written, so marking twice is harmless and terrain
    /// under the car survives.
    pub fn mark(&mut self, row: i32, col: i32, car: &CarSilhouette) {
        for &(dr, dc) in car.dots() {
            if let Some(i) = self.index(row + i32::from(dr), col + i32::from(dc)) {
                if self.cells[i] == Terrain::Empty {
                    self.cells[i] = Terrain::Marker;
                }
            }
        }
    }

    /// Remove a footprint written by [`Racecourse::mark`].
    pub fn unmark(&mut self, row: i32, col: i32, car: &CarSilhouette) {
        for &(dr, dc) in car.dots() {
            if let Some(i) = self.index(row + i32::from(dr), col + i32::from(dc)) {
                if self.cells[i] == Terrain::Marker {
                    self.cells[i] = Terrain::Empty;
                }
            }
        }
    }

    /// Column at which the course starts on a surface `surface_width` wide.
    pub fn center_offset(&self, surface_width: u16) -> u16 {
        (usize::from(surface_width).saturating_sub(self.width) / 2) as u16
    }

    /// Draw the rows from `top_row` down, as many as the surface is tall.
    ///
    /// # Panics
    ///
    /// If the course is wider than the surface.
    pub fn display<S: Surface>(&self, surface: &mut S, top_row: i32) {
        let (surface_width, surface_height) = surface.size();
        assert!(
            self.width <= usize::from(surface_width),
            "racecourse of width {} does not fit a surface of width {}",
            self.width,
            surface_width
        );
        let col = self.center_offset(surface_width);
        for screen_row in 0..surface_height {
            if let Some(cells) = self.row(top_row + i32::from(screen_row)) {
                surface.put_run(screen_row, col, cells.iter().map(|t| t.glyph(self.marker)));
            }
        }
    }
}
