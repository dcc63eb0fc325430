//! Car silhouette - the car's shape as a square pixel grid.
//!
//! The outline is a zig-zag through five control points, `(0,0) (1,4) (2,0)
//! (3,4) (4,0)` in `(row, col)` quarters of the car, scaled to the car size
//! and rasterized column by column. Cells between the zig-zag's ribs stay
//! empty, so a rock can sit between them without a collision.

use rand::Rng;

use crate::surface::{cell_at, Surface};
use crate::types::{Attr, Palette, SPARK_COLORS, SPARK_GLYPH};

/// Control points in quarters of the car, `(row, col)`.
const OUTLINE: [(i32, i32); 5] = [(0, 0), (1, 4), (2, 0), (3, 4), (4, 0)];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarSilhouette {
    size: u16,
    /// Row-major `size * size` occupancy grid
    cells: Vec<bool>,
    /// Occupied offsets in the order they were rasterized
    dots: Vec<(u16, u16)>,
    glyph: char,
    color: Palette,
}

impl CarSilhouette {
    /// Rasterize the outline for a car of side `size`.
    pub fn build(size: u16, glyph: char, color: Palette) -> Self {
        let side = usize::from(size);
        let mut car = Self {
            size,
            cells: vec![false; side * side],
            dots: Vec::new(),
            glyph,
            color,
        };
        if size == 0 {
            return car;
        }

        let span = i32::from(size) - 1;
        let scale = |(row, col): (i32, i32)| (row * span / 4, col * span / 4);
        for pair in OUTLINE.windows(2) {
            car.line(scale(pair[0]), scale(pair[1]));
        }
        car
    }

    /// Draw a segment between two `(row, col)` points.
    ///
    /// Walks every column between the endpoints and interpolates the row,
    /// rounding half up.
    fn line(&mut self, a: (i32, i32), b: (i32, i32)) {
        let ((y1, x1), (y2, x2)) = if b.1 < a.1 { (b, a) } else { (a, b) };

        if x1 == x2 {
            for row in y1.min(y2)..=y1.max(y2) {
                self.plot(row, x1);
            }
            return;
        }

        for col in x1..=x2 {
            let t = (y2 - y1) as f32 * (col - x1) as f32 / (x2 - x1) as f32;
            self.plot(y1 + (t + 0.5) as i32, col);
        }
    }

    fn plot(&mut self, row: i32, col: i32) {
        let Some((row, col)) = cell_at(row, col) else {
            return;
        };
        if row >= self.size || col >= self.size {
            return;
        }
        let idx = self.index(row, col);
        if !self.cells[idx] {
            self.cells[idx] = true;
            self.dots.push((row, col));
        }
    }

    #[inline(always)]
    fn index(&self, row: u16, col: u16) -> usize {
        usize::from(row) * usize::from(self.size) + usize::from(col)
    }

    /// Whether the car occupies the given offset from its upper left corner.
    ///
    /// # Panics
    ///
    /// If the offset lies outside the `size x size` square.
    pub fn collision_check(&self, row: u16, col: u16) -> bool {
        assert!(
            row < self.size && col < self.size,
            "offset ({}, {}) outside a car of size {}",
            row,
            col,
            self.size
        );
        self.cells[self.index(row, col)]
    }

    /// Occupied offsets, each once.
    pub fn dots(&self) -> &[(u16, u16)] {
        &self.dots
    }

    pub fn size(&self) -> u16 {
        self.size
    }

    pub fn glyph(&self) -> char {
        self.glyph
    }

    pub fn color(&self) -> Palette {
        self.color
    }

    /// Draw the car with its upper left corner at `(row, col)` of the surface.
    pub fn display<S: Surface>(&self, surface: &mut S, row: i32, col: i32) {
        let attr = Attr::new(self.color, true);
        for &(dr, dc) in &self.dots {
            if let Some((r, c)) = cell_at(row + i32::from(dr), col + i32::from(dc)) {
                surface.put_char(r, c, self.glyph, attr);
            }
        }
    }

    /// Draw a burst of sparks over the car's square instead of the car.
    pub fn explode<S, R>(&self, surface: &mut S, row: i32, col: i32, rng: &mut R)
    where
        S: Surface,
        R: Rng + ?Sized,
    {
        for dr in 0..i32::from(self.size) {
            for dc in 0..i32::from(self.size) {
                if !rng.gen::<bool>() {
                    continue;
                }
                let color = SPARK_COLORS[rng.gen_range(0..SPARK_COLORS.len())];
                if let Some((r, c)) = cell_at(row + dr, col + dc) {
                    surface.put_char(r, c, SPARK_GLYPH, Attr::new(color, false));
                }
            }
        }
    }
}
