//! Framebuffer and style types for terminal rendering.

use crate::types::{Attr, Palette};

/// Minimal per-cell styling in the eight terminal colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Palette,
    pub bg: Palette,
    pub bold: bool,
}

impl CellStyle {
    pub const fn new(fg: Palette, bg: Palette, bold: bool) -> Self {
        Self { fg, bg, bold }
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::new(Palette::White, Palette::Black, false)
    }
}

impl From<Attr> for CellStyle {
    fn from(attr: Attr) -> Self {
        Self::new(attr.color, Palette::Black, attr.bold)
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::default(),
        }
    }
}

/// Grid of styled character cells, addressed `(x, y)`.
///
/// Writes outside the grid are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); usize::from(width) * usize::from(height)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Change the size, reusing the allocation. Contents are left stale.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells
            .resize(usize::from(width) * usize::from(height), Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cells of row `y`, empty below the last row.
    pub fn row(&self, y: u16) -> &[Cell] {
        if y >= self.height {
            return &[];
        }
        let start = usize::from(y) * usize::from(self.width);
        &self.cells[start..start + usize::from(self.width)]
    }

    #[inline(always)]
    fn offset(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.offset(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.offset(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.set(x, y, Cell { ch, style });
    }

    /// Write `s` from `(x, y)` rightwards, stopping at the right edge.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) {
        for (cx, ch) in (x..self.width).zip(s.chars()) {
            self.put_char(cx, y, ch, style);
        }
    }

    /// Copy `src` with its upper left corner at `(x, y)`, clipped to `self`.
    pub fn blit(&mut self, x: u16, y: u16, src: &FrameBuffer) {
        let cols = usize::from(src.width.min(self.width.saturating_sub(x)));
        if cols == 0 {
            return;
        }
        for (sy, ty) in (0..src.height).zip(y..self.height) {
            let to = usize::from(ty) * usize::from(self.width) + usize::from(x);
            self.cells[to..to + cols].copy_from_slice(&src.row(sy)[..cols]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_str_clips_at_right_edge() {
        let mut fb = FrameBuffer::new(4, 1);
        fb.put_str(2, 0, "abc", CellStyle::default());
        assert_eq!(fb.get(2, 0).unwrap().ch, 'a');
        assert_eq!(fb.get(3, 0).unwrap().ch, 'b');
        assert_eq!(fb.get(4, 0), None);
    }

    #[test]
    fn blit_clips_source_to_destination() {
        let mut src = FrameBuffer::new(3, 2);
        src.clear(Cell {
            ch: '#',
            style: CellStyle::default(),
        });
        let mut dst = FrameBuffer::new(4, 3);
        dst.blit(2, 2, &src);

        let text: String = dst.cells().iter().map(|c| c.ch).collect();
        assert_eq!(text, "          ##");
        assert_eq!(dst.get(3, 2).unwrap().ch, '#');
        assert_eq!(dst.get(1, 2).unwrap().ch, ' ');
    }

    #[test]
    fn row_slices_one_line() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.put_str(0, 1, "xyz", CellStyle::default());
        let text: String = fb.row(1).iter().map(|c| c.ch).collect();
        assert_eq!(text, "xyz");
        assert!(fb.row(2).is_empty());
    }

    #[test]
    fn attr_maps_onto_black_background() {
        let style = CellStyle::from(Attr::new(Palette::Cyan, true));
        assert_eq!(style, CellStyle::new(Palette::Cyan, Palette::Black, true));
    }
}
