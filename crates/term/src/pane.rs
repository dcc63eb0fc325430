//! Pane: one player's off-screen drawing surface.
//!
//! Writes go to a back buffer; [`Surface::flush`] publishes it to the front
//! buffer, which is what the screen composer reads. A pane that is never
//! flushed again (a crashed car) keeps showing its last published frame.

use tui_racer_core::Surface;

use crate::fb::{CellStyle, FrameBuffer};
use crate::types::Attr;

#[derive(Debug, Clone)]
pub struct Pane {
    back: FrameBuffer,
    front: FrameBuffer,
    flushes: u64,
}

impl Pane {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            back: FrameBuffer::new(width, height),
            front: FrameBuffer::new(width, height),
            flushes: 0,
        }
    }

    /// Contents as of the last flush.
    pub fn front(&self) -> &FrameBuffer {
        &self.front
    }

    /// Contents drawn since the last flush.
    pub fn back(&self) -> &FrameBuffer {
        &self.back
    }

    pub fn flushes(&self) -> u64 {
        self.flushes
    }

    /// Published character at `(row, col)`, a space off the pane.
    pub fn char_at(&self, row: u16, col: u16) -> char {
        self.front.get(col, row).map_or(' ', |cell| cell.ch)
    }

    /// One published row as text.
    pub fn row_text(&self, row: u16) -> String {
        (0..self.front.width()).map(|col| self.char_at(row, col)).collect()
    }
}

impl Surface for Pane {
    fn size(&self) -> (u16, u16) {
        (self.back.width(), self.back.height())
    }

    fn put_run<I>(&mut self, row: u16, col: u16, run: I)
    where
        I: IntoIterator<Item = char>,
    {
        let style = CellStyle::default();
        let mut x = col;
        for ch in run {
            if x >= self.back.width() {
                break;
            }
            self.back.put_char(x, row, ch, style);
            x += 1;
        }
    }

    fn put_char(&mut self, row: u16, col: u16, ch: char, attr: Attr) {
        self.back.put_char(col, row, ch, CellStyle::from(attr));
    }

    fn flush(&mut self) {
        self.front.clone_from(&self.back);
        self.flushes += 1;
    }
}
