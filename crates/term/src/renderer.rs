//! TerminalRenderer: puts the composed screen on a real terminal.
//!
//! Each frame is diffed against the one before and written as runs of changed
//! cells. Commands for a whole frame are queued into one byte buffer, so a
//! frame reaches the terminal in a single write and never shows half drawn.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer};
use crate::types::Palette;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Frame currently on the terminal, `None` forces a full redraw
    shown: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    /// Raw mode on the alternate screen, cursor hidden.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.write_buf()
    }

    /// Undo [`TerminalRenderer::enter`].
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.write_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Show `screen`, then swap it with the previously shown frame.
    ///
    /// The caller keeps passing the same buffer in; after the call it holds
    /// stale contents and has to be redrawn completely.
    pub fn draw_swap(&mut self, screen: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut shown = match self.shown.take() {
            Some(shown) if same_size(&shown, screen) => {
                encode_diff_into(&shown, screen, &mut self.buf)?;
                shown
            }
            stale => {
                encode_full_into(screen, &mut self.buf)?;
                let mut shown = stale.unwrap_or_else(|| FrameBuffer::new(0, 0));
                shown.resize(screen.width(), screen.height());
                shown
            }
        };
        self.write_buf()?;

        std::mem::swap(&mut shown, screen);
        self.shown = Some(shown);
        Ok(())
    }

    fn write_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

fn same_size(a: &FrameBuffer, b: &FrameBuffer) -> bool {
    a.width() == b.width() && a.height() == b.height()
}

/// Encode a clear screen followed by every cell of `fb`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = Pen::default();
    for y in 0..fb.height() {
        pen.run(out, fb, 0, y, fb.width())?;
    }
    pen.finish(out)
}

/// Encode the cells of `next` that differ from `prev`.
///
/// Both frames must have the same size.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = Pen::default();
    for (y, x, len) in changed_runs(prev, next) {
        pen.run(out, next, x, y, len)?;
    }
    pen.finish(out)
}

/// Tracks the terminal's current colors so only changes are emitted.
#[derive(Debug, Default)]
struct Pen {
    fg: Option<Palette>,
    bg: Option<Palette>,
    bold: Option<bool>,
}

impl Pen {
    fn run(&mut self, out: &mut Vec<u8>, fb: &FrameBuffer, x: u16, y: u16, len: u16) -> Result<()> {
        out.queue(cursor::MoveTo(x, y))?;
        for cx in x..x.saturating_add(len) {
            let Some(cell) = fb.get(cx, y) else {
                break;
            };
            self.style(out, cell.style)?;
            out.queue(Print(cell.ch))?;
        }
        Ok(())
    }

    fn style(&mut self, out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
        if self.bold != Some(style.bold) {
            // Dropping bold resets the colors too.
            let attr = if style.bold {
                Attribute::Bold
            } else {
                Attribute::Reset
            };
            out.queue(SetAttribute(attr))?;
            self.bold = Some(style.bold);
            if !style.bold {
                self.fg = None;
                self.bg = None;
            }
        }
        if self.fg != Some(style.fg) {
            out.queue(SetForegroundColor(palette_color(style.fg)))?;
            self.fg = Some(style.fg);
        }
        if self.bg != Some(style.bg) {
            out.queue(SetBackgroundColor(palette_color(style.bg)))?;
            self.bg = Some(style.bg);
        }
        Ok(())
    }

    fn finish(self, out: &mut Vec<u8>) -> Result<()> {
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

fn palette_color(color: Palette) -> Color {
    match color {
        Palette::Black => Color::Black,
        Palette::Red => Color::DarkRed,
        Palette::Green => Color::DarkGreen,
        Palette::Yellow => Color::DarkYellow,
        Palette::Blue => Color::DarkBlue,
        Palette::Magenta => Color::DarkMagenta,
        Palette::Cyan => Color::DarkCyan,
        Palette::White => Color::Grey,
    }
}

/// `(y, x, len)` of every maximal horizontal run of differing cells.
fn changed_runs<'a>(
    prev: &'a FrameBuffer,
    next: &'a FrameBuffer,
) -> impl Iterator<Item = (u16, u16, u16)> + 'a {
    let width = next.width();
    (0..next.height()).flat_map(move |y| {
        let differs = move |x: u16| prev.get(x, y) != next.get(x, y);
        let mut x = 0;
        std::iter::from_fn(move || {
            while x < width && !differs(x) {
                x += 1;
            }
            if x >= width {
                return None;
            }
            let start = x;
            while x < width && differs(x) {
                x += 1;
            }
            Some((y, start, x - start))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fb::Cell;

    #[test]
    fn palette_uses_the_eight_classic_colors() {
        assert_eq!(palette_color(Palette::Yellow), Color::DarkYellow);
        assert_eq!(palette_color(Palette::Black), Color::Black);
        assert_eq!(palette_color(Palette::White), Color::Grey);
    }

    #[test]
    fn changed_runs_coalesce_adjacent_cells() {
        let style = CellStyle::default();
        let a = FrameBuffer::new(6, 2);
        let mut b = FrameBuffer::new(6, 2);
        for x in 1..=3 {
            b.set(x, 0, Cell { ch: '|', style });
        }
        b.set(5, 1, Cell { ch: '*', style });

        let runs: Vec<_> = changed_runs(&a, &b).collect();
        assert_eq!(runs, vec![(0, 1, 3), (1, 5, 1)]);
    }

    #[test]
    fn identical_frames_encode_no_cells() {
        let a = FrameBuffer::new(3, 3);
        let mut out = Vec::new();
        encode_diff_into(&a, &a.clone(), &mut out).unwrap();
        assert!(!String::from_utf8_lossy(&out).contains(' '));
    }

    #[test]
    fn full_redraw_prints_every_cell() {
        let mut fb = FrameBuffer::new(2, 1);
        fb.put_str(0, 0, "ok", CellStyle::default());
        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();
        assert!(String::from_utf8_lossy(&out).contains("ok"));
    }

    #[test]
    fn pen_skips_repeated_styles() {
        let style = CellStyle::new(Palette::Yellow, Palette::Blue, true);
        let mut pen = Pen::default();
        let mut first = Vec::new();
        pen.style(&mut first, style).unwrap();
        let mut again = Vec::new();
        pen.style(&mut again, style).unwrap();
        assert!(!first.is_empty());
        assert!(again.is_empty());
    }
}
