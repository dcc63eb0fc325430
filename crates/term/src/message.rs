//! Modal one-line message drawn over the middle of the screen.

use crate::fb::{CellStyle, FrameBuffer};
use crate::types::Palette;

/// Results message colors: bold yellow on blue.
pub const MESSAGE_STYLE: CellStyle = CellStyle::new(Palette::Yellow, Palette::Blue, true);

/// Draw `text` centered on `fb`, clipped at the right edge.
pub fn draw_message(fb: &mut FrameBuffer, text: &str) {
    let len = text.chars().count() as u16;
    let x = (fb.width() / 2).saturating_sub(len / 2);
    let y = fb.height() / 2;
    fb.put_str(x, y, text, MESSAGE_STYLE);
}
