//! Split-screen layout.
//!
//! The screen is cut into equal stripes, one per player. On a vertical split
//! player 1 takes the rightmost stripe (the arrow keys sit on the right of
//! the keyboard); on a horizontal split players stack from the top.

use crate::fb::FrameBuffer;
use crate::pane::Pane;
use crate::types::SplitAxis;

/// A screen rectangle in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitLayout {
    axis: SplitAxis,
    rects: Vec<Rect>,
}

impl SplitLayout {
    pub fn new(axis: SplitAxis, players: usize, screen_width: u16, screen_height: u16) -> Self {
        let n = players.max(1) as u16;
        let rects = (0..n)
            .map(|i| match axis {
                SplitAxis::Vertical => {
                    let w = screen_width / n;
                    Rect::new(w * (n - i - 1), 0, w, screen_height)
                }
                SplitAxis::Horizontal => {
                    let h = screen_height / n;
                    Rect::new(0, h * i, screen_width, h)
                }
            })
            .collect();
        Self { axis, rects }
    }

    pub fn axis(&self) -> SplitAxis {
        self.axis
    }

    /// Player rectangles, by player index.
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    /// `(width, height)` shared by every pane.
    pub fn pane_size(&self) -> (u16, u16) {
        self.rects
            .first()
            .map_or((0, 0), |r| (r.width, r.height))
    }

    /// One empty pane per player.
    pub fn panes(&self) -> Vec<Pane> {
        self.rects
            .iter()
            .map(|r| Pane::new(r.width, r.height))
            .collect()
    }

    /// Copy every pane's published frame into its stripe of `screen`.
    pub fn compose<'a, I>(&self, panes: I, screen: &mut FrameBuffer)
    where
        I: IntoIterator<Item = &'a Pane>,
    {
        for (rect, pane) in self.rects.iter().zip(panes) {
            screen.blit(rect.x, rect.y, pane.front());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_racer_core::Surface;

    #[test]
    fn vertical_split_puts_first_player_on_the_right() {
        let layout = SplitLayout::new(SplitAxis::Vertical, 2, 81, 24);
        assert_eq!(
            layout.rects(),
            &[Rect::new(40, 0, 40, 24), Rect::new(0, 0, 40, 24)]
        );
        assert_eq!(layout.pane_size(), (40, 24));
    }

    #[test]
    fn horizontal_split_stacks_from_the_top() {
        let layout = SplitLayout::new(SplitAxis::Horizontal, 2, 80, 25);
        assert_eq!(
            layout.rects(),
            &[Rect::new(0, 0, 80, 12), Rect::new(0, 12, 80, 12)]
        );
    }

    #[test]
    fn single_player_takes_the_whole_screen() {
        let layout = SplitLayout::new(SplitAxis::Vertical, 1, 80, 24);
        assert_eq!(layout.rects(), &[Rect::new(0, 0, 80, 24)]);
    }

    #[test]
    fn compose_places_panes_in_their_stripes() {
        let layout = SplitLayout::new(SplitAxis::Vertical, 2, 4, 1);
        let mut panes = layout.panes();
        panes[0].put_run(0, 0, "ab".chars());
        panes[1].put_run(0, 0, "cd".chars());
        for pane in &mut panes {
            pane.flush();
        }

        let mut screen = FrameBuffer::new(4, 1);
        layout.compose(&panes, &mut screen);
        let text: String = screen.cells().iter().map(|c| c.ch).collect();
        assert_eq!(text, "cdab");
    }
}
