//! Capabilities the core consumes from its environment.
//!
//! The core never talks to a terminal. Players draw into a [`Surface`] and
//! the race reads keys from an [`InputSource`]; the terminal crates provide
//! the real implementations.

use std::collections::VecDeque;

use crate::types::{Attr, Key};

/// A rectangular character-and-color addressable drawing area.
///
/// Coordinates are `(row, col)` relative to the surface. Writes outside the
/// surface are clipped.
pub trait Surface {
    /// `(width, height)` in character cells.
    fn size(&self) -> (u16, u16);

    /// Write a run of plain characters starting at `(row, col)`.
    fn put_run<I>(&mut self, row: u16, col: u16, run: I)
    where
        I: IntoIterator<Item = char>;

    /// Write one character with attributes.
    fn put_char(&mut self, row: u16, col: u16, ch: char, attr: Attr);

    /// Publish everything drawn since the previous flush.
    fn flush(&mut self);
}

/// Non-blocking keyboard input.
pub trait InputSource {
    /// Next pending key, or `None` when no more keys are waiting.
    fn poll_key(&mut self) -> Option<Key>;
}

/// Scripted input: keys are returned in push order.
#[derive(Debug, Clone, Default)]
pub struct KeyQueue {
    keys: VecDeque<Key>,
}

impl KeyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: Key) {
        self.keys.push_back(key);
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Extend<Key> for KeyQueue {
    fn extend<T: IntoIterator<Item = Key>>(&mut self, iter: T) {
        self.keys.extend(iter);
    }
}

impl FromIterator<Key> for KeyQueue {
    fn from_iter<T: IntoIterator<Item = Key>>(iter: T) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

impl InputSource for KeyQueue {
    fn poll_key(&mut self) -> Option<Key> {
        self.keys.pop_front()
    }
}

/// Convert a signed position to surface coordinates, if it is on the surface's
/// non-negative quadrant.
pub(crate) fn cell_at(row: i32, col: i32) -> Option<(u16, u16)> {
    let row = u16::try_from(row).ok()?;
    let col = u16::try_from(col).ok()?;
    Some((row, col))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_queue_drains_in_order() {
        let mut q: KeyQueue = [Key::Up, Key::Char('a')].into_iter().collect();
        q.push(Key::Esc);
        assert_eq!(q.len(), 3);
        assert_eq!(q.poll_key(), Some(Key::Up));
        assert_eq!(q.poll_key(), Some(Key::Char('a')));
        assert_eq!(q.poll_key(), Some(Key::Esc));
        assert_eq!(q.poll_key(), None);
        assert!(q.is_empty());
    }

    #[test]
    fn negative_positions_are_off_surface() {
        assert_eq!(cell_at(3, 4), Some((3, 4)));
        assert_eq!(cell_at(-1, 4), None);
        assert_eq!(cell_at(0, -2), None);
    }
}
