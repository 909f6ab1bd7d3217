//! Shared move buffer for depth-first traversal.
//!
//! Every recursion depth generates into a fresh frame at the top of one
//! buffer and releases it before returning, so a whole search reuses a single
//! allocation.

use std::ops::Range;

use crate::game_state::chess_types::Move;

/// Half-open `[start, end)` region of a [`MoveStack`] owned by one depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveFrame {
    pub start: usize,
    pub end: usize,
}

impl MoveFrame {
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn indices(&self) -> Range<usize> {
        self.start..self.end
    }
}

#[derive(Debug, Clone, Default)]
pub struct MoveStack {
    moves: Vec<Move>,
}

impl MoveStack {
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            moves: Vec::with_capacity(capacity),
        }
    }

    /// Start of the next frame.
    #[inline]
    pub fn open_frame(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn push(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    #[inline]
    pub fn close_frame(&self, start: usize) -> MoveFrame {
        MoveFrame {
            start,
            end: self.moves.len(),
        }
    }

    #[inline]
    pub fn get(&self, index: usize) -> Move {
        self.moves[index]
    }

    #[inline]
    pub fn moves(&self, frame: MoveFrame) -> &[Move] {
        &self.moves[frame.indices()]
    }

    /// Drop `frame`. It must be the topmost frame.
    #[inline]
    pub fn release(&mut self, frame: MoveFrame) {
        debug_assert_eq!(self.moves.len(), frame.end, "released a frame that is not on top");
        self.moves.truncate(frame.start);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}
