//! Active piece and the fixed-length look-ahead queue.

use std::collections::VecDeque;

use gridfall_types::{Rgb, PREVIEW_COUNT};

use crate::catalog::{PieceCatalog, PieceTemplate, Shape};

/// The falling piece. `(x, y)` is the top-left anchor of the shape's
/// bounding box in grid coordinates. Owned exclusively by the session while
/// falling; once merged its cells belong to the grid and the instance is
/// discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub shape: Shape,
    pub color: Rgb,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    /// Iterate occupied cells in absolute grid coordinates.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .filled()
            .map(move |(cx, cy)| (self.x + cx, self.y + cy))
    }
}

/// Look-ahead queue of exactly `PREVIEW_COUNT` upcoming templates.
///
/// Dequeuing the front and appending a freshly generated template happen
/// inside `spawn`, so the length invariant holds at every observable point.
#[derive(Debug, Clone)]
pub struct PieceQueue {
    catalog: PieceCatalog,
    upcoming: VecDeque<PieceTemplate>,
}

impl PieceQueue {
    pub fn new(seed: u32) -> Self {
        let mut queue = Self {
            catalog: PieceCatalog::new(seed),
            upcoming: VecDeque::with_capacity(PREVIEW_COUNT + 1),
        };
        queue.refill();
        queue
    }

    fn refill(&mut self) {
        while self.upcoming.len() < PREVIEW_COUNT {
            let template = self.catalog.random_piece();
            self.upcoming.push_back(template);
        }
    }

    /// Discard the queued templates and draw a fresh look-ahead from the
    /// continuing random sequence. Used on session restart.
    pub fn reset(&mut self) {
        self.upcoming.clear();
        self.refill();
    }

    /// Pop the front template, append a new one, and return a positioned
    /// piece centered at the top of a grid of the given width.
    pub fn spawn(&mut self, grid_width: i32) -> Piece {
        let replacement = self.catalog.random_piece();
        self.upcoming.push_back(replacement);
        // Length is PREVIEW_COUNT + 1 here, so the front is always present.
        let next = self
            .upcoming
            .pop_front()
            .unwrap_or_else(|| self.catalog.random_piece());

        let x = grid_width / 2 - next.shape.width() / 2;
        Piece {
            shape: next.shape,
            color: next.color,
            x,
            y: 0,
        }
    }

    /// The upcoming templates, front (next to spawn) first.
    pub fn preview(&self) -> impl ExactSizeIterator<Item = &PieceTemplate> {
        self.upcoming.iter()
    }
}
