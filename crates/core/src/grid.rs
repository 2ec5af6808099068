//! Grid model: the playfield cell matrix.
//!
//! Flat row-major storage, (x, y) with row 0 at the top. Dimensions are
//! fixed at construction. Cells above the visible field (y < 0) are legal
//! for a falling piece and never collide.

use gridfall_types::{Cell, Rgb};

use crate::piece::Piece;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        debug_assert!(width > 0 && height > 0);
        Self {
            width,
            height,
            cells: vec![None; (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            return None;
        }
        Some((y * self.width + x) as usize)
    }

    /// Cell at (x, y); `None` if out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Set cell at (x, y). Returns false if out of bounds.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Collision test for a piece translated by (dx, dy).
    ///
    /// A cell collides when it leaves the horizontal range, passes the
    /// bottom, or overlaps a locked cell. Cells above the top never collide,
    /// which spawn and near-top rotation rely on.
    pub fn is_colliding(&self, piece: &Piece, dx: i32, dy: i32) -> bool {
        piece.cells().any(|(x, y)| {
            let (x, y) = (x + dx, y + dy);
            x < 0 || x >= self.width || y >= self.height || (y >= 0 && self.is_occupied(x, y))
        })
    }

    /// Lock a piece's occupied cells into the grid at its current position.
    ///
    /// The caller must have verified the position is collision-free; merge
    /// does not re-check. Cells above the top row are dropped.
    pub fn merge(&mut self, piece: &Piece) {
        let color: Rgb = piece.color;
        for (x, y) in piece.cells() {
            if y >= 0 {
                self.set(x, y, Some(color));
            }
        }
    }

    pub fn row_is_full(&self, y: i32) -> bool {
        if y < 0 || y >= self.height {
            return false;
        }
        let start = (y * self.width) as usize;
        let end = start + self.width as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Remove every full row and insert that many empty rows at the top.
    ///
    /// All full rows are detected against the occupancy as it stood when the
    /// call began, so simultaneous clears (including adjacent rows) count
    /// together. Relative order of surviving rows is preserved. Returns the
    /// number of rows cleared.
    pub fn clear_full_lines(&mut self) -> u32 {
        let w = self.width as usize;
        let mut cleared = 0u32;
        let mut write_y = self.height as usize;

        for read_y in (0..self.height as usize).rev() {
            if self.row_is_full(read_y as i32) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src = read_y * w;
                    self.cells.copy_within(src..src + w, write_y * w);
                }
            }
        }

        for cell in &mut self.cells[..write_y * w] {
            *cell = None;
        }

        cleared
    }

    /// Row-major view of all cells (for snapshots).
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}
