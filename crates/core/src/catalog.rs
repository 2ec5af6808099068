//! Piece catalog: the 7 fixed shapes, the 7-color palette, and random
//! piece generation.
//!
//! Shapes are ordered boolean matrices (row-major, bounding-box sized), not
//! offset lists, because rotation is defined on the matrix: clockwise is the
//! transpose of the row-reversed matrix. Shape and color are drawn
//! independently, so the same shape can spawn in different colors.

use arrayvec::ArrayVec;

use gridfall_types::Rgb;

use crate::rng::SimpleRng;

/// Number of distinct shapes (and palette entries).
pub const SHAPE_COUNT: usize = 7;

/// Largest cell count a shape matrix can reach across rotations (4x4).
pub const MAX_SHAPE_CELLS: usize = 16;

/// Fixed color palette: cyan, orange, blue, yellow, green, red, purple.
pub const PALETTE: [Rgb; SHAPE_COUNT] = [
    Rgb::new(0, 255, 255),
    Rgb::new(255, 165, 0),
    Rgb::new(0, 0, 255),
    Rgb::new(255, 255, 0),
    Rgb::new(0, 255, 0),
    Rgb::new(255, 0, 0),
    Rgb::new(128, 0, 128),
];

/// Spawn-orientation matrices for I, L, J, O, S, Z, T.
const SHAPE_ROWS: [&[&[u8]]; SHAPE_COUNT] = [
    &[&[1, 1, 1, 1]],
    &[&[1, 0], &[1, 0], &[1, 1]],
    &[&[0, 1], &[0, 1], &[1, 1]],
    &[&[1, 1], &[1, 1]],
    &[&[0, 1, 1], &[1, 1, 0]],
    &[&[1, 1, 0], &[0, 1, 1]],
    &[&[1, 1, 1], &[0, 1, 0]],
];

/// Ordered boolean occupancy matrix for one orientation of a piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    width: u8,
    height: u8,
    cells: ArrayVec<bool, MAX_SHAPE_CELLS>,
}

impl Shape {
    fn from_rows(rows: &[&[u8]]) -> Self {
        let height = rows.len() as u8;
        let width = rows[0].len() as u8;
        let mut cells = ArrayVec::new();
        for row in rows {
            debug_assert_eq!(row.len(), width as usize);
            for &v in *row {
                cells.push(v != 0);
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> i32 {
        self.width as i32
    }

    pub fn height(&self) -> i32 {
        self.height as i32
    }

    /// Whether the matrix cell at (x, y) is occupied. Out of range is empty.
    pub fn is_set(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width() || y >= self.height() {
            return false;
        }
        self.cells[(y * self.width()) as usize + x as usize]
    }

    /// Iterate occupied cells as (x, y) offsets within the bounding box.
    pub fn filled(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let w = self.width();
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &set)| set)
            .map(move |(i, _)| (i as i32 % w, i as i32 / w))
    }

    /// 90-degree clockwise rotation: transpose of the row-reversed matrix.
    ///
    /// The bounding box swaps dimensions; the anchor is unchanged.
    pub fn rotated_cw(&self) -> Self {
        let mut cells = ArrayVec::new();
        for y in 0..self.width() {
            for x in 0..self.height() {
                cells.push(self.is_set(y, self.height() - 1 - x));
            }
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }
}

/// A shape/color pair awaiting spawn (no position yet).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceTemplate {
    pub shape: Shape,
    pub color: Rgb,
}

/// Produces random piece templates from the fixed catalog.
///
/// The RNG is an explicit, seedable dependency so games are reproducible.
#[derive(Debug, Clone)]
pub struct PieceCatalog {
    rng: SimpleRng,
}

impl PieceCatalog {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Draw a fresh template. Shape and color indices are independent
    /// uniform draws; catalog entries are never mutated.
    pub fn random_piece(&mut self) -> PieceTemplate {
        let shape_idx = self.rng.next_range(SHAPE_COUNT as u32) as usize;
        let color_idx = self.rng.next_range(SHAPE_COUNT as u32) as usize;
        PieceTemplate {
            shape: Shape::from_rows(SHAPE_ROWS[shape_idx]),
            color: PALETTE[color_idx],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(idx: usize) -> Shape {
        Shape::from_rows(SHAPE_ROWS[idx])
    }

    #[test]
    fn test_every_shape_has_four_cells() {
        for idx in 0..SHAPE_COUNT {
            assert_eq!(shape(idx).filled().count(), 4, "shape {}", idx);
        }
    }

    #[test]
    fn test_i_shape_is_flat_bar() {
        let i = shape(0);
        assert_eq!((i.width(), i.height()), (4, 1));
        assert!((0..4).all(|x| i.is_set(x, 0)));
    }

    #[test]
    fn test_rotation_swaps_dimensions() {
        let l = shape(1);
        assert_eq!((l.width(), l.height()), (2, 3));
        let r = l.rotated_cw();
        assert_eq!((r.width(), r.height()), (3, 2));
    }

    #[test]
    fn test_l_rotation_matches_transpose_of_reversed_rows() {
        // L = [[1,0],[1,0],[1,1]] rotated clockwise is [[1,1,1],[1,0,0]].
        let r = shape(1).rotated_cw();
        assert!(r.is_set(0, 0) && r.is_set(1, 0) && r.is_set(2, 0));
        assert!(r.is_set(0, 1));
        assert!(!r.is_set(1, 1) && !r.is_set(2, 1));
    }

    #[test]
    fn test_o_rotation_is_identity() {
        let o = shape(3);
        assert_eq!(o.rotated_cw(), o);
    }

    #[test]
    fn test_four_rotations_return_to_start() {
        for idx in 0..SHAPE_COUNT {
            let original = shape(idx);
            let back = original
                .rotated_cw()
                .rotated_cw()
                .rotated_cw()
                .rotated_cw();
            assert_eq!(back, original, "shape {}", idx);
        }
    }

    #[test]
    fn test_is_set_out_of_range_is_empty() {
        let t = shape(6);
        assert!(!t.is_set(-1, 0));
        assert!(!t.is_set(0, -1));
        assert!(!t.is_set(3, 0));
        assert!(!t.is_set(0, 2));
    }

    #[test]
    fn test_catalog_is_deterministic_from_seed() {
        let mut a = PieceCatalog::new(42);
        let mut b = PieceCatalog::new(42);
        for _ in 0..20 {
            assert_eq!(a.random_piece(), b.random_piece());
        }
    }

    #[test]
    fn test_catalog_draws_shape_and_color_independently() {
        // With independent draws every (shape, color) pairing is reachable;
        // after enough draws some shape must show up in two colors.
        let mut catalog = PieceCatalog::new(1);
        let mut seen: Vec<(i32, i32, Rgb)> = Vec::new();
        for _ in 0..200 {
            let p = catalog.random_piece();
            seen.push((p.shape.width(), p.shape.height(), p.color));
        }
        let mismatched = seen.iter().any(|&(w, h, color)| {
            seen.iter()
                .any(|&(w2, h2, color2)| w == w2 && h == h2 && color != color2)
        });
        assert!(mismatched, "expected at least one shape in two colors");
    }
}
