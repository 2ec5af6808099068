//! Immutable read model of a game session.
//!
//! Presentation never touches `Game` directly; it captures a snapshot once
//! per frame and renders from that. The snapshot owns its data so rendering
//! cannot observe a half-updated session.

use arrayvec::ArrayVec;

use gridfall_types::{Cell, Phase, Rgb};

use crate::catalog::{Shape, MAX_SHAPE_CELLS};
use crate::game::Game;

/// The falling piece, resolved to absolute occupied cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveView {
    pub color: Rgb,
    pub cells: ArrayVec<(i32, i32), MAX_SHAPE_CELLS>,
}

/// One upcoming piece for the side panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewView {
    pub shape: Shape,
    pub color: Rgb,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub width: i32,
    pub height: i32,
    /// Locked cells, row-major, `width * height` entries.
    pub cells: Vec<Cell>,
    pub active: ActiveView,
    /// Upcoming pieces, next to spawn first.
    pub preview: Vec<PreviewView>,
    pub score: u32,
    pub phase: Phase,
}

impl GameSnapshot {
    pub(crate) fn capture(game: &Game) -> Self {
        let grid = game.grid();
        let active = game.active();
        Self {
            width: grid.width(),
            height: grid.height(),
            cells: grid.cells().to_vec(),
            active: ActiveView {
                color: active.color,
                cells: active.cells().collect(),
            },
            preview: game
                .queue()
                .preview()
                .map(|t| PreviewView {
                    shape: t.shape.clone(),
                    color: t.color,
                })
                .collect(),
            score: game.score(),
            phase: game.phase(),
        }
    }
}
