//! Core game logic: grid, pieces, random generation, and the session state
//! machine. Pure and synchronous, with no I/O or timing sources; callers
//! feed elapsed time into `Game::tick` and read back snapshots.

pub mod catalog;
pub mod game;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod snapshot;

pub use catalog::{PieceCatalog, PieceTemplate, Shape, MAX_SHAPE_CELLS, PALETTE, SHAPE_COUNT};
pub use game::{line_clear_score, Game, GameEvent};
pub use grid::Grid;
pub use piece::{Piece, PieceQueue};
pub use rng::SimpleRng;
pub use snapshot::{ActiveView, GameSnapshot, PreviewView};
