//! Core types shared across the application.
//!
//! This crate contains pure data types and constants with no external
//! dependencies.

/// Default playfield dimensions (columns x rows).
pub const DEFAULT_GRID_WIDTH: i32 = 10;
pub const DEFAULT_GRID_HEIGHT: i32 = 20;

/// Default cell edge in pixels for graphical presentations.
pub const DEFAULT_CELL_SIZE: i32 = 35;

/// Frame tick length in milliseconds (approximately 60 Hz).
pub const TICK_MS: u32 = 16;

/// Gravity intervals (milliseconds per one-row descent).
pub const NORMAL_FALL_MS: u32 = 800;
pub const FAST_FALL_MS: u32 = 50;

/// Cooldowns between accepted movement attempts (milliseconds).
pub const MOVE_COOLDOWN_MS: u32 = 100;
pub const ROTATE_COOLDOWN_MS: u32 = 200;

/// Number of upcoming pieces visible in the look-ahead queue.
pub const PREVIEW_COUNT: usize = 3;

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Playfield cell (None = empty, Some = locked with the piece's color).
pub type Cell = Option<Rgb>;

/// Session phase. Phase transitions are the only way the per-frame behavior
/// changes; `Start` is entered once and never re-entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Start,
    Playing,
    Paused,
    GameOver,
}

/// Discrete input commands consumed by the engine.
///
/// Soft drop is held state rather than a discrete command; it is passed to
/// `Game::tick` every frame. Quit never reaches the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    RotateCw,
    PauseToggle,
    Confirm,
    Restart,
}

/// Construction-time board geometry.
///
/// `cell_size` is the square cell edge in pixels for graphical frontends;
/// terminal views pick their own character scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}
