//! Terminal rendering layer.
//!
//! Renders game snapshots into a simple framebuffer that is flushed to the
//! terminal with crossterm. No widget library; the framebuffer gives precise
//! control over the cell aspect ratio (2 columns per grid cell).

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::{Cell, CellStyle, FrameBuffer};
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;
