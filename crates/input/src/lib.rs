//! Terminal input: key mapping and held-key tracking.
//!
//! Independent of any UI framework. Maps `crossterm` key events into
//! [`gridfall_types::Command`] and tracks held keys for terminals that do
//! not emit key-release events.

pub mod held;
pub mod map;

pub use held::HeldKeys;
pub use map::{handle_key_event, should_quit};
