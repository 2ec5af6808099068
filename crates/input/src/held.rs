//! Held-key tracking for terminal environments.
//!
//! The engine rate-limits movement internally, so holding a key simply means
//! re-issuing its command every frame. Terminals that never emit key-release
//! events get a timeout-based auto-release instead.

use std::time::Instant;

use crossterm::event::KeyCode;

// In terminals without key-release events, a short timeout prevents a single
// tap from turning into a sustained "held" state.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Which game keys are currently held down.
#[derive(Debug, Clone)]
pub struct HeldKeys {
    left: bool,
    right: bool,
    rotate: bool,
    soft_drop: bool,
    last_key_time: Instant,
    key_release_timeout_ms: u32,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self {
            left: false,
            right: false,
            rotate: false,
            soft_drop: false,
            last_key_time: Instant::now(),
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    /// Record a press (or repeat) event. Non-game keys are ignored and do
    /// not extend the auto-release window.
    pub fn press(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left => self.left = true,
            KeyCode::Right => self.right = true,
            KeyCode::Up => self.rotate = true,
            KeyCode::Down => self.soft_drop = true,
            _ => return,
        }
        self.last_key_time = Instant::now();
    }

    /// Record a release event, on terminals that send them.
    pub fn release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left => self.left = false,
            KeyCode::Right => self.right = false,
            KeyCode::Up => self.rotate = false,
            KeyCode::Down => self.soft_drop = false,
            _ => {}
        }
    }

    /// Per-frame maintenance: auto-release everything once no game key has
    /// been seen for the timeout.
    pub fn poll(&mut self) {
        let since_last = self.last_key_time.elapsed().as_millis() as u32;
        if since_last > self.key_release_timeout_ms {
            self.left = false;
            self.right = false;
            self.rotate = false;
            self.soft_drop = false;
        }
    }

    pub fn left(&self) -> bool {
        self.left
    }

    pub fn right(&self) -> bool {
        self.right
    }

    pub fn rotate(&self) -> bool {
        self.rotate
    }

    pub fn soft_drop(&self) -> bool {
        self.soft_drop
    }

    pub fn reset(&mut self) {
        self.left = false;
        self.right = false;
        self.rotate = false;
        self.soft_drop = false;
        self.last_key_time = Instant::now();
    }
}

impl Default for HeldKeys {
    fn default() -> Self {
        Self::new()
    }
}
