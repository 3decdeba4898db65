//! Tiny busy indicator driven by the event loop tick.

use std::time::Instant;

const FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];
const FRAME_MS: u128 = 100;

#[derive(Debug, Clone, Copy)]
pub struct Spinner {
    started: Instant,
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}

impl Spinner {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Current frame glyph.
    pub fn frame(&self) -> &'static str {
        let index = (self.started.elapsed().as_millis() / FRAME_MS) as usize % FRAMES.len();
        FRAMES[index]
    }

    /// "⣾ label" while busy, just the label otherwise.
    pub fn label(&self, busy: bool, label: &str) -> String {
        if busy {
            format!("{} {}", self.frame(), label)
        } else {
            label.to_string()
        }
    }
}
