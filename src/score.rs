//! The kill counter.

use tracing::debug;

use crate::render::{Canvas, Rgba, Sound};

const HUD_COLOR: Rgba = Rgba::rgb(255, 255, 255);

/// HUD opacity while playing.
const HUD_ALPHA: f64 = 0.5;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Score {
    count: u64,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn up(&mut self, amount: u64) {
        self.count = self.count.saturating_add(amount);
    }

    /// Reset to zero and play the `death` cue.
    pub fn clear(&mut self, sound: &mut dyn Sound) {
        debug!(lost = self.count, "score cleared");
        self.count = 0;
        sound.play("death");
    }

    /// Subtract `amount` if the counter covers it.  Returns whether it did;
    /// an insufficient balance leaves the counter untouched.
    pub fn spend(&mut self, amount: u64) -> bool {
        if self.count >= amount {
            self.count -= amount;
            true
        } else {
            debug!(have = self.count, want = amount, "not enough points");
            false
        }
    }

    /// Draw the counter in the top-right corner of the arena.
    pub fn render(&self, canvas: &mut dyn Canvas, arena_width: f64) {
        let text = self.count.to_string();
        let x = arena_width - (text.len() as f64 + 2.0) * 10.0;
        canvas.draw_text(x, 0.0, &text, HUD_COLOR.with_alpha(HUD_ALPHA));
    }
}
