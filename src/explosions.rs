//! Transient kill effects: drifting radial glows and the whole-screen flash.

use crate::entities::{Explosion, AGE_DECREMENT, EXPLOSION_DRIFT};
use crate::render::{round1, Canvas, Fill, Rgba};

/// Length of the brightness pulse that follows a kill.
pub const FLASH_MS: u64 = 500;

/// Peak brightness of the pulse.
const FLASH_PEAK: f64 = 1.5;

#[derive(Clone, Debug, Default)]
pub struct ExplosionSet {
    units: Vec<Explosion>,
    /// Leading units that have been on screen at least once; later ones are
    /// still waiting for their first frame at full size.
    shown: usize,
    flash_left_ms: u64,
}

impl ExplosionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn units(&self) -> &[Explosion] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Start an explosion centred on `(x, y)` and restart the flash.
    pub fn add(&mut self, x: f64, y: f64) {
        self.units.push(Explosion { x, y, age: 1.0 });
        self.flash_left_ms = FLASH_MS;
    }

    /// Current flash brightness; 1.0 once the pulse is over.
    pub fn flash_brightness(&self) -> f64 {
        let t = self.flash_left_ms as f64 / FLASH_MS as f64;
        1.0 + (FLASH_PEAK - 1.0) * t
    }

    /// Drift and fade every explosion except those added since the last
    /// call, which first get drawn where they started.
    pub fn advance(&mut self, dt_ms: u64) {
        self.flash_left_ms = self.flash_left_ms.saturating_sub(dt_ms);
        for e in &mut self.units[..self.shown] {
            e.x -= EXPLOSION_DRIFT;
            e.age -= AGE_DECREMENT;
        }
        self.units.retain(|e| e.age > 0.0);
        self.shown = self.units.len();
    }

    pub fn render(&self, canvas: &mut dyn Canvas) {
        for e in &self.units {
            let size = (e.age * 151.0).trunc();
            let (rect, fill) = Fill::glow(
                Rgba::rgba(100, 150, 255, round1(e.age)),
                Rgba::rgba(255, 0, 0, 0.0),
                e.x,
                e.y,
                size,
            );
            canvas.fill_rect(rect, &fill, 1.0);
        }
    }

    /// Apply the flash to the finished frame.
    pub fn render_flash(&self, canvas: &mut dyn Canvas) {
        if self.flash_left_ms > 0 {
            canvas.flash(self.flash_brightness());
        }
    }
}
