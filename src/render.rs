//! Collaborator capabilities the simulation draws and plays through.
//!
//! The core never owns pixels or audio devices: it describes what to draw with
//! [`Canvas`] calls and what to hear with [`Sound`] calls.  The terminal host
//! implements both in `display` and `sound`.

use serde::{Deserialize, Serialize};

use crate::entities::Rect;

// ── Colour ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity in [0, 1].
    pub a: f64,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const TRANSPARENT: Rgba = Rgba::rgba(0, 0, 0, 0.0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        let nibble = |c: char| c.to_digit(16).map(|d| (d * 17) as u8);
        let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            3 | 4 => {
                let mut it = hex.chars().map(nibble);
                let r = it.next()??;
                let g = it.next()??;
                let b = it.next()??;
                let a = it.next().unwrap_or(Some(255))?;
                Some(Rgba::rgba(r, g, b, a as f64 / 255.0))
            }
            6 | 8 => {
                let a = if hex.len() == 8 { byte(6)? } else { 255 };
                Some(Rgba::rgba(byte(0)?, byte(2)?, byte(4)?, a as f64 / 255.0))
            }
            _ => None,
        }
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Linear interpolation between two colours, alpha included.
    pub fn lerp(self, other: Rgba, t: f64) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgba {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Composite `self`, scaled by `alpha`, over an opaque backdrop.
    pub fn over(self, backdrop: Rgba, alpha: f64) -> Rgba {
        let a = (self.a * alpha).clamp(0.0, 1.0);
        let mix = |s: u8, d: u8| (s as f64 * a + d as f64 * (1.0 - a)).round() as u8;
        Rgba::rgb(
            mix(self.r, backdrop.r),
            mix(self.g, backdrop.g),
            mix(self.b, backdrop.b),
        )
    }

    /// Multiply the channels, saturating at white.
    pub fn brighten(self, factor: f64) -> Rgba {
        let scale = |c: u8| (c as f64 * factor).round().clamp(0.0, 255.0) as u8;
        Rgba { r: scale(self.r), g: scale(self.g), b: scale(self.b), a: self.a }
    }
}

impl TryFrom<String> for Rgba {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Rgba::parse_hex(&s).ok_or_else(|| format!("invalid colour `{s}`"))
    }
}

impl From<Rgba> for String {
    fn from(c: Rgba) -> Self {
        if c.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
        } else {
            let a = (c.a.clamp(0.0, 1.0) * 255.0).round() as u8;
            format!("#{:02x}{:02x}{:02x}{:02x}", c.r, c.g, c.b, a)
        }
    }
}

/// Round to one decimal the way alpha values are quantised for display.
pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

// ── Paint ────────────────────────────────────────────────────────────────────

/// How a rectangle is filled.
#[derive(Clone, Debug, PartialEq)]
pub enum Fill {
    Solid(Rgba),
    /// Gradient along the line `from → to`; stops are `(offset, colour)`.
    Linear {
        from: (f64, f64),
        to: (f64, f64),
        stops: Vec<(f64, Rgba)>,
    },
    /// Gradient by distance from `center`, from `inner` at `r0` to `outer` at `r1`.
    /// `r0` may be larger than `r1`, which reverses the direction.
    Radial {
        center: (f64, f64),
        r0: f64,
        r1: f64,
        inner: Rgba,
        outer: Rgba,
    },
}

impl Fill {
    pub fn linear(from: (f64, f64), to: (f64, f64)) -> Self {
        Fill::Linear { from, to, stops: Vec::new() }
    }

    /// Add a colour stop to a linear gradient; other fills are returned unchanged.
    pub fn stop(mut self, offset: f64, color: Rgba) -> Self {
        if let Fill::Linear { stops, .. } = &mut self {
            stops.push((offset.clamp(0.0, 1.0), color));
            stops.sort_by(|a, b| a.0.total_cmp(&b.0));
        }
        self
    }

    pub fn radial(center: (f64, f64), r0: f64, r1: f64, inner: Rgba, outer: Rgba) -> Self {
        Fill::Radial { center, r0, r1, inner, outer }
    }

    /// Soft round glow of diameter `size`: `from` at the centre fading to `to`.
    pub fn glow(from: Rgba, to: Rgba, x: f64, y: f64, size: f64) -> (Rect, Fill) {
        let rect = Rect::new(x - size / 2.0, y - size / 2.0, size, size);
        (rect, Fill::radial((x, y), 0.0, size / 2.0, from, to))
    }

    /// Colour of the paint at an arena point.
    pub fn sample(&self, x: f64, y: f64) -> Rgba {
        match self {
            Fill::Solid(c) => *c,
            Fill::Linear { from, to, stops } => {
                let (dx, dy) = (to.0 - from.0, to.1 - from.1);
                let len2 = dx * dx + dy * dy;
                let t = if len2 == 0.0 {
                    0.0
                } else {
                    (((x - from.0) * dx + (y - from.1) * dy) / len2).clamp(0.0, 1.0)
                };
                sample_stops(stops, t)
            }
            Fill::Radial { center, r0, r1, inner, outer } => {
                let d = ((x - center.0).powi(2) + (y - center.1).powi(2)).sqrt();
                if r1 == r0 {
                    return *outer;
                }
                let t = ((d - r0) / (r1 - r0)).clamp(0.0, 1.0);
                inner.lerp(*outer, t)
            }
        }
    }
}

fn sample_stops(stops: &[(f64, Rgba)], t: f64) -> Rgba {
    let Some(first) = stops.first() else {
        return Rgba::TRANSPARENT;
    };
    if t <= first.0 {
        return first.1;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.0 {
            let span = b.0 - a.0;
            let local = if span == 0.0 { 1.0 } else { (t - a.0) / span };
            return a.1.lerp(b.1, local);
        }
    }
    stops[stops.len() - 1].1
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f64,
}

// ── Capabilities ─────────────────────────────────────────────────────────────

/// Drawing surface.  Coordinates are arena units; implementations decide how
/// they map onto real pixels or cells.
pub trait Canvas {
    fn fill_rect(&mut self, rect: Rect, fill: &Fill, alpha: f64);

    /// Copy the sprite-sheet region `src` (sheet pixels) scaled into `dst`.
    /// Implementations skip the call while the sheet is not loaded.
    fn draw_sprite(&mut self, src: Rect, dst: Rect, alpha: f64);

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), stroke: &Stroke);

    fn draw_text(&mut self, x: f64, y: f64, text: &str, color: Rgba);

    /// Whole-surface brightness for this frame; 1.0 is neutral.
    fn flash(&mut self, brightness: f64);
}

/// Audio output, addressed by conventional clip name (`lasershot`, `explosion`,
/// `death`).  Unknown or unready clips are skipped by the implementation.
pub trait Sound {
    fn play(&mut self, clip: &str);
}
