//! Rendering layer: all terminal I/O lives here.
//!
//! [`TerminalCanvas`] implements [`Canvas`] over a buffer of character cells.
//! One cell covers `CELL_W × CELL_H` arena units; drawing calls composite
//! into the buffer with per-cell coverage, and `present` translates the
//! finished buffer into crossterm commands.

mod sprites;

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};
use tracing::trace;

pub use sprites::SpriteSheet;

use crate::entities::{Arena, Rect};
use crate::render::{Canvas, Fill, Rgba, Stroke};

// ── Cell geometry ────────────────────────────────────────────────────────────

/// Arena units per terminal column.
pub const CELL_W: f64 = 10.0;
/// Arena units per terminal row (cells are roughly twice as tall as wide).
pub const CELL_H: f64 = 20.0;

/// Dimming applied while the surface is blurred.
const BLUR_DIM: f64 = 0.45;

/// Arena covered by a terminal of `cols × rows` cells.
pub fn arena_for(cols: u16, rows: u16) -> Arena {
    Arena::new(cols as f64 * CELL_W, rows as f64 * CELL_H)
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Glyph {
    ch: char,
    color: Rgba,
}

// ── Canvas ───────────────────────────────────────────────────────────────────

pub struct TerminalCanvas {
    cols: usize,
    rows: usize,
    cells: Vec<Rgba>,
    glyphs: Vec<Option<Glyph>>,
    sheet: Option<SpriteSheet>,
    brightness: f64,
    blurred: bool,
}

impl TerminalCanvas {
    pub fn new(cols: u16, rows: u16, sheet: Option<SpriteSheet>) -> Self {
        let (cols, rows) = (cols as usize, rows as usize);
        Self {
            cols,
            rows,
            cells: vec![Rgba::BLACK; cols * rows],
            glyphs: vec![None; cols * rows],
            sheet,
            brightness: 1.0,
            blurred: false,
        }
    }

    pub fn size(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    pub fn set_sheet(&mut self, sheet: SpriteSheet) {
        self.sheet = Some(sheet);
    }

    pub fn set_blurred(&mut self, blurred: bool) {
        self.blurred = blurred;
    }

    /// Reset the buffer before drawing a new frame.
    pub fn begin_frame(&mut self) {
        self.cells.fill(Rgba::BLACK);
        self.clear_text();
        self.brightness = 1.0;
    }

    pub fn clear_text(&mut self) {
        self.glyphs.fill(None);
    }

    /// Background colour of a cell as it stands in the buffer.
    pub fn cell(&self, col: usize, row: usize) -> Option<Rgba> {
        (col < self.cols && row < self.rows).then(|| self.cells[row * self.cols + col])
    }

    /// Character drawn in a cell, if any.
    pub fn glyph(&self, col: usize, row: usize) -> Option<char> {
        if col < self.cols && row < self.rows {
            self.glyphs[row * self.cols + col].map(|g| g.ch)
        } else {
            None
        }
    }

    /// Cells touched by `rect`, with the covered fraction of each.
    fn covered(&self, rect: Rect) -> Vec<(usize, usize, f64)> {
        let mut out = Vec::new();
        if rect.w <= 0.0 || rect.h <= 0.0 {
            return out;
        }
        let c0 = (rect.x / CELL_W).floor().max(0.0) as usize;
        let r0 = (rect.y / CELL_H).floor().max(0.0) as usize;
        let c1 = (((rect.x + rect.w) / CELL_W).ceil().max(0.0) as usize).min(self.cols);
        let r1 = (((rect.y + rect.h) / CELL_H).ceil().max(0.0) as usize).min(self.rows);
        for row in r0..r1 {
            let (cy0, cy1) = (row as f64 * CELL_H, (row + 1) as f64 * CELL_H);
            let oy = (rect.y + rect.h).min(cy1) - rect.y.max(cy0);
            if oy <= 0.0 {
                continue;
            }
            for col in c0..c1 {
                let (cx0, cx1) = (col as f64 * CELL_W, (col + 1) as f64 * CELL_W);
                let ox = (rect.x + rect.w).min(cx1) - rect.x.max(cx0);
                if ox > 0.0 {
                    out.push((col, row, (ox * oy) / (CELL_W * CELL_H)));
                }
            }
        }
        out
    }

    fn blend(&mut self, col: usize, row: usize, color: Rgba, alpha: f64) {
        let i = row * self.cols + col;
        self.cells[i] = color.over(self.cells[i], alpha);
    }

    fn cell_center(col: usize, row: usize) -> (f64, f64) {
        ((col as f64 + 0.5) * CELL_W, (row as f64 + 0.5) * CELL_H)
    }

    /// Colour a cell ends up with on screen after flash and blur.
    fn shown(&self, col: usize, row: usize) -> Rgba {
        let base = self.cells[row * self.cols + col];
        let color = if self.blurred {
            let left = self.cells[row * self.cols + col.saturating_sub(1)];
            let right = self.cells[row * self.cols + (col + 1).min(self.cols - 1)];
            let avg = |a: u8, b: u8, c: u8| ((a as u16 + b as u16 * 2 + c as u16) / 4) as u8;
            Rgba::rgb(
                avg(left.r, base.r, right.r),
                avg(left.g, base.g, right.g),
                avg(left.b, base.b, right.b),
            )
            .brighten(BLUR_DIM)
        } else {
            base
        };
        color.brighten(self.brightness)
    }

    /// Write the buffer to the terminal, only switching colours when they change.
    pub fn present<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let mut last_bg: Option<Rgba> = None;
        let mut last_fg: Option<Rgba> = None;

        for row in 0..self.rows {
            out.queue(cursor::MoveTo(0, row as u16))?;
            for col in 0..self.cols {
                let bg = self.shown(col, row);
                if last_bg != Some(bg) {
                    out.queue(style::SetBackgroundColor(to_color(bg)))?;
                    last_bg = Some(bg);
                }
                match self.glyphs[row * self.cols + col] {
                    Some(glyph) => {
                        let fg = glyph.color.over(bg, 1.0);
                        if last_fg != Some(fg) {
                            out.queue(style::SetForegroundColor(to_color(fg)))?;
                            last_fg = Some(fg);
                        }
                        out.queue(Print(glyph.ch))?;
                    }
                    None => {
                        out.queue(Print(' '))?;
                    }
                }
            }
        }

        out.queue(style::ResetColor)?;
        out.flush()?;
        Ok(())
    }
}

fn to_color(c: Rgba) -> Color {
    Color::Rgb { r: c.r, g: c.g, b: c.b }
}

impl Canvas for TerminalCanvas {
    fn fill_rect(&mut self, rect: Rect, fill: &Fill, alpha: f64) {
        for (col, row, coverage) in self.covered(rect) {
            let (cx, cy) = Self::cell_center(col, row);
            let color = fill.sample(
                cx.clamp(rect.x, rect.x + rect.w),
                cy.clamp(rect.y, rect.y + rect.h),
            );
            self.blend(col, row, color, alpha * coverage);
        }
    }

    fn draw_sprite(&mut self, src: Rect, dst: Rect, alpha: f64) {
        let Some(sheet) = self.sheet.take() else {
            trace!("sprite sheet not ready, draw skipped");
            return;
        };
        for (col, row, _) in self.covered(dst) {
            let (cx, cy) = Self::cell_center(col, row);
            if cx < dst.x || cx >= dst.x + dst.w || cy < dst.y || cy >= dst.y + dst.h {
                continue;
            }
            let sx = src.x + (cx - dst.x) / dst.w * src.w;
            let sy = src.y + (cy - dst.y) / dst.h * src.h;
            if let Some(color) = sheet.pixel(sx, sy) {
                self.blend(col, row, color, alpha);
            }
        }
        self.sheet = Some(sheet);
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), stroke: &Stroke) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let len = (dx * dx + dy * dy).sqrt();
        let steps = (len / (CELL_W / 2.0)).ceil().max(1.0) as usize;
        let half = (stroke.width / 2.0).max(0.5);

        let mut touched = vec![false; self.cells.len()];
        for s in 0..=steps {
            let t = s as f64 / steps as f64;
            let (x, y) = (from.0 + dx * t, from.1 + dy * t);
            let pen = Rect::new(x - half, y - half, half * 2.0, half * 2.0);
            for (col, row, _) in self.covered(pen) {
                touched[row * self.cols + col] = true;
            }
        }
        for (i, hit) in touched.into_iter().enumerate() {
            if hit {
                self.blend(i % self.cols, i / self.cols, stroke.color, 1.0);
            }
        }
    }

    fn draw_text(&mut self, x: f64, y: f64, text: &str, color: Rgba) {
        if x < 0.0 || y < 0.0 {
            return;
        }
        let row = (y / CELL_H) as usize;
        let col0 = (x / CELL_W) as usize;
        if row >= self.rows {
            return;
        }
        for (i, ch) in text.chars().enumerate() {
            let col = col0 + i;
            if col >= self.cols {
                break;
            }
            self.glyphs[row * self.cols + col] = Some(Glyph { ch, color });
        }
    }

    fn flash(&mut self, brightness: f64) {
        self.brightness = brightness;
    }
}
