//! Static layers drawn behind and in front of the action: the background
//! gradient, the tiled grid overlay and the vignette.

use crate::config::GridPattern;
use crate::entities::{Arena, Rect, GRID};
use crate::render::{Canvas, Fill, Rgba};

pub struct Background {
    rect: Rect,
    gradient: Fill,
}

impl Background {
    pub fn new(arena: &Arena) -> Self {
        let gradient = Fill::linear((arena.width / 2.0, 0.0), (arena.width / 2.0, arena.height))
            .stop(0.0, Rgba::rgb(0, 0, 10))
            .stop(0.5, Rgba::rgb(0, 0, 30))
            .stop(1.0, Rgba::rgb(0, 0, 10));
        Self { rect: arena.bounds(), gradient }
    }

    pub fn render(&self, canvas: &mut dyn Canvas) {
        canvas.fill_rect(self.rect, &self.gradient, 1.0);
    }
}

/// Tiled overlay, rasterised once into an off-screen alpha buffer of
/// 10×10 tiles and replayed every frame.
pub struct Grid {
    cols: usize,
    rows: usize,
    buffer: Vec<f64>,
    pattern: GridPattern,
}

impl Grid {
    pub fn new(arena: &Arena, pattern: GridPattern) -> Self {
        let cols = (arena.width / GRID).ceil() as usize;
        let rows = (arena.height / GRID).ceil() as usize;
        let mut grid = Self {
            cols,
            rows,
            buffer: vec![0.0; cols * rows],
            pattern,
        };
        grid.set(pattern);
        grid
    }

    pub fn pattern(&self) -> GridPattern {
        self.pattern
    }

    /// Shade of one tile for a pattern.
    fn tile_alpha(pattern: GridPattern, col: usize, row: usize) -> f64 {
        match pattern {
            GridPattern::Pix => {
                if (col + row) % 2 == 0 {
                    0.08
                } else {
                    0.0
                }
            }
            GridPattern::Cell => {
                if col % 5 == 0 || row % 5 == 0 {
                    0.2
                } else {
                    0.0
                }
            }
            GridPattern::Dot => {
                if col % 4 == 0 && row % 4 == 0 {
                    0.3
                } else {
                    0.0
                }
            }
        }
    }

    /// Clear the buffer and repaint it with `pattern`.
    pub fn set(&mut self, pattern: GridPattern) {
        self.pattern = pattern;
        for row in 0..self.rows {
            for col in 0..self.cols {
                self.buffer[row * self.cols + col] = Self::tile_alpha(pattern, col, row);
            }
        }
    }

    pub fn render(&self, canvas: &mut dyn Canvas) {
        let shade = Fill::Solid(Rgba::BLACK);
        for (i, &alpha) in self.buffer.iter().enumerate() {
            if alpha > 0.0 {
                let (col, row) = (i % self.cols, i / self.cols);
                let rect = Rect::new(col as f64 * GRID, row as f64 * GRID, GRID, GRID);
                canvas.fill_rect(rect, &shade, alpha);
            }
        }
    }
}

/// Darkens the edges: clear within 300 units of the centre, opaque black at
/// a distance of one arena width.
pub struct Vignette {
    rect: Rect,
    gradient: Fill,
}

impl Vignette {
    pub fn new(arena: &Arena) -> Self {
        let center = (arena.width / 2.0, arena.height / 2.0);
        // Narrow arenas would otherwise be painted solid black.
        let clear = if arena.width > 300.0 { 300.0 } else { arena.width / 2.0 };
        let gradient = Fill::radial(center, clear, arena.width, Rgba::TRANSPARENT, Rgba::BLACK);
        Self { rect: arena.bounds(), gradient }
    }

    pub fn render(&self, canvas: &mut dyn Canvas) {
        canvas.fill_rect(self.rect, &self.gradient, 1.0);
    }
}
