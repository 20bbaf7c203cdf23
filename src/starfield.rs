//! Parallax star background.  Purely cosmetic: nothing collides with it.
//!
//! One star per 10-unit row.  Stars are dealt round-robin into depth layers
//! `0..=space_depth`; layer 0 is nearest, fastest, brightest and carries the
//! longest tail.

use rand::Rng;

use crate::config::StarOptions;
use crate::entities::{Arena, Rect, Star, GRID};
use crate::render::{round1, round2, Canvas, Fill};

#[derive(Clone, Debug)]
pub struct Starfield {
    units: Vec<Star>,
}

impl Starfield {
    pub fn new(arena: &Arena, options: &StarOptions, rng: &mut impl Rng) -> Self {
        let rows = (arena.height / GRID).round() as usize;
        let units = (0..rows)
            .map(|row| Star {
                x: (rng.gen::<f64>() * arena.width / GRID).round() * GRID,
                row,
                color: options.color,
                speed: 0.0,
                opacity: 0.0,
                tail_length: 0,
            })
            .collect();
        let mut field = Self { units };
        field.configure(options);
        field
    }

    pub fn units(&self) -> &[Star] {
        &self.units
    }

    /// Reassign every star's look and speed from `options`.
    pub fn configure(&mut self, options: &StarOptions) {
        let depth = options.space_depth.max(1);
        let mut layer = 0;
        for star in &mut self.units {
            if let Some(x) = options.x.filter(|x| *x != 0.0) {
                star.x = x;
            }
            let nearness = (depth - layer.min(depth)) as f64 / depth as f64;
            star.color = options.color;
            star.speed = round1(options.speed * nearness + options.speed / 10.0);
            star.opacity = round2(options.opacity * nearness + options.opacity / 10.0);
            star.tail_length = options.tail_length.saturating_sub(layer);

            layer = if layer == depth { 0 } else { layer + 1 };
        }
    }

    /// Scroll left; faster as the score grows.  A star at or past the left
    /// edge reappears somewhere up to 200 units beyond the right edge.
    pub fn advance(&mut self, score: u64, arena: &Arena, rng: &mut impl Rng) {
        let bonus = score as f64 / 200.0;
        for star in &mut self.units {
            if star.x <= 0.0 {
                star.x = arena.width + rng.gen::<f64>() * 200.0;
            } else {
                star.x -= star.speed + bonus;
            }
            star.x = star.x.trunc();
        }
    }

    pub fn render(&self, canvas: &mut dyn Canvas) {
        for star in &self.units {
            let y = star.row as f64 * GRID;
            let fill = Fill::Solid(star.color);
            canvas.fill_rect(Rect::new(star.x, y, GRID, GRID), &fill, star.opacity);

            let tail = star.tail_length as f64;
            for i in 1..=star.tail_length {
                let alpha = star.opacity / 2.0 * ((tail - i as f64) / tail);
                let rect = Rect::new(star.x + i as f64 * GRID, y, GRID, GRID);
                canvas.fill_rect(rect, &fill, alpha);
            }
        }
    }
}
