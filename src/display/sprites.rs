//! The built-in sprite sheet, drawn as character art.
//!
//! Layout (sheet pixels): ship at (0,0,10,7), enemy at (10,0,10,7), and three
//! 3×7 exhaust frames stacked at x = 20, y = 0, 7, 14.

use crate::render::Rgba;

const SHIP: [&str; 7] = [
    "##........",
    "####......",
    ".######...",
    "..####@@##",
    ".######...",
    "####......",
    "##........",
];

const ENEMY: [&str; 7] = [
    "....kk....",
    "..rrrrr...",
    ".rrWWrrrk.",
    "rrrrrrrrrk",
    ".rrWWrrrk.",
    "..rrrrr...",
    "....kk....",
];

const EXHAUST: [[&str; 7]; 3] = [
    ["...", "..o", ".oy", "oyy", ".oy", "..o", "..."],
    ["...", ".oo", "oyy", "yyy", "oyy", ".oo", "..."],
    ["...", "...", "..o", ".oy", "..o", "...", "..."],
];

const SHEET_WIDTH: usize = 23;
const SHEET_HEIGHT: usize = 21;

fn palette(c: char) -> Option<Rgba> {
    match c {
        '#' => Some(Rgba::rgb(200, 200, 220)),
        '@' => Some(Rgba::rgb(0, 200, 255)),
        'o' => Some(Rgba::rgb(255, 140, 0)),
        'y' => Some(Rgba::rgb(255, 230, 80)),
        'r' => Some(Rgba::rgb(220, 40, 60)),
        'k' => Some(Rgba::rgb(120, 0, 30)),
        'W' => Some(Rgba::WHITE),
        _ => None,
    }
}

/// Pixel grid addressed by sheet coordinates; `None` is transparent.
#[derive(Clone, Debug)]
pub struct SpriteSheet {
    width: usize,
    height: usize,
    pixels: Vec<Option<Rgba>>,
}

impl SpriteSheet {
    pub fn builtin() -> Self {
        let mut sheet = Self {
            width: SHEET_WIDTH,
            height: SHEET_HEIGHT,
            pixels: vec![None; SHEET_WIDTH * SHEET_HEIGHT],
        };
        sheet.blit(0, 0, &SHIP);
        sheet.blit(10, 0, &ENEMY);
        for (i, frame) in EXHAUST.iter().enumerate() {
            sheet.blit(20, i * 7, frame);
        }
        sheet
    }

    fn blit(&mut self, x: usize, y: usize, art: &[&str]) {
        for (dy, line) in art.iter().enumerate() {
            for (dx, c) in line.chars().enumerate() {
                let (px, py) = (x + dx, y + dy);
                if px < self.width && py < self.height {
                    self.pixels[py * self.width + px] = palette(c);
                }
            }
        }
    }

    /// Pixel at fractional sheet coordinates; out of range is transparent.
    pub fn pixel(&self, x: f64, y: f64) -> Option<Rgba> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let (px, py) = (x.floor() as usize, y.floor() as usize);
        if px >= self.width || py >= self.height {
            return None;
        }
        self.pixels[py * self.width + px]
    }
}
