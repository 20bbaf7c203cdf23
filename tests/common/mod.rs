#![allow(dead_code)]

use rand::rngs::mock::StepRng;

use space_shooter::compute::{init_state, GameState};
use space_shooter::config::GameConfig;
use space_shooter::entities::{Arena, Rect};
use space_shooter::render::{Canvas, Fill, Rgba, Sound, Stroke};

pub const ARENA_W: f64 = 800.0;
pub const ARENA_H: f64 = 600.0;

/// Every sample is 0.0: never spawns, stars respawn exactly at the right edge.
pub fn zero_rng() -> StepRng {
    StepRng::new(0, 0)
}

/// Every sample is just under 1.0: always spawns.
pub fn max_rng() -> StepRng {
    StepRng::new(u64::MAX, 0)
}

/// Player starts at (300, 300); muzzle at (400, 335).
pub fn make_state() -> GameState {
    init_state(&GameConfig::default(), Arena::new(ARENA_W, ARENA_H), &mut zero_rng())
}

#[derive(Default)]
pub struct RecordingSound {
    pub played: Vec<String>,
}

impl Sound for RecordingSound {
    fn play(&mut self, clip: &str) {
        self.played.push(clip.to_string());
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Fill(Rect, Fill, f64),
    Sprite(Rect, Rect, f64),
    Line((f64, f64), (f64, f64), Stroke),
    Text(String),
    Flash(f64),
}

#[derive(Default)]
pub struct RecordingCanvas {
    pub ops: Vec<Op>,
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, fill: &Fill, alpha: f64) {
        self.ops.push(Op::Fill(rect, fill.clone(), alpha));
    }

    fn draw_sprite(&mut self, src: Rect, dst: Rect, alpha: f64) {
        self.ops.push(Op::Sprite(src, dst, alpha));
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), stroke: &Stroke) {
        self.ops.push(Op::Line(from, to, stroke.clone()));
    }

    fn draw_text(&mut self, _x: f64, _y: f64, text: &str, _color: Rgba) {
        self.ops.push(Op::Text(text.to_string()));
    }

    fn flash(&mut self, brightness: f64) {
        self.ops.push(Op::Flash(brightness));
    }
}
