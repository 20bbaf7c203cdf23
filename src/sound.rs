//! Terminal audio: the only sound a terminal can make is the bell, so clips
//! are registered with a cue that either rings it or stays silent.

use std::collections::HashMap;
use std::io::Write;

use tracing::{trace, warn};

use crate::render::Sound;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Bell,
    Silent,
}

pub struct TerminalSound<W: Write> {
    out: W,
    volume: f64,
    clips: HashMap<String, Cue>,
}

impl<W: Write> TerminalSound<W> {
    pub fn new(out: W, volume: f64) -> Self {
        Self {
            out,
            volume: volume.clamp(0.0, 1.0),
            clips: HashMap::new(),
        }
    }

    /// The clips the game plays, with `death` on the bell.
    pub fn with_stock_clips(out: W, volume: f64) -> Self {
        let mut sound = Self::new(out, volume);
        sound.load("lasershot", Cue::Silent);
        sound.load("explosion", Cue::Silent);
        sound.load("death", Cue::Bell);
        sound
    }

    pub fn load(&mut self, name: &str, cue: Cue) {
        self.clips.insert(name.to_string(), cue);
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.clips.contains_key(name)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Sound for TerminalSound<W> {
    fn play(&mut self, clip: &str) {
        let Some(&cue) = self.clips.get(clip) else {
            trace!(clip, "clip not loaded, skipped");
            return;
        };
        if self.volume <= 0.0 {
            return;
        }
        trace!(clip, "play");
        if cue == Cue::Bell {
            if let Err(err) = self.out.write_all(b"\x07").and_then(|_| self.out.flush()) {
                warn!(clip, %err, "bell failed");
            }
        }
    }
}
