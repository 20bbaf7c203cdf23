//! Runtime configuration, loaded from an optional JSON file.
//!
//! Every field has a default, so an empty object (or no file at all) gives the
//! stock game.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::render::Rgba;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot encode config: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Starfield layering.  `speed`, `opacity` and `tail_length` are the values of
/// the nearest layer; farther layers fall off linearly toward a tenth of them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarOptions {
    pub color: Rgba,
    pub speed: f64,
    pub opacity: f64,
    pub tail_length: u32,
    pub space_depth: u32,
    /// Place every star at this x when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
}

impl Default for StarOptions {
    fn default() -> Self {
        Self {
            color: Rgba::rgb(255, 0, 255),
            speed: 9.0,
            opacity: 0.3,
            tail_length: 4,
            space_depth: 10,
            x: None,
        }
    }
}

/// Tile used by the foreground grid overlay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridPattern {
    #[default]
    Pix,
    Cell,
    Dot,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Target frame period of the host loop.
    pub frame_ms: u64,
    pub player_max_speed: f64,
    pub enemy_speed: f64,
    /// Master volume in [0, 1]; zero mutes.
    pub volume: f64,
    /// Middle button grants 1000 points.
    pub cheats: bool,
    pub grid_pattern: GridPattern,
    pub stars: StarOptions,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            frame_ms: 16,
            player_max_speed: 250.0,
            enemy_speed: 5.0,
            volume: 0.3,
            cheats: false,
            grid_pattern: GridPattern::default(),
            stars: StarOptions::default(),
        }
    }
}

impl GameConfig {
    pub fn from_json(path: &str, text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let shown = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: shown.clone(),
            source,
        })?;
        Self::from_json(&shown, &text)
    }

    /// Load `path` if given, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(ConfigError::Encode)
    }
}
