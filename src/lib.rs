pub mod clock;
pub mod compute;
pub mod config;
pub mod display;
pub mod enemies;
pub mod entities;
pub mod error;
pub mod explosions;
pub mod input;
pub mod player;
pub mod projectiles;
pub mod render;
pub mod scenery;
pub mod score;
pub mod sound;
pub mod starfield;
