//! Game-logic orchestration.
//!
//! [`GameState`] owns every entity collection and is the only path through
//! which they change: `update` advances one frame, `fire` handles a shot and
//! `render` reads the state back to a [`Canvas`].  [`SimulationLoop`] wraps a
//! state with the frame clock and the pause flag; the host calls its `tick`
//! once per frame, forever.  All randomness comes through an injected `Rng`
//! so tests can run with a seeded or stepped generator.

use rand::Rng;
use tracing::info;

use crate::clock::Clock;
use crate::config::GameConfig;
use crate::enemies::EnemySet;
use crate::entities::{Arena, Player, Pointer};
use crate::explosions::ExplosionSet;
use crate::projectiles::ProjectileSet;
use crate::render::{Canvas, Sound};
use crate::scenery::{Background, Grid, Vignette};
use crate::score::Score;
use crate::starfield::Starfield;

/// Points granted by the debug bonus.
pub const CHEAT_BONUS: u64 = 1000;

// ── State ────────────────────────────────────────────────────────────────────

pub struct GameState {
    pub arena: Arena,
    pub pointer: Pointer,
    pub player: Player,
    pub enemies: EnemySet,
    pub bullets: ProjectileSet,
    pub explosions: ExplosionSet,
    pub stars: Starfield,
    pub score: Score,
    pub background: Background,
    pub grid: Grid,
    pub vignette: Vignette,
    pub frame: u64,
}

/// Build the opening state for an arena.
pub fn init_state(config: &GameConfig, arena: Arena, rng: &mut impl Rng) -> GameState {
    let pointer = Pointer::initial(&arena);
    GameState {
        arena,
        pointer,
        player: Player::new(pointer, config.player_max_speed),
        enemies: EnemySet::new(config.enemy_speed),
        bullets: ProjectileSet::new(),
        explosions: ExplosionSet::new(),
        stars: Starfield::new(&arena, &config.stars, rng),
        score: Score::new(),
        background: Background::new(&arena),
        grid: Grid::new(&arena, config.grid_pattern),
        vignette: Vignette::new(&arena),
        frame: 0,
    }
}

impl GameState {
    // ── Input ────────────────────────────────────────────────────────────────

    pub fn move_pointer(&mut self, x: f64, y: f64) {
        self.pointer = Pointer { x, y };
    }

    /// Shift the pointer by a delta, kept inside the arena.
    pub fn nudge_pointer(&mut self, dx: f64, dy: f64) {
        self.pointer = Pointer {
            x: (self.pointer.x + dx).clamp(0.0, self.arena.width),
            y: (self.pointer.y + dy).clamp(0.0, self.arena.height),
        };
    }

    pub fn fire(&mut self, sound: &mut dyn Sound) {
        self.player.make_shot(
            &self.arena,
            &mut self.enemies,
            &mut self.bullets,
            &mut self.explosions,
            &mut self.score,
            sound,
        );
    }

    pub fn grant_bonus(&mut self) {
        self.score.up(CHEAT_BONUS);
    }

    /// Adopt a new surface size.  Entities keep their positions; the player
    /// is pulled back inside on its next update.
    pub fn resize(&mut self, arena: Arena) {
        self.arena = arena;
        self.background = Background::new(&arena);
        self.grid = Grid::new(&arena, self.grid.pattern());
        self.vignette = Vignette::new(&arena);
    }

    // ── Per-frame ────────────────────────────────────────────────────────────

    /// Advance one frame: enemies, then the player, then the spawn roll, then
    /// the cosmetic effects.
    pub fn update(&mut self, dt_ms: u64, rng: &mut impl Rng, sound: &mut dyn Sound) {
        self.frame += 1;

        self.enemies
            .update_all(&self.player, &mut self.score, &mut self.explosions, sound);
        self.player.update(self.pointer, &self.arena, rng);
        self.enemies.try_spawn(self.score.count(), &self.arena, rng);

        self.bullets.advance();
        self.explosions.advance(dt_ms);
        self.stars.advance(self.score.count(), &self.arena, rng);
    }

    /// Draw one frame, back to front.
    pub fn render(&self, canvas: &mut dyn Canvas) {
        self.background.render(canvas);
        self.stars.render(canvas);
        self.enemies.render(canvas);
        self.player.render(canvas);
        self.bullets.render(canvas);
        self.explosions.render(canvas);
        self.grid.render(canvas);
        self.vignette.render(canvas);
        self.explosions.render_flash(canvas);
        self.score.render(canvas, self.arena.width);
    }
}

// ── Loop ─────────────────────────────────────────────────────────────────────

pub struct SimulationLoop {
    pub state: GameState,
    clock: Clock,
    paused: bool,
}

impl SimulationLoop {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            clock: Clock::new(),
            paused: false,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        if !self.paused {
            info!(frame = self.state.frame, "paused");
            self.paused = true;
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            info!(frame = self.state.frame, "resumed");
            self.paused = false;
            self.clock.resync();
        }
    }

    /// One host frame.  Returns whether the state was advanced and drawn;
    /// while paused the delta is measured and thrown away.
    pub fn tick(
        &mut self,
        now_ms: u64,
        rng: &mut impl Rng,
        canvas: &mut dyn Canvas,
        sound: &mut dyn Sound,
    ) -> bool {
        let dt = self.clock.tick(now_ms);
        if self.paused {
            return false;
        }
        self.state.update(dt, rng, sound);
        self.state.render(canvas);
        true
    }
}
