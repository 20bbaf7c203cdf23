//! Live enemies: spawning, flight, the leak and ramming penalties, and kills.

use rand::Rng;
use tracing::{debug, trace};

use crate::entities::{fit, Arena, Enemy, Player, Rect, SHIP_HEIGHT, SHIP_WIDTH};
use crate::explosions::ExplosionSet;
use crate::render::{Canvas, Sound};
use crate::score::Score;

/// Sprite-sheet region of the enemy ship.
const ENEMY_SPRITE: Rect = Rect::new(10.0, 0.0, 10.0, 7.0);

/// Spawn chance in percent for the current score: 1 %, plus one point per
/// thousand points scored.
pub fn spawn_chance(score: u64) -> u64 {
    1 + score / 1000
}

/// Extra leftward speed per tick for the current score.
pub fn speed_bonus(score: u64) -> f64 {
    (score / 150) as f64
}

/// Insertion-ordered, so hit-scans always consider the oldest enemy first.
#[derive(Clone, Debug)]
pub struct EnemySet {
    units: Vec<Enemy>,
    next_id: u64,
    base_speed: f64,
}

impl EnemySet {
    pub fn new(base_speed: f64) -> Self {
        Self {
            units: Vec::new(),
            next_id: 0,
            base_speed: base_speed.max(0.0),
        }
    }

    pub fn units(&self) -> &[Enemy] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Add an enemy at `(x, y)` and return its id.
    pub fn spawn_at(&mut self, x: f64, y: f64) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.units.push(Enemy {
            id,
            x,
            y,
            width: SHIP_WIDTH,
            height: SHIP_HEIGHT,
            speed: self.base_speed,
        });
        trace!(id, x, y, "enemy spawned");
        id
    }

    /// Roll the per-tick spawn.  On success the enemy enters at the right edge
    /// on a lattice row at least 50 units from the top and bottom.
    pub fn try_spawn(&mut self, score: u64, arena: &Arena, rng: &mut impl Rng) -> Option<u64> {
        let sample = rng.gen::<f64>() * 100.0;
        if sample > 100.0 - spawn_chance(score) as f64 {
            let y = fit(rng.gen::<f64>() * (arena.height - 100.0) + 50.0);
            Some(self.spawn_at(arena.width, y))
        } else {
            None
        }
    }

    /// Move every enemy one tick.  An enemy already past the left edge is
    /// killed and the score reset; otherwise it advances and, if it now
    /// overlaps the player, is killed with the same penalty.
    pub fn update_all(
        &mut self,
        player: &Player,
        score: &mut Score,
        explosions: &mut ExplosionSet,
        sound: &mut dyn Sound,
    ) {
        let ship = player.hitbox();
        let mut i = 0;
        while i < self.units.len() {
            let enemy = &mut self.units[i];
            let crashed = if enemy.x <= -enemy.width {
                debug!(id = enemy.id, "enemy leaked past the left edge");
                true
            } else {
                enemy.x -= enemy.speed + speed_bonus(score.count());
                enemy.hitbox().overlaps(&ship)
            };

            if crashed {
                self.kill_at(i, explosions, sound);
                score.clear(sound);
            } else {
                i += 1;
            }
        }
    }

    /// Remove the enemy at `index`, play the explosion cue and leave an
    /// explosion at its centre.
    pub fn kill_at(
        &mut self,
        index: usize,
        explosions: &mut ExplosionSet,
        sound: &mut dyn Sound,
    ) -> Enemy {
        let enemy = self.units.remove(index);
        debug!(id = enemy.id, x = enemy.x, y = enemy.y, "enemy killed");
        sound.play("explosion");
        let (cx, cy) = enemy.center();
        explosions.add(cx, cy);
        enemy
    }

    /// Kill by id; a missing id is a no-op.
    pub fn kill(
        &mut self,
        id: u64,
        explosions: &mut ExplosionSet,
        sound: &mut dyn Sound,
    ) -> Option<Enemy> {
        let index = self.units.iter().position(|e| e.id == id)?;
        Some(self.kill_at(index, explosions, sound))
    }

    pub fn render(&self, canvas: &mut dyn Canvas) {
        for e in &self.units {
            let dst = Rect::new(e.x.trunc(), e.y.trunc(), SHIP_WIDTH, SHIP_HEIGHT);
            canvas.draw_sprite(ENEMY_SPRITE, dst, 1.0);
        }
    }
}
