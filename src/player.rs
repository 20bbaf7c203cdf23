//! The player ship: pointer following, edge clamping and firing.

use rand::Rng;
use tracing::debug;

use crate::enemies::EnemySet;
use crate::entities::{
    fit, Arena, Bullet, Player, Pointer, Rect, Weapon, BULLET_AGE, GRID, KILL_REWARD,
    SHIP_HEIGHT, SHIP_WIDTH,
};
use crate::explosions::ExplosionSet;
use crate::projectiles::ProjectileSet;
use crate::render::{Canvas, Sound};
use crate::score::Score;

const SHIP_SPRITE: Rect = Rect::new(0.0, 0.0, 10.0, 7.0);

/// Exhaust animation: a 3×7 strip per frame, three frames stacked vertically.
const EXHAUST_STEP: u32 = 7;
const EXHAUST_FRAMES: u32 = 3;
const EXHAUST_WIDTH: f64 = 30.0;

impl Player {
    pub fn new(pointer: Pointer, max_speed: f64) -> Self {
        Self {
            x: pointer.x,
            y: pointer.y,
            width: SHIP_WIDTH,
            height: SHIP_HEIGHT,
            weapon: Weapon::Laser,
            flame_frame: 0,
            exhaust_alpha: 0.2,
            max_speed: max_speed.max(0.0),
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Muzzle position: front edge, vertical centre.
    pub fn muzzle(&self) -> (f64, f64) {
        (self.x + self.width, self.y + self.height / 2.0)
    }

    /// Step toward the pointer, at most `max_speed` per axis per frame, snap
    /// to the lattice, then keep the ship inside the arena.
    pub fn update(&mut self, pointer: Pointer, arena: &Arena, rng: &mut impl Rng) {
        let dx = pointer.x - self.x;
        if dx != 0.0 {
            self.x = fit(self.x + dx.clamp(-self.max_speed, self.max_speed));
        }
        let dy = pointer.y - self.y;
        if dy != 0.0 {
            self.y = fit(self.y + dy.clamp(-self.max_speed, self.max_speed));
        }

        if self.x < 0.0 {
            self.x = 0.0;
        } else if self.x + self.width > arena.width {
            // One lattice cell of slack on the right edge only.
            self.x = fit(arena.width) - self.width + GRID;
        }

        if self.y < 0.0 {
            self.y = 0.0;
        } else if self.y + self.height > arena.height {
            self.y = fit(arena.height) - self.height;
        }

        self.flame_frame = (self.flame_frame + EXHAUST_STEP) % (EXHAUST_STEP * EXHAUST_FRAMES);
        self.exhaust_alpha = rng.gen::<f64>() * 0.5 + 0.2;
    }

    /// Fire one shot.  The target is resolved immediately: the first enemy in
    /// set order whose vertical span contains the muzzle row and which lies
    /// ahead of the muzzle dies now, and the shot's `end` is clipped to it.
    pub fn make_shot(
        &self,
        arena: &Arena,
        enemies: &mut EnemySet,
        bullets: &mut ProjectileSet,
        explosions: &mut ExplosionSet,
        score: &mut Score,
        sound: &mut dyn Sound,
    ) {
        let (mx, my) = self.muzzle();
        let mut bullet = Bullet {
            x: mx,
            y: my,
            start: mx,
            end: arena.width,
            age: BULLET_AGE,
            kind: self.weapon,
        };

        let target = enemies
            .units()
            .iter()
            .find(|e| my >= e.y && my <= e.y + e.height && mx < e.x)
            .map(|e| (e.id, e.x));

        if let Some((id, x)) = target {
            bullet.end = x;
            enemies.kill(id, explosions, sound);
            score.up(KILL_REWARD);
            debug!(id, score = score.count(), "shot hit");
        }

        bullets.add(bullet);
        sound.play(&self.weapon.shot_clip());
    }

    pub fn render(&self, canvas: &mut dyn Canvas) {
        let exhaust = Rect::new(20.0, self.flame_frame as f64, 3.0, 7.0);
        canvas.draw_sprite(
            exhaust,
            Rect::new(self.x - EXHAUST_WIDTH, self.y, EXHAUST_WIDTH, self.height),
            self.exhaust_alpha,
        );
        canvas.draw_sprite(SHIP_SPRITE, self.hitbox(), 1.0);
    }
}
