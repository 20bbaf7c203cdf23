//! In-flight shots.  Hits were resolved when each shot was fired; here a shot
//! only ages, travels toward its resolved end and is drawn.

use crate::entities::{Bullet, Weapon, AGE_DECREMENT, BULLET_STEP};
use crate::render::{round1, Canvas, Fill, Rgba, Stroke};

#[derive(Clone, Debug, Default)]
pub struct ProjectileSet {
    units: Vec<Bullet>,
}

impl ProjectileSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, bullet: Bullet) {
        self.units.push(bullet);
    }

    pub fn units(&self) -> &[Bullet] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// One tick of ageing.  Lasers lose [`AGE_DECREMENT`] and are dropped at
    /// age ≤ 0; survivors move their head one step toward `end` without
    /// passing it.  Plasma and tesla shots are left as they are.
    pub fn advance(&mut self) {
        self.units.retain_mut(|b| match b.kind {
            Weapon::Laser => {
                b.age -= AGE_DECREMENT;
                if b.age <= 0.0 {
                    return false;
                }
                if b.x <= b.end - BULLET_STEP {
                    b.x += BULLET_STEP;
                }
                true
            }
            Weapon::Plasma | Weapon::Tesla => true,
        });
    }

    pub fn render(&self, canvas: &mut dyn Canvas) {
        for b in &self.units {
            if b.kind != Weapon::Laser {
                continue;
            }
            let v = (b.age * 71.0).trunc();
            let c = v.clamp(0.0, 255.0) as u8;
            let color = Rgba::rgba(255, c, c, round1(b.age));

            canvas.stroke_line(
                (b.x, b.y),
                (b.end, b.y),
                &Stroke { color, width: 1.0 + v / 6.0 },
            );

            let half = (v / 2.0) as u8;
            let (rect, fill) =
                Fill::glow(color, Rgba::rgba(255, half, half, 0.0), b.start, b.y, v * 2.0);
            canvas.fill_rect(rect, &fill, 1.0);
        }
    }
}
