//! All game entity types: fixed-shape data records, plus the geometry they share.
//!
//! Behaviour lives in the per-collection modules (`enemies`, `projectiles`, ...);
//! this module only defines shapes, sizes and the grid-snap helper.

// ── Tunables shared by several modules ───────────────────────────────────────

/// Side of one lattice cell in arena units.
pub const GRID: f64 = 10.0;

pub const SHIP_WIDTH: f64 = 100.0;
pub const SHIP_HEIGHT: f64 = 70.0;

/// Score awarded for each enemy killed by a shot.
pub const KILL_REWARD: u64 = 10;

/// Per-tick decay of bullet and explosion age.
pub const AGE_DECREMENT: f64 = 0.02;

/// Age a freshly fired bullet starts with.
pub const BULLET_AGE: f64 = 0.5;

/// Horizontal distance a laser head travels per tick.
pub const BULLET_STEP: f64 = 50.0;

/// Leftward drift of an explosion per tick.
pub const EXPLOSION_DRIFT: f64 = 8.0;

/// Smallest arena the game will lay out (the default canvas size).
pub const MIN_ARENA_WIDTH: f64 = 300.0;
pub const MIN_ARENA_HEIGHT: f64 = 150.0;

/// Round a coordinate toward zero onto the 10-unit lattice.
pub fn fit(n: f64) -> f64 {
    (n / GRID).trunc() * GRID
}

// ── Geometry ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Strict axis-aligned overlap; touching edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

/// The playable rectangle, sized to the host surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
}

impl Arena {
    /// Clamp to the minimum layout size the way the canvas default does.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(MIN_ARENA_WIDTH),
            height: height.max(MIN_ARENA_HEIGHT),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// Last known pointer position in arena units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
}

impl Pointer {
    /// Where the pointer is assumed to be before the first move event.
    pub fn initial(arena: &Arena) -> Self {
        Self {
            x: 300.0,
            y: fit(arena.height / 2.0),
        }
    }
}

// ── Weapons ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Weapon {
    Laser,
    /// Reserved: projectiles of this kind are inert.
    Plasma,
    /// Reserved: projectiles of this kind are inert.
    Tesla,
}

impl Weapon {
    pub fn name(&self) -> &'static str {
        match self {
            Weapon::Laser => "laser",
            Weapon::Plasma => "plasma",
            Weapon::Tesla => "tesla",
        }
    }

    /// Clip played when this weapon fires, e.g. `lasershot`.
    pub fn shot_clip(&self) -> String {
        format!("{}shot", self.name())
    }
}

// ── Entities ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub weapon: Weapon,
    /// Row offset into the exhaust strip of the sprite sheet: 0, 7 or 14.
    pub flame_frame: u32,
    /// Flicker alpha of the exhaust for the current frame.
    pub exhaust_alpha: f64,
    /// Per-axis, per-frame movement cap.
    pub max_speed: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub speed: f64,
}

impl Enemy {
    pub fn hitbox(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// A hit-scan shot. `start` is the muzzle, `x` the travelling head drawn
/// toward `end`, which was resolved when the shot was fired.
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f64,
    pub y: f64,
    pub start: f64,
    pub end: f64,
    pub age: f64,
    pub kind: Weapon,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    pub x: f64,
    pub y: f64,
    pub age: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub x: f64,
    /// Row index; the star is drawn at `row * 10`.
    pub row: usize,
    pub color: crate::render::Rgba,
    pub speed: f64,
    pub opacity: f64,
    pub tail_length: u32,
}
