//! All game entity types — pure data, almost no logic.
//!
//! World units are pixels of an 800×600 playfield (see `config::Playfield`);
//! +y points down, so "up" means decreasing y.

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Identity ──────────────────────────────────────────────────────────────────

/// Identifier shared by every pooled entity.  Allocated from a single counter
/// so projectiles and asteroids never collide on an id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ── Kinds ─────────────────────────────────────────────────────────────────────

/// The fixed set of asteroid textures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AsteroidVariant {
    Rock1,
    Rock2,
}

impl AsteroidVariant {
    pub const ALL: [AsteroidVariant; 2] = [AsteroidVariant::Rock1, AsteroidVariant::Rock2];

    /// Unscaled texture size in pixels (width, height).
    pub fn sprite_size(self) -> (f32, f32) {
        match self {
            AsteroidVariant::Rock1 => (256.0, 256.0),
            AsteroidVariant::Rock2 => (240.0, 224.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Ship,
    Projectile,
    Asteroid(AsteroidVariant),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Menu,
    Playing,
    GameOver,
    Win,
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Collision region, positioned relative to the sprite's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    pub width: f32,
    pub height: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Hitbox {
    /// A hitbox covering the whole sprite.
    pub fn full(width: f32, height: f32) -> Self {
        Hitbox {
            width,
            height,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    /// A `width × height` hitbox centred inside a `sprite_w × sprite_h` sprite.
    pub fn centered(width: f32, height: f32, sprite_w: f32, sprite_h: f32) -> Self {
        Hitbox {
            width,
            height,
            offset_x: (sprite_w - width) / 2.0,
            offset_y: (sprite_h - height) / 2.0,
        }
    }
}

/// Axis-aligned box in world coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Aabb {
    /// Strict overlap: boxes that only share an edge do not touch.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }
}

// ── Entities ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Centre of the sprite.
    pub x: f32,
    pub y: f32,
    /// Velocity in pixels per second.
    pub vx: f32,
    pub vy: f32,
    /// Rotation in degrees; purely visual, hitboxes never rotate.
    pub angle: f32,
    /// Degrees per second.
    pub angular_velocity: f32,
    pub scale: f32,
    /// Displayed (already scaled) sprite size.
    pub width: f32,
    pub height: f32,
    pub hitbox: Hitbox,
}

impl Entity {
    /// World-space bounds of the hitbox.
    pub fn bounds(&self) -> Aabb {
        let left = self.x - self.width / 2.0 + self.hitbox.offset_x;
        let top = self.y - self.height / 2.0 + self.hitbox.offset_y;
        Aabb {
            left,
            top,
            right: left + self.hitbox.width,
            bottom: top + self.hitbox.height,
        }
    }

    pub fn overlaps(&self, other: &Entity) -> bool {
        self.bounds().overlaps(&other.bounds())
    }
}

/// The player's ship.  Only `body.vx` is ever driven; `vy` stays zero.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub body: Entity,
    /// Simulated time of the last accepted shot.
    pub last_fired: Option<std::time::Duration>,
}
