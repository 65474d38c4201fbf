//! Live projectile and asteroid sets.
//!
//! Both sets are keyed by `EntityId` and iterate in id order, which keeps
//! collision resolution deterministic for a given seed.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::config::{GameConfig, Playfield, ProjectileConfig};
use crate::entities::{AsteroidVariant, Entity, EntityId, EntityKind, Hitbox};
use crate::physics;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PoolError {
    #[error("spawn origin ({x}, {y}) is not a finite point")]
    NonFiniteOrigin { x: f32, y: f32 },
}

/// Entities removed by `EntityPool::remove_out_of_bounds`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OutOfBounds {
    pub projectiles: Vec<EntityId>,
    /// Asteroids that fell past the bottom; each one is owed a replacement.
    pub obstacles: Vec<EntityId>,
}

#[derive(Clone, Debug)]
pub struct EntityPool {
    pub projectiles: BTreeMap<EntityId, Entity>,
    pub obstacles: BTreeMap<EntityId, Entity>,
    next_id: u32,
    playfield: Playfield,
    projectile: ProjectileConfig,
    muzzle_offset: f32,
    hitbox_base: (f32, f32),
}

impl EntityPool {
    pub fn new(config: &GameConfig) -> Self {
        EntityPool {
            projectiles: BTreeMap::new(),
            obstacles: BTreeMap::new(),
            next_id: 1,
            playfield: config.playfield.clone(),
            projectile: config.projectile.clone(),
            muzzle_offset: config.player.muzzle_offset,
            hitbox_base: (config.asteroids.hitbox_width, config.asteroids.hitbox_height),
        }
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    // ── Creation ─────────────────────────────────────────────────────────────

    /// Fire a projectile from `origin` (the ship's centre).
    pub fn spawn_projectile(&mut self, origin: (f32, f32)) -> Result<EntityId, PoolError> {
        let (x, y) = origin;
        if !(x.is_finite() && y.is_finite()) {
            return Err(PoolError::NonFiniteOrigin { x, y });
        }
        let id = self.allocate_id();
        let (w, h) = (self.projectile.width, self.projectile.height);
        self.projectiles.insert(
            id,
            Entity {
                id,
                kind: EntityKind::Projectile,
                x,
                y: y - self.muzzle_offset,
                vx: 0.0,
                vy: -self.projectile.speed,
                angle: -90.0,
                angular_velocity: 0.0,
                scale: 1.0,
                width: w,
                height: h,
                hitbox: Hitbox::full(w, h),
            },
        );
        log::trace!("projectile {} spawned at ({x}, {})", id, y - self.muzzle_offset);
        Ok(id)
    }

    /// Drop an asteroid in at the top spawn line.  The hitbox is the base
    /// hitbox scaled alongside the sprite and centred inside it.
    pub fn spawn_obstacle(
        &mut self,
        x: f32,
        variant: AsteroidVariant,
        scale: f32,
        velocity_y: f32,
        angular_velocity: f32,
    ) -> EntityId {
        let id = self.allocate_id();
        let (sprite_w, sprite_h) = variant.sprite_size();
        let (width, height) = (sprite_w * scale, sprite_h * scale);
        let hitbox = Hitbox::centered(
            self.hitbox_base.0 * scale,
            self.hitbox_base.1 * scale,
            width,
            height,
        );
        self.obstacles.insert(
            id,
            Entity {
                id,
                kind: EntityKind::Asteroid(variant),
                x,
                y: self.playfield.obstacle_spawn_y,
                vx: 0.0,
                vy: velocity_y,
                angle: 0.0,
                angular_velocity,
                scale,
                width,
                height,
                hitbox,
            },
        );
        id
    }

    // ── Update ───────────────────────────────────────────────────────────────

    pub fn integrate(&mut self, dt: Duration) {
        for entity in self
            .projectiles
            .values_mut()
            .chain(self.obstacles.values_mut())
        {
            physics::integrate(entity, dt);
        }
    }

    pub fn remove_out_of_bounds(&mut self) -> OutOfBounds {
        let top = self.playfield.projectile_despawn_y;
        let bottom = self.playfield.obstacle_despawn_y;

        let projectiles: Vec<EntityId> = self
            .projectiles
            .values()
            .filter(|p| p.y < top)
            .map(|p| p.id)
            .collect();
        let obstacles: Vec<EntityId> = self
            .obstacles
            .values()
            .filter(|o| o.y > bottom)
            .map(|o| o.id)
            .collect();

        for id in &projectiles {
            self.projectiles.remove(id);
        }
        for id in &obstacles {
            self.obstacles.remove(id);
        }

        OutOfBounds {
            projectiles,
            obstacles,
        }
    }

    // ── Removal ──────────────────────────────────────────────────────────────

    /// Remove an entity from whichever set holds it.  Returns `false` when it
    /// was already gone.
    pub fn destroy(&mut self, id: EntityId) -> bool {
        self.projectiles.remove(&id).is_some() || self.obstacles.remove(&id).is_some()
    }

    pub fn clear(&mut self) {
        self.projectiles.clear();
        self.obstacles.clear();
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    pub fn contains(&self, id: EntityId) -> bool {
        self.projectiles.contains_key(&id) || self.obstacles.contains_key(&id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.projectiles.get(&id).or_else(|| self.obstacles.get(&id))
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        match self.projectiles.get_mut(&id) {
            Some(entity) => Some(entity),
            None => self.obstacles.get_mut(&id),
        }
    }

    pub fn len(&self) -> usize {
        self.projectiles.len() + self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty() && self.obstacles.is_empty()
    }
}
