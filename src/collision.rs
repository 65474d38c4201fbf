//! Overlap detection between the ship, projectiles and asteroids.
//!
//! Detection and removal happen here; score and state changes are applied by
//! the caller from the returned hits.

use crate::entities::{EntityId, Player};
use crate::pool::EntityPool;

/// A projectile that consumed an asteroid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit {
    pub projectile: EntityId,
    pub asteroid: EntityId,
}

/// Resolve every projectile against every asteroid, destroying both sides of
/// each hit.
///
/// A projectile is used up by the first live asteroid (in id order) it
/// overlaps and is not checked against the rest, so one shot never scores
/// twice.  An asteroid already consumed earlier in the pass is skipped.
pub fn resolve_projectile_hits(pool: &mut EntityPool) -> Vec<Hit> {
    let mut hits = Vec::new();

    for projectile in pool.projectiles.values() {
        let target = pool
            .obstacles
            .values()
            .filter(|a| !hits.iter().any(|h: &Hit| h.asteroid == a.id))
            .find(|a| projectile.overlaps(a));
        if let Some(asteroid) = target {
            hits.push(Hit {
                projectile: projectile.id,
                asteroid: asteroid.id,
            });
        }
    }

    for hit in &hits {
        pool.destroy(hit.projectile);
        pool.destroy(hit.asteroid);
    }
    hits
}

/// First asteroid (in id order) touching the ship, if any.
pub fn player_hit(player: &Player, pool: &EntityPool) -> Option<EntityId> {
    pool.obstacles
        .values()
        .find(|a| player.body.overlaps(a))
        .map(|a| a.id)
}
