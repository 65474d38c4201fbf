//! Asteroid supply: a fixed-cadence trigger plus one-for-one replacement of
//! asteroids that fall off the bottom.
//!
//! All randomness comes through the injected `rng`, so a seeded RNG yields
//! the same spawn sequence every run.

use std::time::Duration;

use rand::Rng;

use crate::config::{AsteroidConfig, GameConfig};
use crate::entities::{AsteroidVariant, EntityId};
use crate::pool::EntityPool;

#[derive(Clone, Debug)]
pub struct Spawner {
    interval: Duration,
    /// Simulated time since the last periodic spawn.
    since_last: Duration,
    params: AsteroidConfig,
    playfield_width: f32,
}

impl Spawner {
    /// `config` must already have passed `GameConfig::validate`; the random
    /// ranges are assumed non-empty from here on.
    pub fn new(config: &GameConfig) -> Self {
        Spawner {
            interval: config.spawn_interval(),
            since_last: Duration::ZERO,
            params: config.asteroids.clone(),
            playfield_width: config.playfield.width,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time until the next periodic spawn.
    pub fn time_until_next(&self) -> Duration {
        self.interval - self.since_last
    }

    /// Restart the periodic timer from zero.
    pub fn reset(&mut self) {
        self.since_last = Duration::ZERO;
    }

    /// Advance the periodic trigger by `dt`, spawning one asteroid for every
    /// interval boundary crossed.
    pub fn advance(
        &mut self,
        dt: Duration,
        pool: &mut EntityPool,
        rng: &mut impl Rng,
    ) -> Vec<EntityId> {
        self.since_last += dt;
        let mut spawned = Vec::new();
        while self.since_last >= self.interval {
            self.since_last -= self.interval;
            spawned.push(self.spawn_asteroid(pool, rng));
        }
        spawned
    }

    /// Exactly one new asteroid per fallen one.
    pub fn replace(
        &self,
        fallen: &[EntityId],
        pool: &mut EntityPool,
        rng: &mut impl Rng,
    ) -> Vec<EntityId> {
        fallen
            .iter()
            .map(|old| {
                let id = self.spawn_asteroid(pool, rng);
                log::debug!("asteroid {old} fell off screen, replaced by {id}");
                id
            })
            .collect()
    }

    pub fn spawn_asteroid(&self, pool: &mut EntityPool, rng: &mut impl Rng) -> EntityId {
        let p = &self.params;
        let x = rng.gen_range(p.x_margin..=self.playfield_width - p.x_margin);
        let variant = AsteroidVariant::ALL[rng.gen_range(0..AsteroidVariant::ALL.len())];
        let scale = rng.gen_range(p.scale_min..p.scale_max);
        let speed = rng.gen_range(p.speed_min..=p.speed_max);
        let spin = rng.gen_range(p.spin_min..=p.spin_max);

        let id = pool.spawn_obstacle(x, variant, scale, speed, spin);
        log::debug!(
            "asteroid {id} spawned: {variant:?} x={x:.0} scale={scale:.2} v={speed:.0} spin={spin:.0}"
        );
        id
    }
}
