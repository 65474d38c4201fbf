//! Game tuning, loadable from JSON.
//!
//! Every field has a default matching the stock game, and `#[serde(default)]`
//! lets a config file override only the values it mentions.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::entities::AsteroidVariant;

// ── Sections ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
    /// Projectiles above this line are removed.
    pub projectile_despawn_y: f32,
    /// Asteroids below this line are removed and replaced.
    pub obstacle_despawn_y: f32,
    /// Asteroids enter here, just above the visible area.
    pub obstacle_spawn_y: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Playfield {
            width: 800.0,
            height: 600.0,
            projectile_despawn_y: -20.0,
            obstacle_despawn_y: 620.0,
            obstacle_spawn_y: -50.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub start_x: f32,
    pub start_y: f32,
    /// Horizontal speed in px/s while a direction is held.
    pub speed: f32,
    pub width: f32,
    pub height: f32,
    pub fire_cooldown_ms: u64,
    /// Projectiles appear this far above the ship's centre.
    pub muzzle_offset: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            start_x: 400.0,
            start_y: 500.0,
            speed: 300.0,
            width: 64.0,
            height: 64.0,
            fire_cooldown_ms: 300,
            muzzle_offset: 20.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    /// Upward speed in px/s.
    pub speed: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        ProjectileConfig {
            speed: 600.0,
            width: 6.0,
            height: 16.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsteroidConfig {
    pub spawn_interval_ms: u64,
    /// Keeps spawned sprites fully on screen horizontally.
    pub x_margin: f32,
    pub scale_min: f32,
    pub scale_max: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    /// Degrees per second.
    pub spin_min: f32,
    pub spin_max: f32,
    /// Unscaled hitbox; multiplied by the asteroid's scale at spawn.
    pub hitbox_width: f32,
    pub hitbox_height: f32,
}

impl Default for AsteroidConfig {
    fn default() -> Self {
        AsteroidConfig {
            spawn_interval_ms: 1200,
            x_margin: 50.0,
            scale_min: 0.2,
            scale_max: 0.3,
            speed_min: 150.0,
            speed_max: 250.0,
            spin_min: -100.0,
            spin_max: 100.0,
            hitbox_width: 20.0,
            hitbox_height: 40.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub reward: u32,
    pub win_score: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            reward: 10,
            win_score: 200,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub playfield: Playfield,
    pub player: PlayerConfig,
    pub projectile: ProjectileConfig,
    pub asteroids: AsteroidConfig,
    pub scoring: ScoringConfig,
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("empty range for {field}: [{min}, {max}]")]
    EmptyRange {
        field: &'static str,
        min: f32,
        max: f32,
    },

    #[error("invalid value for {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

// ── Loading & validation ──────────────────────────────────────────────────────

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.asteroids.spawn_interval_ms)
    }

    pub fn fire_cooldown(&self) -> Duration {
        Duration::from_millis(self.player.fire_cooldown_ms)
    }

    /// Rejects anything that would make a random draw panic or break the
    /// hitbox rules.  A `Game` refuses to start with an invalid config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pf = &self.playfield;
        if !(pf.width > 0.0 && pf.height > 0.0) {
            return Err(ConfigError::Invalid {
                field: "playfield",
                reason: "width and height must be positive",
            });
        }
        if pf.projectile_despawn_y >= pf.obstacle_despawn_y {
            return Err(ConfigError::Invalid {
                field: "playfield.projectile_despawn_y",
                reason: "must lie above obstacle_despawn_y",
            });
        }

        let a = &self.asteroids;
        if a.spawn_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "asteroids.spawn_interval_ms",
                reason: "must be non-zero",
            });
        }
        non_empty("asteroids.x", a.x_margin, pf.width - a.x_margin)?;
        if !(a.scale_min > 0.0 && a.scale_min < a.scale_max) {
            return Err(ConfigError::EmptyRange {
                field: "asteroids.scale",
                min: a.scale_min,
                max: a.scale_max,
            });
        }
        non_empty("asteroids.speed", a.speed_min, a.speed_max)?;
        non_empty("asteroids.spin", a.spin_min, a.spin_max)?;

        if !(a.hitbox_width > 0.0 && a.hitbox_height > 0.0) {
            return Err(ConfigError::Invalid {
                field: "asteroids.hitbox",
                reason: "must be positive",
            });
        }
        for variant in AsteroidVariant::ALL {
            let (w, h) = variant.sprite_size();
            if a.hitbox_width >= w || a.hitbox_height >= h {
                return Err(ConfigError::Invalid {
                    field: "asteroids.hitbox",
                    reason: "must be smaller than every asteroid sprite",
                });
            }
        }

        let p = &self.player;
        if !(p.width > 0.0 && p.height > 0.0 && p.width <= pf.width) {
            return Err(ConfigError::Invalid {
                field: "player",
                reason: "size must be positive and fit the playfield",
            });
        }
        if p.speed < 0.0 {
            return Err(ConfigError::Invalid {
                field: "player.speed",
                reason: "must not be negative",
            });
        }
        if self.projectile.speed <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "projectile.speed",
                reason: "must be positive",
            });
        }
        if self.scoring.reward == 0 {
            return Err(ConfigError::Invalid {
                field: "scoring.reward",
                reason: "must be non-zero",
            });
        }
        Ok(())
    }
}

fn non_empty(field: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    // NaN fails this comparison too
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::EmptyRange { field, min, max })
    }
}
