//! Game state machine and the per-tick simulation.
//!
//! `Game` owns the per-playthrough `GameSession` and is the only thing that
//! mutates it.  The UI drives transitions through `Game::trigger`; the frame
//! clock drives `Game::tick`.  Randomness is injected so a seeded RNG makes a
//! run reproducible.

use std::time::Duration;

use rand::Rng;

use crate::collision;
use crate::config::{ConfigError, GameConfig};
use crate::controller::{self, InputState};
use crate::entities::{Entity, EntityId, EntityKind, GameStatus, Hitbox, Player};
use crate::events::GameEvent;
use crate::physics;
use crate::pool::EntityPool;
use crate::spawner::Spawner;

/// Discrete UI actions (menu buttons).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiTrigger {
    Start,
    Retry,
    Menu,
    PlayAgain,
}

// ── Session ───────────────────────────────────────────────────────────────────

/// Everything that belongs to one playthrough.  Rebuilt from scratch each
/// time the game enters `Playing`.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub player: Player,
    pub pool: EntityPool,
    pub spawner: Spawner,
    pub score: u32,
    /// Simulated time spent in `Playing`.
    pub elapsed: Duration,
    /// Set once the playthrough reached `GameOver` or `Win`.
    pub is_over: bool,
}

impl GameSession {
    pub fn new(config: &GameConfig) -> Self {
        GameSession {
            player: spawn_player(config),
            pool: EntityPool::new(config),
            spawner: Spawner::new(config),
            score: 0,
            elapsed: Duration::ZERO,
            is_over: false,
        }
    }
}

/// The ship at its starting position, ready to fire immediately.
pub fn spawn_player(config: &GameConfig) -> Player {
    let p = &config.player;
    Player {
        body: Entity {
            id: EntityId(0),
            kind: EntityKind::Ship,
            x: p.start_x,
            y: p.start_y,
            vx: 0.0,
            vy: 0.0,
            angle: 0.0,
            angular_velocity: 0.0,
            scale: 1.0,
            width: p.width,
            height: p.height,
            hitbox: Hitbox::full(p.width, p.height),
        },
        last_fired: None,
    }
}

// ── State machine ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Game {
    pub config: GameConfig,
    pub status: GameStatus,
    pub session: GameSession,
}

impl Game {
    /// Starts in `Menu`.  Fails if the config has an empty random range or
    /// otherwise unusable values.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let session = GameSession::new(&config);
        Ok(Game {
            config,
            status: GameStatus::Menu,
            session,
        })
    }

    /// Apply a UI action.  Actions that make no sense in the current state
    /// are ignored.
    pub fn trigger(&mut self, trigger: UiTrigger) -> Vec<GameEvent> {
        match (self.status, trigger) {
            (GameStatus::Menu, UiTrigger::Start)
            | (GameStatus::GameOver, UiTrigger::Retry)
            | (GameStatus::Win, UiTrigger::PlayAgain) => self.enter_playing(),
            (GameStatus::GameOver, UiTrigger::Menu) | (GameStatus::Win, UiTrigger::Menu) => {
                log::info!("back to menu");
                self.status = GameStatus::Menu;
                Vec::new()
            }
            (status, trigger) => {
                log::debug!("ignoring {trigger:?} while {status:?}");
                Vec::new()
            }
        }
    }

    fn enter_playing(&mut self) -> Vec<GameEvent> {
        log::info!("starting new playthrough (from {:?})", self.status);
        self.session = GameSession::new(&self.config);
        self.status = GameStatus::Playing;
        vec![GameEvent::MusicStarted]
    }

    /// Whole seconds of play, as shown on the HUD.
    pub fn elapsed_secs(&self) -> u64 {
        self.session.elapsed.as_secs()
    }

    // ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────

    /// Advance the simulation by `dt`.  Does nothing outside `Playing`.
    pub fn tick(&mut self, input: &InputState, dt: Duration, rng: &mut impl Rng) -> Vec<GameEvent> {
        if self.status != GameStatus::Playing {
            return Vec::new();
        }

        let cfg = &self.config;
        let s = &mut self.session;
        let mut events = Vec::new();
        let now = s.elapsed;

        // ── 1. Player input ─────────────────────────────────────────────────
        controller::steer(&mut s.player, input, cfg.player.speed);
        if controller::try_fire(&mut s.player, input, now, cfg.fire_cooldown()) {
            match s.pool.spawn_projectile((s.player.body.x, s.player.body.y)) {
                Ok(projectile) => events.push(GameEvent::Shot { projectile }),
                Err(e) => log::warn!("shot dropped: {e}"),
            }
        }

        // ── 2. Motion ───────────────────────────────────────────────────────
        physics::integrate(&mut s.player.body, dt);
        physics::clamp_to_playfield(&mut s.player.body, &cfg.playfield);
        s.pool.integrate(dt);

        // ── 3. Bounds cleanup, replacing fallen asteroids ───────────────────
        let gone = s.pool.remove_out_of_bounds();
        s.spawner.replace(&gone.obstacles, &mut s.pool, rng);

        // ── 4. Periodic spawn ───────────────────────────────────────────────
        s.spawner.advance(dt, &mut s.pool, rng);

        // ── 5. Projectiles ↔ asteroids ──────────────────────────────────────
        for hit in collision::resolve_projectile_hits(&mut s.pool) {
            s.score += cfg.scoring.reward;
            events.push(GameEvent::AsteroidDestroyed {
                projectile: hit.projectile,
                asteroid: hit.asteroid,
                score: s.score,
            });
        }

        // ── 6. Ship ↔ asteroids (ends the run before any win check) ─────────
        if let Some(asteroid) = collision::player_hit(&s.player, &s.pool) {
            s.player.body.vx = 0.0;
            s.is_over = true;
            self.status = GameStatus::GameOver;
            log::info!("ship hit by asteroid {asteroid}, final score {}", s.score);
            events.push(GameEvent::PlayerHit { asteroid });
            events.push(GameEvent::MusicStopped);
            return events;
        }

        s.elapsed += dt;

        // ── 7. Win check ────────────────────────────────────────────────────
        if s.score >= cfg.scoring.win_score {
            s.is_over = true;
            self.status = GameStatus::Win;
            log::info!("win with score {} after {:.1}s", s.score, s.elapsed.as_secs_f32());
            events.push(GameEvent::MusicStopped);
            events.push(GameEvent::Won { score: s.score });
        }

        log::trace!(
            "tick t={:?} score={} projectiles={} asteroids={}",
            s.elapsed,
            s.score,
            s.pool.projectiles.len(),
            s.pool.obstacles.len()
        );
        events
    }
}
