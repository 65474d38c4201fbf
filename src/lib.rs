//! Asteroid Blaster — the simulation core of a small vertical shooter.
//!
//! - `compute`: state machine (`Game`) and the per-tick update
//! - `pool`, `spawner`, `collision`, `controller`, `physics`: the pieces a tick runs
//! - `entities`: plain data
//! - `events`: what the core tells audio/UI collaborators
//! - `config`: tuning, loadable from JSON

pub mod collision;
pub mod compute;
pub mod config;
pub mod controller;
pub mod entities;
pub mod events;
pub mod physics;
pub mod pool;
pub mod spawner;

pub use compute::{Game, GameSession, UiTrigger};
pub use config::{ConfigError, GameConfig};
pub use controller::InputState;
pub use events::{Audio, GameEvent, Sound};
