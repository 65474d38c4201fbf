//! Events emitted by the simulation for audio and UI feedback.

use crate::entities::EntityId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// A new playthrough began; background music loops from here.
    MusicStarted,
    /// The looping background music should stop.
    MusicStopped,
    Shot {
        projectile: EntityId,
    },
    AsteroidDestroyed {
        projectile: EntityId,
        asteroid: EntityId,
        score: u32,
    },
    PlayerHit {
        asteroid: EntityId,
    },
    Won {
        score: u32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sound {
    BackgroundMusic,
    Shoot,
    Collision,
}

/// Fire-and-forget sound output.
pub trait Audio {
    fn play(&mut self, sound: Sound);
    fn stop(&mut self, sound: Sound);
}

/// Translate simulation events into audio calls, in order.
pub fn dispatch_audio(events: &[GameEvent], audio: &mut impl Audio) {
    for event in events {
        match event {
            GameEvent::MusicStarted => audio.play(Sound::BackgroundMusic),
            GameEvent::MusicStopped => audio.stop(Sound::BackgroundMusic),
            GameEvent::Shot { .. } => audio.play(Sound::Shoot),
            GameEvent::AsteroidDestroyed { .. } | GameEvent::PlayerHit { .. } => {
                audio.play(Sound::Collision)
            }
            GameEvent::Won { .. } => {}
        }
    }
}
