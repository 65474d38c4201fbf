//! Player input → ship velocity and rate-limited fire requests.

use std::time::Duration;

use crate::entities::Player;

/// Direction/fire keys as polled once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

/// Set the ship's horizontal velocity.  `left` is checked first, so holding
/// both directions moves left.
pub fn steer(player: &mut Player, input: &InputState, speed: f32) {
    player.body.vx = if input.left {
        -speed
    } else if input.right {
        speed
    } else {
        0.0
    };
}

/// Accept a fire request if `fire` is held and the cooldown has elapsed
/// since the last accepted shot.  On success the cooldown restarts at `now`.
pub fn try_fire(player: &mut Player, input: &InputState, now: Duration, cooldown: Duration) -> bool {
    if !input.fire {
        return false;
    }
    let ready = match player.last_fired {
        None => true,
        Some(last) => now.saturating_sub(last) >= cooldown,
    };
    if ready {
        player.last_fired = Some(now);
    }
    ready
}
