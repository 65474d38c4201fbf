//! Motion integration.  The simulation owns velocities; this module turns
//! them into positions once per tick.

use std::time::Duration;

use crate::config::Playfield;
use crate::entities::Entity;

/// Straight-line and angular motion: `position += velocity * dt`.
pub fn integrate(entity: &mut Entity, dt: Duration) {
    let secs = dt.as_secs_f32();
    entity.x += entity.vx * secs;
    entity.y += entity.vy * secs;
    entity.angle = (entity.angle + entity.angular_velocity * secs) % 360.0;
}

/// Keep the whole sprite inside the playfield, stopping motion on the
/// clamped axis.
pub fn clamp_to_playfield(entity: &mut Entity, playfield: &Playfield) {
    let half_w = entity.width / 2.0;
    let half_h = entity.height / 2.0;

    let x = entity.x.clamp(half_w, (playfield.width - half_w).max(half_w));
    if x != entity.x {
        entity.x = x;
        entity.vx = 0.0;
    }
    let y = entity.y.clamp(half_h, (playfield.height - half_h).max(half_h));
    if y != entity.y {
        entity.y = y;
        entity.vy = 0.0;
    }
}
