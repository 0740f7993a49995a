//! Per-puck motion integration
//!
//! Advances one puck by one tick: position step, friction decay,
//! snap-to-rest, then wall and divider bounces checked against the next
//! position. Velocity is expressed in board units per tick, so there is no
//! dt parameter and no sub-stepping.

use super::state::{ContactEvent, ContactKind, Puck};
use crate::config::BoardConfig;

/// Advance one puck by one tick.
///
/// Bounces above the contact threshold append one event carrying the
/// pre-bounce impact speed of the fastest offending axis.
pub fn advance(puck: &mut Puck, cfg: &BoardConfig, events: &mut Vec<ContactEvent>) {
    let prev_y = puck.pos.y;
    let mut next = puck.pos + puck.vel;
    let mut vel = puck.vel * cfg.friction;

    // Snap tiny residual motion to exact rest so stillness checks terminate
    // instead of decaying asymptotically
    if vel.x.abs() < cfg.snap_epsilon {
        vel.x = 0.0;
    }
    if vel.y.abs() < cfg.snap_epsilon {
        vel.y = 0.0;
    }

    let mut impact: f32 = 0.0;
    let mut kind = ContactKind::Wall;
    let mut collided = false;

    // Walls, each axis independently; a corner hit triggers both.
    // Clamp before reflecting: a puck exactly on the boundary must not blow up.
    if next.x - puck.radius < 0.0 {
        next.x = puck.radius;
        impact = vel.x.abs();
        vel.x *= -cfg.wall_restitution;
        collided = true;
    } else if next.x + puck.radius > cfg.width {
        next.x = cfg.width - puck.radius;
        impact = vel.x.abs();
        vel.x *= -cfg.wall_restitution;
        collided = true;
    }

    if next.y - puck.radius < 0.0 {
        next.y = puck.radius;
        impact = impact.max(vel.y.abs());
        vel.y *= -cfg.wall_restitution;
        collided = true;
    } else if next.y + puck.radius > cfg.height {
        next.y = cfg.height - puck.radius;
        impact = impact.max(vel.y.abs());
        vel.y *= -cfg.wall_restitution;
        collided = true;
    }

    // Center divider: impassable outside the gate x-range. Crossing pucks
    // clamp back to the side they came from; gate transit is undisturbed
    // and is the only way a puck changes sides.
    let divider = cfg.divider_y();
    if !cfg.in_gate(next.x) {
        let was_above = prev_y < divider;
        let is_above = next.y < divider;
        if was_above != is_above {
            next.y = if was_above {
                divider - puck.radius
            } else {
                divider + puck.radius
            };
            impact = impact.max(vel.y.abs());
            vel.y *= -cfg.wall_restitution;
            collided = true;
            kind = ContactKind::Divider;
        }
    }

    puck.pos = next;
    puck.vel = vel;

    if collided && impact > cfg.contact_threshold {
        events.push(ContactEvent {
            kind,
            strength: impact,
        });
    }
}

/// Boundary safety net, run after pair resolution: a positional push-out
/// can shove a puck past a wall in the same tick. Clamp it back inside and
/// point the offending velocity axis inward (magnitude unchanged).
pub fn clamp_to_board(puck: &mut Puck, cfg: &BoardConfig) {
    if puck.pos.x < puck.radius {
        puck.pos.x = puck.radius;
        puck.vel.x = puck.vel.x.abs();
    } else if puck.pos.x > cfg.width - puck.radius {
        puck.pos.x = cfg.width - puck.radius;
        puck.vel.x = -puck.vel.x.abs();
    }
    if puck.pos.y < puck.radius {
        puck.pos.y = puck.radius;
        puck.vel.y = puck.vel.y.abs();
    } else if puck.pos.y > cfg.height - puck.radius {
        puck.pos.y = cfg.height - puck.radius;
        puck.vel.y = -puck.vel.y.abs();
    }
}
