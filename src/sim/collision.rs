//! Pairwise puck-puck collision resolution
//!
//! One pass over unordered pairs per tick: positional push-out so every
//! pair ends the tick non-overlapping, then an impulse-based elastic
//! response along the center normal. Pushes mutate positions read by later
//! pairs in the same pass, so this is an approximation of a simultaneous
//! solve; at 60 Hz that is the accepted consistency model.

use glam::Vec2;

use super::state::{ContactEvent, ContactKind, Puck};
use crate::config::BoardConfig;

/// Resolve every overlapping pair, appending contact events for impacts
/// above the configured threshold.
pub fn resolve(pucks: &mut [Puck], cfg: &BoardConfig, events: &mut Vec<ContactEvent>) {
    for i in 0..pucks.len() {
        let (head, tail) = pucks.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            resolve_pair(a, b, cfg, events);
        }
    }
}

fn resolve_pair(a: &mut Puck, b: &mut Puck, cfg: &BoardConfig, events: &mut Vec<ContactEvent>) {
    let delta = b.pos - a.pos;
    let dist = delta.length();
    let min_dist = a.radius + b.radius;
    if dist >= min_dist {
        return;
    }

    // Coincident centers leave no usable normal; fall back to +x so the
    // pair separates finitely instead of dividing by zero
    let normal = if dist > 0.0 { delta / dist } else { Vec2::X };

    // Split the overlap evenly so the pair ends the tick just touching
    let push = normal * ((min_dist - dist) / 2.0);
    a.pos -= push;
    b.pos += push;

    // Relative speed along the normal; positive means the pair is closing.
    // Already-separating pairs keep their velocities.
    let closing = (a.vel - b.vel).dot(normal);
    if closing <= 0.0 {
        return;
    }

    // Equal-mass impulse: the normal components swap, scaled so the
    // outgoing relative normal speed is restitution * incoming. Tangential
    // components are untouched.
    let impulse = normal * (closing * (1.0 + cfg.puck_restitution) / 2.0);
    a.vel -= impulse;
    b.vel += impulse;

    if closing > cfg.contact_threshold {
        events.push(ContactEvent {
            kind: ContactKind::Puck,
            strength: closing,
        });
    }
}
