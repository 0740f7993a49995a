//! Computer opponent decision engine
//!
//! Stateless and synchronous. The driver owns both timers: the consult
//! cadence and the per-difficulty thinking delay sampled from
//! [`decision_delay`]. A decided move is applied later through
//! `tick::apply_move`, which re-checks stillness, so a decision that went
//! stale between thinking and flinging is simply dropped.
//!
//! All randomness flows through the injected `Rng`; seed it to reproduce a
//! match.

use std::time::Duration;

use glam::Vec2;
use rand::Rng;

use super::state::{MatchState, Puck, PuckId, Side};
use crate::config::{BoardConfig, DifficultyProfile};
use crate::consts::{BREAK_SPEED_MAX, BREAK_SPEED_MIN};

/// A chosen puck and the velocity to assign to it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Move {
    pub puck: PuckId,
    pub velocity: Vec2,
}

/// Pick a stationary puck on `side`'s half and aim it at the gate.
///
/// Returns `None` when the side has no stationary puck; that is a normal
/// outcome and the caller must not force a move.
pub fn decide_move<R: Rng + ?Sized>(
    pucks: &[Puck],
    side: Side,
    cfg: &BoardConfig,
    profile: &DifficultyProfile,
    rng: &mut R,
) -> Option<Move> {
    let candidates: Vec<&Puck> = pucks
        .iter()
        .filter(|p| side.contains(p.pos.y, cfg))
        .filter(|p| p.is_still(cfg.stationary_speed))
        .collect();
    if candidates.is_empty() {
        return None;
    }

    let chosen = candidates[rng.random_range(0..candidates.len())];
    let target = aim_target(cfg, profile, rng);
    let dir = (target - chosen.pos).normalize_or_zero();
    let (min_power, max_power) = profile.power_range;
    let power = rng.random_range(min_power..max_power);

    log::debug!(
        "{side:?} flings puck {} at x={:.1} with power {power:.1}",
        chosen.id, target.x
    );
    Some(Move {
        puck: chosen.id,
        velocity: dir * power,
    })
}

/// Gate-center target with a difficulty-scaled perturbation.
///
/// The miss is bounded: the perturbed x is clamped to the gate opening
/// widened by the profile's max miss distance on each side, so low
/// accuracy widens shots without ever making them wild.
fn aim_target<R: Rng + ?Sized>(
    cfg: &BoardConfig,
    profile: &DifficultyProfile,
    rng: &mut R,
) -> Vec2 {
    let center = cfg.width / 2.0;
    let x = center + (rng.random::<f32>() - 0.5) * profile.aim_spread();
    let (gate_lo, gate_hi) = cfg.gate_range();
    let miss = profile.max_miss();
    Vec2::new(x.clamp(gate_lo - miss, gate_hi + miss), cfg.divider_y())
}

/// Apply a side's one-time opening break: every puck on that half gets a
/// straight shove toward the divider, and the side's opening flag clears.
///
/// Returns `false` without touching state when the flag is already clear
/// or the match is paused/terminal.
pub fn opening_break<R: Rng + ?Sized>(
    state: &mut MatchState,
    side: Side,
    cfg: &BoardConfig,
    rng: &mut R,
) -> bool {
    if state.paused || state.is_over() || !state.opening_pending(side) {
        return false;
    }
    for puck in state
        .pucks
        .iter_mut()
        .filter(|p| side.contains(p.pos.y, cfg))
    {
        let speed = rng.random_range(BREAK_SPEED_MIN..BREAK_SPEED_MAX);
        puck.vel = Vec2::new(0.0, side.forward() * speed);
    }
    state.clear_opening(side);
    log::info!("{side:?} opening break");
    true
}

/// Sample the thinking-time delay to wait before a decided move is applied
pub fn decision_delay<R: Rng + ?Sized>(profile: &DifficultyProfile, rng: &mut R) -> Duration {
    let (lo, hi) = profile.decision_delay_ms;
    Duration::from_millis(rng.random_range(lo..=hi))
}
