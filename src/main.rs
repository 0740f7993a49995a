//! Sling Duel headless demo driver
//!
//! Runs one AI-vs-AI match at the fixed tick cadence, broadcasting
//! snapshots to an in-process spectator, and prints the winner. The
//! simulation core owns no timers; this loop is the host authority that
//! does.
//!
//! Usage: `sling-duel [easy|medium|hard]`, seed via the `SEED` env var.

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_pcg::Pcg32;

use sling_duel::config::{BoardConfig, Difficulty};
use sling_duel::consts::{AI_POLL_INTERVAL_MS, TICK_HZ};
use sling_duel::sim::{self, MatchState, Move, Side};
use sling_duel::sync::{ChannelPublisher, Snapshot, SnapshotPublisher, SpectatorView};

/// A decided move waiting out its thinking-time delay
struct PendingMove {
    side: Side,
    apply_at: Instant,
    mv: Move,
}

/// Give up on a match that somehow never resolves (misconfigured tuning)
const MAX_TICKS: u64 = 60 * 60 * 10;

fn main() {
    env_logger::init();

    let difficulty = std::env::args()
        .nth(1)
        .and_then(|arg| Difficulty::from_str(&arg))
        .unwrap_or_default();
    let seed = std::env::var("SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0x5EED_CA57);
    let mut rng = Pcg32::seed_from_u64(seed);

    let cfg = BoardConfig::default();
    let profile = difficulty.profile();
    let mut state = MatchState::new(&cfg, "ai_top".to_string(), "ai_bottom".to_string());
    log::info!(
        "starting {} AI-vs-AI match, seed {seed:#x}",
        difficulty.as_str()
    );

    let (mut publisher, rx) = ChannelPublisher::new();
    let mut spectator = SpectatorView::new();

    let tick_period = Duration::from_secs(1) / TICK_HZ;
    let poll_period = Duration::from_millis(AI_POLL_INTERVAL_MS);
    let mut next_consult = Instant::now();
    let mut pending: Vec<PendingMove> = Vec::new();
    let mut seq = 0u64;

    while !state.is_over() {
        let frame_start = Instant::now();

        // Each side's one-time break fires before any aimed shot
        for side in [Side::Top, Side::Bottom] {
            if state.opening_pending(side) {
                sim::opening_break(&mut state, side, &cfg, &mut rng);
            }
        }

        // Consult the engine on its own cadence; a decided move waits out
        // the difficulty's thinking delay before it is applied
        if frame_start >= next_consult {
            next_consult = frame_start + poll_period;
            for side in [Side::Top, Side::Bottom] {
                if pending.iter().any(|p| p.side == side) {
                    continue;
                }
                if let Some(mv) = sim::decide_move(&state.pucks, side, &cfg, &profile, &mut rng) {
                    let delay = sim::decision_delay(&profile, &mut rng);
                    pending.push(PendingMove {
                        side,
                        apply_at: frame_start + delay,
                        mv,
                    });
                }
            }
        }

        // Apply matured moves; stillness is re-validated inside apply_move,
        // so a decision that went stale is dropped rather than forced
        pending.retain(|p| {
            if frame_start < p.apply_at {
                return true;
            }
            if !sim::apply_move(&mut state, &p.mv, &cfg) {
                log::debug!("{:?} move on puck {} went stale, dropped", p.side, p.mv.puck);
            }
            false
        });

        for event in sim::tick(&mut state, &cfg) {
            log::debug!("contact {:?}, strength {:.1}", event.kind, event.strength);
        }

        seq += 1;
        publisher.publish(Snapshot::of(seq, &state));
        spectator.drain(&rx);

        if state.time_ticks >= MAX_TICKS {
            log::warn!("giving up after {} ticks with no winner", state.time_ticks);
            break;
        }
        if let Some(remaining) = tick_period.checked_sub(frame_start.elapsed()) {
            std::thread::sleep(remaining);
        }
    }
    // Pending AI decisions die with the loop; nothing applies after teardown

    match &state.winner {
        Some(winner) => {
            log::info!("winner: {winner}");
            println!("winner: {winner} (after {} ticks)", state.time_ticks);
        }
        None => println!("no winner (stopped after {} ticks)", state.time_ticks),
    }

    // The spectator's view of the final frame, as the sync layer saw it
    if let Some(final_state) = spectator.state() {
        if let Ok(json) = serde_json::to_string_pretty(final_state) {
            println!("{json}");
        }
    }
}
