//! Deterministic simulation module
//!
//! All match logic lives here. This module must stay pure and deterministic:
//! - Fixed timestep only; the driver owns the cadence
//! - Injected, seeded RNG only
//! - Stable iteration order (pucks kept in id order)
//! - No rendering, timers, or platform dependencies

pub mod ai;
pub mod collision;
pub mod motion;
pub mod state;
pub mod tick;

pub use ai::{Move, decide_move, decision_delay, opening_break};
pub use collision::resolve;
pub use motion::{advance, clamp_to_board};
pub use state::{ContactEvent, ContactKind, MatchState, PlayerId, Puck, PuckId, Side};
pub use tick::{apply_impulse, apply_move, evaluate, tick};
