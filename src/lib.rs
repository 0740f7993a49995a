//! Sling Duel - two-side puck flinging simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, AI, match evaluation)
//! - `config`: Board geometry, physics coefficients, difficulty tuning
//! - `sync`: Host-to-spectator snapshot broadcast
//!
//! Rendering, gesture capture, tournament bookkeeping, and real networking
//! live outside this crate and drive it through `sim::tick`,
//! `sim::apply_impulse`, and `sync::Snapshot`.

pub mod config;
pub mod sim;
pub mod sync;

pub use config::{BoardConfig, Difficulty, DifficultyProfile};

/// Game configuration constants
pub mod consts {
    /// Fixed physics cadence the driver is expected to run (Hz)
    pub const TICK_HZ: u32 = 60;

    /// Board dimensions
    pub const BOARD_WIDTH: f32 = 400.0;
    pub const BOARD_HEIGHT: f32 = 600.0;

    /// Puck defaults
    pub const PUCK_RADIUS: f32 = 15.0;
    pub const PUCKS_PER_SIDE: usize = 5;
    /// Distance of each spawn row from its side's back wall
    pub const SPAWN_ROW_INSET: f32 = 100.0;

    /// Velocity retained each tick
    pub const FRICTION: f32 = 0.985;
    /// Velocity retained on a wall or divider bounce
    pub const WALL_RESTITUTION: f32 = 0.7;
    /// Velocity retained on a puck-puck impact
    pub const PUCK_RESTITUTION: f32 = 0.8;

    /// Width of the passable gap in the center divider
    pub const GATE_WIDTH: f32 = 80.0;

    /// Per-axis speed below which the integrator snaps a puck to rest
    pub const SNAP_EPSILON: f32 = 0.1;
    /// Per-axis speed below which a puck counts as flingable
    pub const STATIONARY_SPEED: f32 = 0.5;
    /// Minimum impact speed reported to observers
    pub const CONTACT_THRESHOLD: f32 = 1.0;

    /// Hard cap on impulse magnitude, AI and human alike
    pub const MAX_FLING_STRENGTH: f32 = 40.0;

    /// Opening break launch speed range (units/tick)
    pub const BREAK_SPEED_MIN: f32 = 15.0;
    pub const BREAK_SPEED_MAX: f32 = 25.0;

    /// Milliseconds between AI engine consultations
    pub const AI_POLL_INTERVAL_MS: u64 = 1500;

    /// Puck colors, packed RGB (renderer-facing only)
    pub const TOP_COLOR: u32 = 0xef4444;
    pub const BOTTOM_COLOR: u32 = 0x3b82f6;
}
