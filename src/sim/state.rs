//! Match state and core simulation types
//!
//! Everything the host must broadcast for spectators lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::BoardConfig;
use crate::consts::{BOTTOM_COLOR, SPAWN_ROW_INSET, TOP_COLOR};

/// Opaque player identifier, assigned by the lobby/tournament layer
pub type PlayerId = String;

/// Stable puck identifier, unique within a match
pub type PuckId = u32;

/// One of the two board halves / competitors in a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Top,
    Bottom,
}

impl Side {
    pub fn opposite(&self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
        }
    }

    /// Unit y direction toward the divider
    pub fn forward(&self) -> f32 {
        match self {
            Side::Top => 1.0,
            Side::Bottom => -1.0,
        }
    }

    /// Whether a y coordinate lies in this side's half.
    /// The divider line itself belongs to the bottom half.
    pub fn contains(&self, y: f32, cfg: &BoardConfig) -> bool {
        match self {
            Side::Top => y < cfg.divider_y(),
            Side::Bottom => y >= cfg.divider_y(),
        }
    }
}

/// A simulated disc
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Puck {
    pub id: PuckId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Half the puck spawned on. Rendering and turn identity only; physics
    /// and win detection go by current position.
    pub owner: Side,
    /// Packed RGB for the renderer
    pub color: u32,
}

impl Puck {
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Whether both velocity axes are below the given per-axis threshold
    pub fn is_still(&self, threshold: f32) -> bool {
        self.vel.x.abs() < threshold && self.vel.y.abs() < threshold
    }

    /// Half of the board the puck currently occupies
    pub fn current_side(&self, cfg: &BoardConfig) -> Side {
        if self.pos.y < cfg.divider_y() {
            Side::Top
        } else {
            Side::Bottom
        }
    }
}

/// Kind of surface involved in a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactKind {
    Wall,
    Divider,
    Puck,
}

/// Transient impact notification for observers (sound, haptics)
///
/// Not part of match state. Consumers must never feed it back into physics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ContactEvent {
    pub kind: ContactKind,
    /// Pre-bounce impact speed
    pub strength: f32,
}

/// Complete match state (host-authoritative, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    /// Pucks in stable id order
    pub pucks: Vec<Puck>,
    pub top_player: PlayerId,
    pub bottom_player: PlayerId,
    /// One-time break launch still owed by the top side
    pub opening_top: bool,
    /// One-time break launch still owed by the bottom side
    pub opening_bottom: bool,
    /// Set exactly once; the match is terminal afterwards
    pub winner: Option<PlayerId>,
    pub paused: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl MatchState {
    /// Set up a fresh match: one evenly spaced row of pucks per side, at
    /// rest, both opening breaks pending
    pub fn new(cfg: &BoardConfig, top_player: PlayerId, bottom_player: PlayerId) -> Self {
        let n = cfg.pucks_per_side;
        let spacing = cfg.width / (n as f32 + 1.0);
        let mut pucks = Vec::with_capacity(n * 2);
        for i in 0..n {
            let x = spacing * (i as f32 + 1.0);
            pucks.push(Puck {
                id: pucks.len() as PuckId,
                pos: Vec2::new(x, SPAWN_ROW_INSET),
                vel: Vec2::ZERO,
                radius: cfg.puck_radius,
                owner: Side::Top,
                color: TOP_COLOR,
            });
            pucks.push(Puck {
                id: pucks.len() as PuckId,
                pos: Vec2::new(x, cfg.height - SPAWN_ROW_INSET),
                vel: Vec2::ZERO,
                radius: cfg.puck_radius,
                owner: Side::Bottom,
                color: BOTTOM_COLOR,
            });
        }
        Self {
            pucks,
            top_player,
            bottom_player,
            opening_top: true,
            opening_bottom: true,
            winner: None,
            paused: false,
            time_ticks: 0,
        }
    }

    pub fn puck(&self, id: PuckId) -> Option<&Puck> {
        self.pucks.iter().find(|p| p.id == id)
    }

    pub fn puck_mut(&mut self, id: PuckId) -> Option<&mut Puck> {
        self.pucks.iter_mut().find(|p| p.id == id)
    }

    pub fn player_for(&self, side: Side) -> &PlayerId {
        match side {
            Side::Top => &self.top_player,
            Side::Bottom => &self.bottom_player,
        }
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Whether `side` still owes its one-time opening break
    pub fn opening_pending(&self, side: Side) -> bool {
        match side {
            Side::Top => self.opening_top,
            Side::Bottom => self.opening_bottom,
        }
    }

    pub(crate) fn clear_opening(&mut self, side: Side) {
        match side {
            Side::Top => self.opening_top = false,
            Side::Bottom => self.opening_bottom = false,
        }
    }
}
