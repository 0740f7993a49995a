//! Board geometry and AI difficulty tuning
//!
//! Every value here is externally supplied; the simulation never computes
//! its own tuning. Defaults mirror `crate::consts`.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Board geometry and physics coefficients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    pub width: f32,
    pub height: f32,
    pub puck_radius: f32,
    pub pucks_per_side: usize,
    /// Velocity retained each tick
    pub friction: f32,
    /// Velocity retained on a wall or divider bounce
    pub wall_restitution: f32,
    /// Velocity retained on a puck-puck impact
    pub puck_restitution: f32,
    pub gate_width: f32,
    /// Per-axis speed below which a puck snaps to exact rest
    pub snap_epsilon: f32,
    /// Per-axis speed below which a puck counts as flingable
    pub stationary_speed: f32,
    /// Minimum impact speed reported to observers
    pub contact_threshold: f32,
    /// Hard cap on impulse magnitude
    pub max_fling_strength: f32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            puck_radius: PUCK_RADIUS,
            pucks_per_side: PUCKS_PER_SIDE,
            friction: FRICTION,
            wall_restitution: WALL_RESTITUTION,
            puck_restitution: PUCK_RESTITUTION,
            gate_width: GATE_WIDTH,
            snap_epsilon: SNAP_EPSILON,
            stationary_speed: STATIONARY_SPEED,
            contact_threshold: CONTACT_THRESHOLD,
            max_fling_strength: MAX_FLING_STRENGTH,
        }
    }
}

impl BoardConfig {
    /// y coordinate of the center divider
    pub fn divider_y(&self) -> f32 {
        self.height / 2.0
    }

    /// x-range of the passable gate, centered on the board
    pub fn gate_range(&self) -> (f32, f32) {
        let half = self.gate_width / 2.0;
        (self.width / 2.0 - half, self.width / 2.0 + half)
    }

    /// Whether an x coordinate falls inside the gate opening
    pub fn in_gate(&self, x: f32) -> bool {
        let (lo, hi) = self.gate_range();
        x > lo && x < hi
    }
}

/// AI difficulty tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Immutable tuning profile for this tier
    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                decision_delay_ms: (2000, 3500),
                aim_accuracy: 0.4,
                power_range: (10.0, 25.0),
            },
            Difficulty::Medium => DifficultyProfile {
                decision_delay_ms: (1000, 2000),
                aim_accuracy: 0.7,
                power_range: (15.0, 35.0),
            },
            Difficulty::Hard => DifficultyProfile {
                decision_delay_ms: (400, 900),
                aim_accuracy: 0.95,
                power_range: (25.0, 40.0),
            },
        }
    }
}

/// Per-difficulty AI tuning
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Thinking-time range (ms) before a decided move is applied
    pub decision_delay_ms: (u64, u64),
    /// 0..1, higher aims tighter at the gate center
    pub aim_accuracy: f32,
    /// Impulse magnitude range
    pub power_range: (f32, f32),
}

impl DifficultyProfile {
    /// Full width of the aim perturbation around the gate center
    pub fn aim_spread(&self) -> f32 {
        (1.0 - self.aim_accuracy) * 150.0
    }

    /// Farthest a clamped target may land outside the gate
    pub fn max_miss(&self) -> f32 {
        (1.0 - self.aim_accuracy) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_is_centered() {
        let cfg = BoardConfig::default();
        let (lo, hi) = cfg.gate_range();
        assert_eq!(lo, 160.0);
        assert_eq!(hi, 240.0);
        assert!(cfg.in_gate(200.0));
        assert!(!cfg.in_gate(160.0));
        assert!(!cfg.in_gate(250.0));
    }

    #[test]
    fn divider_splits_board() {
        let cfg = BoardConfig::default();
        assert_eq!(cfg.divider_y(), 300.0);
    }

    #[test]
    fn difficulty_round_trips() {
        for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
        }
        assert_eq!(Difficulty::from_str("med"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }

    #[test]
    fn harder_tiers_think_faster_and_aim_tighter() {
        let easy = Difficulty::Easy.profile();
        let hard = Difficulty::Hard.profile();
        assert!(hard.decision_delay_ms.1 < easy.decision_delay_ms.0);
        assert!(hard.aim_accuracy > easy.aim_accuracy);
        assert!(hard.aim_spread() < easy.aim_spread());
        assert!(hard.max_miss() < easy.max_miss());
        assert!(hard.power_range.0 > easy.power_range.0);
    }
}
