//! Host-to-spectator state broadcast
//!
//! Exactly one host runs physics for a match; every other viewer consumes
//! one-way full-state snapshots, last write wins. This is deliberately not
//! lockstep replication: the simulation is not globally deterministic
//! across parties (AI randomness, collision pass ordering), so independent
//! replicas would diverge. Spectators therefore never run physics.

use std::sync::mpsc::{Receiver, Sender};

use serde::{Deserialize, Serialize};

use crate::sim::MatchState;

/// One full-state broadcast frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Monotonic publish counter; viewers drop stale frames
    pub seq: u64,
    pub state: MatchState,
}

impl Snapshot {
    pub fn of(seq: u64, state: &MatchState) -> Self {
        Self {
            seq,
            state: state.clone(),
        }
    }

    /// Wire encoding for out-of-process transports
    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn decode(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Outbound side of the broadcast seam. The host publishes after every
/// tick; implementations must never hand state back to the simulation.
pub trait SnapshotPublisher {
    fn publish(&mut self, snapshot: Snapshot);
}

/// Publisher that drops every frame (no spectators)
#[derive(Debug, Default)]
pub struct NullPublisher;

impl SnapshotPublisher for NullPublisher {
    fn publish(&mut self, _snapshot: Snapshot) {}
}

/// In-process publisher over an mpsc channel
pub struct ChannelPublisher {
    tx: Sender<Snapshot>,
}

impl ChannelPublisher {
    pub fn new() -> (Self, Receiver<Snapshot>) {
        let (tx, rx) = std::sync::mpsc::channel();
        (Self { tx }, rx)
    }
}

impl SnapshotPublisher for ChannelPublisher {
    fn publish(&mut self, snapshot: Snapshot) {
        // A spectator hanging up is not the host's problem
        let _ = self.tx.send(snapshot);
    }
}

/// Spectator-side view: most recent broadcast wins, physics never runs here
#[derive(Debug, Default)]
pub struct SpectatorView {
    latest: Option<Snapshot>,
}

impl SpectatorView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an incoming frame; frames with stale sequence numbers are
    /// ignored, which makes delivery order irrelevant
    pub fn apply(&mut self, snapshot: Snapshot) {
        match &self.latest {
            Some(current) if snapshot.seq <= current.seq => {}
            _ => self.latest = Some(snapshot),
        }
    }

    pub fn seq(&self) -> Option<u64> {
        self.latest.as_ref().map(|s| s.seq)
    }

    pub fn state(&self) -> Option<&MatchState> {
        self.latest.as_ref().map(|s| &s.state)
    }

    /// Drain everything queued on a receiver, keeping only the newest frame
    pub fn drain(&mut self, rx: &Receiver<Snapshot>) {
        while let Ok(snapshot) = rx.try_recv() {
            self.apply(snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardConfig;

    fn state() -> MatchState {
        MatchState::new(&BoardConfig::default(), "host".into(), "guest".into())
    }

    #[test]
    fn stale_frames_are_dropped() {
        let s = state();
        let mut view = SpectatorView::new();

        view.apply(Snapshot::of(5, &s));
        let mut older = s.clone();
        older.time_ticks = 999;
        view.apply(Snapshot::of(3, &older));

        assert_eq!(view.seq(), Some(5));
        assert_eq!(view.state().map(|s| s.time_ticks), Some(0));
    }

    #[test]
    fn channel_delivers_newest_frame() {
        let (mut publisher, rx) = ChannelPublisher::new();
        let mut view = SpectatorView::new();
        let mut s = state();

        for seq in 1..=4 {
            s.time_ticks = seq;
            publisher.publish(Snapshot::of(seq, &s));
        }
        view.drain(&rx);

        assert_eq!(view.seq(), Some(4));
        assert_eq!(view.state().map(|s| s.time_ticks), Some(4));
    }

    #[test]
    fn spectator_can_decode_a_wire_frame() {
        let s = state();
        let wire = Snapshot::of(7, &s).encode().expect("encodes");

        let mut view = SpectatorView::new();
        view.apply(Snapshot::decode(&wire).expect("decodes"));

        assert_eq!(view.seq(), Some(7));
        assert_eq!(view.state().map(|s| s.pucks.len()), Some(10));
    }
}
