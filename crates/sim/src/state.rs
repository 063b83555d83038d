//! Train movement as an explicit state transition.
//!
//! A train's whole animation state is one [`TrainState`] record; [`advance`]
//! maps it to the next record. Nothing here owns a timer: the caller decides
//! the cadence and feeds progress increments in, which keeps the transition
//! testable without any scheduling machinery.

use std::sync::Arc;

use geo::Point;
use metro_track::{StationRecord, TrainIdentifier};

/// Travel direction along the line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    Down = 0,
    Up = 1,
}

/// One leg of a service pattern: travel from one station to the next.
#[derive(Clone, Debug)]
pub struct RouteLeg {
    pub from: Arc<StationRecord>,
    pub to: Arc<StationRecord>,
    pub direction: Direction,
}

/// Out-and-back service over an ordered station sequence.
///
/// A line of N stations yields `2·(N−1)` legs: every adjacent pair in
/// declaration order, then every pair reversed. Advancing past the last leg
/// wraps back to the first, so a train cycles the full round trip forever.
pub fn round_trip(stations: &[Arc<StationRecord>]) -> Vec<RouteLeg> {
    let mut legs = Vec::with_capacity(2 * stations.len().saturating_sub(1));

    for pair in stations.windows(2) {
        legs.push(RouteLeg {
            from: pair[0].clone(),
            to: pair[1].clone(),
            direction: Direction::Down,
        });
    }

    for pair in stations.windows(2).rev() {
        legs.push(RouteLeg {
            from: pair[1].clone(),
            to: pair[0].clone(),
            direction: Direction::Up,
        });
    }

    legs
}

/// Snapshot of one simulated train.
///
/// `leg` indexes into the route's leg list; `progress` is the fraction of
/// that leg already covered, always in [0, 1). `position` is whatever the
/// resolver last produced for this train, kept verbatim when a resolution
/// fails so the marker never jumps to nowhere.
#[derive(Clone, Debug)]
pub struct TrainState {
    pub id: TrainIdentifier,
    pub leg: usize,
    pub progress: f64,
    pub position: Point,
}

/// Advance a train by `step` progress, wrapping across legs modulo the
/// route length.
///
/// The fractional remainder carries over into the next leg, so one oversized
/// step crosses as many legs as it covers. Non-finite or negative steps are
/// treated as zero; trains never move backwards.
pub fn advance(state: &TrainState, leg_count: usize, step: f64) -> TrainState {
    let step = if step.is_finite() { step.max(0.0) } else { 0.0 };
    if leg_count == 0 {
        return state.clone();
    }

    let total = state.progress + step;
    let whole = total.floor();
    let progress = total - whole;
    let leg = (state.leg + whole as usize) % leg_count;

    TrainState {
        id: state.id.clone(),
        leg,
        progress,
        position: state.position,
    }
}
