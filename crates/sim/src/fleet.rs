//! A fleet of simulated trains sharing one track network.

use std::sync::Arc;

use chrono::NaiveDateTime;
use metro_track::{TrackNetwork, TrainIdentifier};

use crate::schedule::ServiceWindow;
use crate::state::{advance, round_trip, RouteLeg, TrainState};

#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("Route has no legs: {0}")]
    EmptyRoute(String),
}

/// Owns the train states and drives them against a shared network.
///
/// The network itself is never mutated; each tick re-resolves every train's
/// coordinate from its (leg, progress) pair.
pub struct Fleet {
    network: Arc<dyn TrackNetwork>,
    legs: Vec<RouteLeg>,
    trains: Vec<TrainState>,
    window: Option<ServiceWindow>,
}

impl Fleet {
    /// Spawn `train_count` trains spread evenly around the round trip.
    pub fn new(network: Arc<dyn TrackNetwork>, train_count: usize) -> Result<Self, SimError> {
        let legs = round_trip(network.stations());
        if legs.is_empty() {
            return Err(SimError::EmptyRoute(network.line_name().to_string()));
        }

        let trains = (0..train_count)
            .map(|i| {
                let offset = i as f64 * legs.len() as f64 / train_count as f64;
                let leg = (offset.floor() as usize).min(legs.len() - 1);
                let progress = offset - offset.floor();

                let mut state = TrainState {
                    id: TrainIdentifier::new(format!("ts-{:02}", i + 1)),
                    leg,
                    progress,
                    position: legs[leg].from.location,
                };
                Self::refresh_position(&network, &legs, &mut state);
                state
            })
            .collect();

        Ok(Self {
            network,
            legs,
            trains,
            window: None,
        })
    }

    /// Restrict movement to a service window; outside it trains hold still.
    pub fn with_service_window(mut self, window: ServiceWindow) -> Self {
        self.window = Some(window);
        self
    }

    pub fn trains(&self) -> &[TrainState] {
        &self.trains
    }

    pub fn legs(&self) -> &[RouteLeg] {
        &self.legs
    }

    pub fn network(&self) -> &Arc<dyn TrackNetwork> {
        &self.network
    }

    /// Advance every train by `step` progress and re-resolve its position.
    ///
    /// `at` is only consulted when a service window is configured.
    pub fn advance_all(&mut self, step: f64, at: NaiveDateTime) {
        if let Some(window) = &self.window {
            if !window.is_open(at) {
                tracing::trace!(%at, "outside service window, fleet holding");
                return;
            }
        }

        for train in &mut self.trains {
            *train = advance(train, self.legs.len(), step);
            Self::refresh_position(&self.network, &self.legs, train);
        }
    }

    fn refresh_position(
        network: &Arc<dyn TrackNetwork>,
        legs: &[RouteLeg],
        train: &mut TrainState,
    ) {
        let leg = &legs[train.leg];
        match network.resolve_position(&leg.from.name, &leg.to.name, train.progress) {
            Ok(position) => train.position = position,
            // Keep the last known coordinate rather than jumping the marker
            Err(error) => {
                tracing::warn!(train = %train.id, %error, "position resolution failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::OperatingDays;
    use chrono::{NaiveDate, NaiveTime};
    use geo::Point;
    use metro_track::{LineDefinition, StationRecord, StaticTrackNetwork};

    fn network() -> Arc<dyn TrackNetwork> {
        let line = LineDefinition::new(
            "line-1",
            "Line 1",
            vec![
                StationRecord::new("aluva", "Aluva", Point::new(76.3530, 10.1102)),
                StationRecord::new("pulinchode", "Pulinchode", Point::new(76.3445, 10.0987)),
                StationRecord::new("companypady", "Companypady", Point::new(76.3420, 10.0913)),
            ],
        );
        Arc::new(StaticTrackNetwork::new(line).unwrap())
    }

    fn noon() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 3)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_spawn_spacing() {
        let fleet = Fleet::new(network(), 4).unwrap();

        assert_eq!(fleet.trains().len(), 4);
        assert_eq!(fleet.legs().len(), 4);

        // One train per leg when counts line up
        let legs: Vec<usize> = fleet.trains().iter().map(|t| t.leg).collect();
        assert_eq!(legs, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_empty_route_is_an_error() {
        let line = LineDefinition::new(
            "line-1",
            "Line 1",
            vec![StationRecord::new("aluva", "Aluva", Point::new(76.3530, 10.1102))],
        );
        let network: Arc<dyn TrackNetwork> = Arc::new(StaticTrackNetwork::new(line).unwrap());
        assert!(matches!(Fleet::new(network, 2), Err(SimError::EmptyRoute(_))));
    }

    #[test]
    fn test_advance_moves_trains() {
        let mut fleet = Fleet::new(network(), 1).unwrap();
        let before = fleet.trains()[0].position;

        fleet.advance_all(0.25, noon());
        let after = fleet.trains()[0].position;

        assert_ne!(before, after);
        assert!((fleet.trains()[0].progress - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_positions_follow_the_resolver() {
        let mut fleet = Fleet::new(network(), 1).unwrap();
        fleet.advance_all(0.5, noon());

        let train = &fleet.trains()[0];
        let leg = &fleet.legs()[train.leg];
        let expected = fleet
            .network()
            .resolve_position(&leg.from.name, &leg.to.name, train.progress)
            .unwrap();
        assert_eq!(train.position, expected);
    }

    #[test]
    fn test_fleet_holds_outside_service_window() {
        let window = ServiceWindow::new(
            OperatingDays::every_day(),
            NaiveTime::from_hms_opt(5, 30, 0).unwrap(),
            NaiveTime::from_hms_opt(22, 30, 0).unwrap(),
        );
        let mut fleet = Fleet::new(network(), 2).unwrap().with_service_window(window);

        let before: Vec<f64> = fleet.trains().iter().map(|t| t.progress).collect();

        // 03:00 is outside the window: nothing moves
        let closed = NaiveDate::from_ymd_opt(2026, 8, 3)
            .unwrap()
            .and_hms_opt(3, 0, 0)
            .unwrap();
        fleet.advance_all(0.25, closed);
        let held: Vec<f64> = fleet.trains().iter().map(|t| t.progress).collect();
        assert_eq!(before, held);

        // Noon is inside: trains advance
        fleet.advance_all(0.25, noon());
        let moved: Vec<f64> = fleet.trains().iter().map(|t| t.progress).collect();
        assert_ne!(before, moved);
    }
}
