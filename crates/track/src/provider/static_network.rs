//! In-memory track network built once from a line definition.
//!
//! Construction precomputes the segment table and both spatial indices;
//! afterwards the network is immutable and every query is read-only.

use std::collections::HashMap;
use std::sync::Arc;

use geo::{Line, LineString, Point};
use rstar::RTree;

use crate::identifiers::{LineIdentifier, StationIdentifier};
use crate::models::traits::TrackNetwork;
use crate::models::types::{LineDefinition, Result, StationRecord, TrackError};
use crate::segment::{smooth_step, SegmentTable, TrackSegment};
use crate::spatial::index::{StationNode, TrackSpanNode};
use crate::spatial::queries::{
    haversine_distance, haversine_distance_to_span, meters_to_degrees_approx,
};

/// Margin applied to envelope queries before the exact Haversine re-check.
/// The degree conversion assumes the equator, so envelopes need slack.
const ENVELOPE_PAD: f64 = 2.0;

/// A fully built, immutable line.
///
/// Cheap to share: wrap it in an `Arc` (or hand out `&dyn TrackNetwork`) and
/// query it from as many readers as needed, once per animation tick per
/// train included. There is no interior mutability and no locking.
pub struct StaticTrackNetwork {
    line_id: LineIdentifier,
    line_name: Arc<str>,

    // Core data
    stations: Vec<Arc<StationRecord>>,
    segments: SegmentTable,

    // Lookup maps
    station_map: HashMap<StationIdentifier, Arc<StationRecord>>,
    name_map: HashMap<Arc<str>, Arc<StationRecord>>,

    // Spatial indices
    station_tree: RTree<StationNode>,
    span_tree: RTree<TrackSpanNode>,
}

impl StaticTrackNetwork {
    /// Build the network for one line.
    ///
    /// Rejects an empty station sequence and non-finite coordinates up
    /// front rather than letting NaN leak into precomputed waypoints. A
    /// single-station line is valid and simply has no segments.
    pub fn new(line: LineDefinition) -> Result<Self> {
        if line.stations.is_empty() {
            return Err(TrackError::InvalidLine(format!(
                "line {} has no stations",
                line.id
            )));
        }

        for station in &line.stations {
            if !station.location.x().is_finite() || !station.location.y().is_finite() {
                return Err(TrackError::InvalidLine(format!(
                    "station {} has non-finite coordinates",
                    station.name
                )));
            }
        }

        let stations: Vec<Arc<StationRecord>> =
            line.stations.into_iter().map(Arc::new).collect();

        let station_map: HashMap<_, _> = stations
            .iter()
            .map(|s| (s.id.clone(), s.clone()))
            .collect();

        // Last declaration wins for duplicate names
        let name_map: HashMap<_, _> = stations
            .iter()
            .map(|s| (s.name.clone(), s.clone()))
            .collect();

        let segments = SegmentTable::build(&stations);

        let station_tree = RTree::bulk_load(
            stations.iter().map(|s| StationNode::new(s.clone())).collect(),
        );

        let mut spans = Vec::new();
        for (segment_index, segment) in segments.segments().iter().enumerate() {
            for pair in segment.waypoints().windows(2) {
                let span = Line::new(pair[0].0, pair[1].0);
                spans.push(TrackSpanNode::new(span, segment_index));
            }
        }
        let span_tree = RTree::bulk_load(spans);

        Ok(Self {
            line_id: line.id,
            line_name: line.name,
            stations,
            segments,
            station_map,
            name_map,
            station_tree,
            span_tree,
        })
    }
}

impl TrackNetwork for StaticTrackNetwork {
    fn line_id(&self) -> &LineIdentifier {
        &self.line_id
    }

    fn line_name(&self) -> &str {
        &self.line_name
    }

    fn station(&self, id: &StationIdentifier) -> Option<Arc<StationRecord>> {
        self.station_map.get(id).cloned()
    }

    fn station_named(&self, name: &str) -> Option<Arc<StationRecord>> {
        self.name_map.get(name).cloned()
    }

    fn stations(&self) -> &[Arc<StationRecord>] {
        &self.stations
    }

    fn segments(&self) -> &[TrackSegment] {
        self.segments.segments()
    }

    fn segment_between(&self, from: &str, to: &str) -> Option<&TrackSegment> {
        self.segments.get(from, to)
    }

    fn resolve_position(&self, from: &str, to: &str, progress: f64) -> Result<Point> {
        let progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };

        if let Some(segment) = self.segments.get(from, to) {
            return Ok(segment.point_at(progress));
        }

        tracing::debug!(from, to, "no precomputed segment, easing between raw coordinates");

        let a = self
            .name_map
            .get(from)
            .ok_or_else(|| TrackError::StationNotFound(from.to_string()))?;
        let b = self
            .name_map
            .get(to)
            .ok_or_else(|| TrackError::StationNotFound(to.to_string()))?;

        let s = smooth_step(progress);
        Ok(Point::new(
            a.location.x() + (b.location.x() - a.location.x()) * s,
            a.location.y() + (b.location.y() - a.location.y()) * s,
        ))
    }

    fn track_polyline(&self) -> LineString {
        self.segments.polyline()
    }

    fn stations_near(&self, point: Point, radius_m: f64) -> Vec<Arc<StationRecord>> {
        if radius_m <= 0.0 || !radius_m.is_finite() {
            return Vec::new();
        }

        let envelope = meters_to_degrees_approx(radius_m) * ENVELOPE_PAD;
        self.station_tree
            .locate_within_distance([point.x(), point.y()], envelope * envelope)
            .filter(|node| haversine_distance(point, node.station.location) <= radius_m)
            .map(|node| node.station.clone())
            .collect()
    }

    fn nearest_stations(&self, point: Point, n: usize) -> Vec<Arc<StationRecord>> {
        self.station_tree
            .nearest_neighbor_iter(&[point.x(), point.y()])
            .take(n)
            .map(|node| node.station.clone())
            .collect()
    }

    fn nearest_track_point(&self, point: Point) -> Option<Point> {
        self.span_tree
            .nearest_neighbor(&[point.x(), point.y()])
            .map(|node| node.closest_point(point))
    }

    fn distance_to_track(&self, point: Point) -> Option<f64> {
        self.span_tree
            .nearest_neighbor(&[point.x(), point.y()])
            .map(|node| haversine_distance_to_span(point, node.span))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_line() -> LineDefinition {
        LineDefinition::new(
            "line-1",
            "Line 1",
            vec![
                StationRecord::new("aluva", "Aluva", Point::new(76.3530, 10.1102)),
                StationRecord::new("pulinchode", "Pulinchode", Point::new(76.3445, 10.0987)),
                StationRecord::new("companypady", "Companypady", Point::new(76.3420, 10.0913)),
            ],
        )
    }

    fn network() -> StaticTrackNetwork {
        StaticTrackNetwork::new(sample_line()).unwrap()
    }

    #[test]
    fn test_rejects_empty_line() {
        let line = LineDefinition::new("line-1", "Line 1", vec![]);
        assert!(matches!(
            StaticTrackNetwork::new(line),
            Err(TrackError::InvalidLine(_))
        ));
    }

    #[test]
    fn test_rejects_non_finite_coordinates() {
        let line = LineDefinition::new(
            "line-1",
            "Line 1",
            vec![StationRecord::new("aluva", "Aluva", Point::new(f64::NAN, 10.1102))],
        );
        assert!(matches!(
            StaticTrackNetwork::new(line),
            Err(TrackError::InvalidLine(_))
        ));
    }

    #[test]
    fn test_single_station_line_has_no_segments() {
        let line = LineDefinition::new(
            "line-1",
            "Line 1",
            vec![StationRecord::new("aluva", "Aluva", Point::new(76.3530, 10.1102))],
        );
        let network = StaticTrackNetwork::new(line).unwrap();
        assert!(network.segments().is_empty());
        assert!(network.track_polyline().0.is_empty());
    }

    #[test]
    fn test_resolve_endpoints_match_station_coordinates() {
        let network = network();

        for segment in network.segments() {
            let from = network.station_named(&segment.from_name).unwrap();
            let to = network.station_named(&segment.to_name).unwrap();

            let start = network
                .resolve_position(&segment.from_name, &segment.to_name, 0.0)
                .unwrap();
            assert!((start.x() - from.location.x()).abs() < 1e-6);
            assert!((start.y() - from.location.y()).abs() < 1e-6);

            let end = network
                .resolve_position(&segment.from_name, &segment.to_name, 1.0)
                .unwrap();
            assert!((end.x() - to.location.x()).abs() < 1e-6);
            assert!((end.y() - to.location.y()).abs() < 1e-6);
        }
    }

    #[test]
    fn test_resolve_clamps_out_of_range_progress() {
        let network = network();

        let low = network.resolve_position("Aluva", "Pulinchode", -0.5).unwrap();
        let zero = network.resolve_position("Aluva", "Pulinchode", 0.0).unwrap();
        assert_eq!(low, zero);

        let high = network.resolve_position("Aluva", "Pulinchode", 1.5).unwrap();
        let one = network.resolve_position("Aluva", "Pulinchode", 1.0).unwrap();
        assert_eq!(high, one);

        let nan = network.resolve_position("Aluva", "Pulinchode", f64::NAN).unwrap();
        assert_eq!(nan, zero);
    }

    #[test]
    fn test_resolve_biases_toward_origin_before_midpoint() {
        let network = network();
        let aluva = Point::new(76.3530, 10.1102);
        let pulinchode = Point::new(76.3445, 10.0987);

        let position = network.resolve_position("Aluva", "Pulinchode", 0.35).unwrap();

        // Strictly inside the bounding box of the pair
        assert!(position.x() < aluva.x() && position.x() > pulinchode.x());
        assert!(position.y() < aluva.y() && position.y() > pulinchode.y());

        // The ease-in keeps progress 0.35 short of the linear midpoint
        assert!(
            haversine_distance(position, aluva) < haversine_distance(position, pulinchode)
        );
    }

    #[test]
    fn test_reverse_direction_uses_fallback() {
        let network = network();

        // No precomputed segment for the reverse pair
        assert!(network.segment_between("Pulinchode", "Aluva").is_none());

        // The fallback still produces a coordinate strictly between both
        let position = network.resolve_position("Pulinchode", "Aluva", 0.5).unwrap();
        assert!(position.x() > 76.3445 && position.x() < 76.3530);
        assert!(position.y() > 10.0987 && position.y() < 10.1102);
    }

    #[test]
    fn test_non_adjacent_pair_uses_fallback() {
        let network = network();

        let position = network
            .resolve_position("Aluva", "Companypady", 0.5)
            .unwrap();
        assert!(position.x() > 76.3420 && position.x() < 76.3530);
        assert!(position.y() > 10.0913 && position.y() < 10.1102);
    }

    #[test]
    fn test_unknown_station_is_an_error() {
        let network = network();

        let result = network.resolve_position("Nonexistent", "AlsoNonexistent", 0.5);
        assert!(matches!(result, Err(TrackError::StationNotFound(_))));

        let result = network.resolve_position("Aluva", "Nonexistent", 0.5);
        assert!(matches!(result, Err(TrackError::StationNotFound(_))));
    }

    #[test]
    fn test_polyline_length() {
        let network = network();
        // Two segments, 21 points each, shared endpoints kept
        assert_eq!(network.track_polyline().0.len(), 42);
    }

    #[test]
    fn test_station_lookups() {
        let network = network();

        assert!(network.station(&"aluva".into()).is_some());
        assert!(network.station(&"missing".into()).is_none());
        assert!(network.station_named("Aluva").is_some());
        // Case-sensitive on purpose
        assert!(network.station_named("aluva").is_none());
    }

    #[test]
    fn test_stations_near() {
        let network = network();
        let aluva = Point::new(76.3530, 10.1102);

        // 100 m around Aluva finds only Aluva
        let hits = network.stations_near(aluva, 100.0);
        assert_eq!(hits.len(), 1);
        assert_eq!(&*hits[0].name, "Aluva");

        // 2 km also reaches Pulinchode
        let hits = network.stations_near(aluva, 2_000.0);
        assert_eq!(hits.len(), 2);

        // Degenerate radii return nothing
        assert!(network.stations_near(aluva, 0.0).is_empty());
        assert!(network.stations_near(aluva, f64::NAN).is_empty());
    }

    #[test]
    fn test_nearest_stations_ordering() {
        let network = network();
        let near_pulinchode = Point::new(76.3450, 10.0990);

        let nearest = network.nearest_stations(near_pulinchode, 2);
        assert_eq!(nearest.len(), 2);
        assert_eq!(&*nearest[0].name, "Pulinchode");
    }

    #[test]
    fn test_nearest_track_point_snaps_onto_track() {
        let network = network();

        // A point sitting exactly on a station snaps to that station
        let aluva = Point::new(76.3530, 10.1102);
        let snapped = network.nearest_track_point(aluva).unwrap();
        assert!((snapped.x() - aluva.x()).abs() < 1e-9);
        assert!((snapped.y() - aluva.y()).abs() < 1e-9);

        // A point off to the side lands within the track bounding box
        let offside = Point::new(76.3600, 10.1000);
        let snapped = network.nearest_track_point(offside).unwrap();
        assert!(snapped.x() <= 76.3530 && snapped.x() >= 76.3420);
    }

    #[test]
    fn test_distance_to_track() {
        let network = network();

        // On the track
        let aluva = Point::new(76.3530, 10.1102);
        assert!(network.distance_to_track(aluva).unwrap() < 1.0);

        // Roughly 770 m due west of Aluva
        let west = Point::new(76.3460, 10.1102);
        let distance = network.distance_to_track(west).unwrap();
        assert!(distance > 200.0 && distance < 800.0);

        // A line with no segments has no track to measure against
        let lone = LineDefinition::new(
            "line-1",
            "Line 1",
            vec![StationRecord::new("aluva", "Aluva", Point::new(76.3530, 10.1102))],
        );
        let lone = StaticTrackNetwork::new(lone).unwrap();
        assert!(lone.distance_to_track(aluva).is_none());
    }
}
