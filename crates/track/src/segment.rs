//! Precomputed track segments between adjacent stations.
//!
//! A segment is built once per consecutive station pair, in declaration
//! order only. Each one carries a fixed-length waypoint polyline sampled
//! from a smooth-step curve between the two endpoints, so per-tick position
//! queries reduce to an array index plus one linear blend.

use std::collections::HashMap;
use std::sync::Arc;

use geo::{Coord, LineString, Point};

use crate::identifiers::StationIdentifier;
use crate::models::types::StationRecord;
use crate::spatial::queries::haversine_distance;

/// Waypoints per segment: 20 interpolation intervals plus both endpoints.
pub const WAYPOINTS_PER_SEGMENT: usize = 21;

/// Smooth-step easing: `t² · (3 − 2t)`.
///
/// Zero first derivative at both ends, so motion sampled along the curve
/// accelerates out of the origin station and decelerates into the next one
/// instead of moving linearly. Input outside [0, 1] is clamped.
pub fn smooth_step(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// A precomputed run of track between two adjacent stations.
///
/// Directional: the segment from A to B is distinct from B to A, and only
/// the declared direction is ever built.
#[derive(Clone, Debug)]
pub struct TrackSegment {
    pub from: StationIdentifier,
    pub to: StationIdentifier,
    pub from_name: Arc<str>,
    pub to_name: Arc<str>,
    waypoints: Vec<Point>,
    distance_m: f64,
}

impl TrackSegment {
    /// Sample [`WAYPOINTS_PER_SEGMENT`] points of the smooth-step curve
    /// between two stations, blending latitude and longitude independently.
    pub fn between(from: &StationRecord, to: &StationRecord) -> Self {
        let intervals = (WAYPOINTS_PER_SEGMENT - 1) as f64;
        let waypoints = (0..WAYPOINTS_PER_SEGMENT)
            .map(|j| {
                let s = smooth_step(j as f64 / intervals);
                Point::new(
                    lerp(from.location.x(), to.location.x(), s),
                    lerp(from.location.y(), to.location.y(), s),
                )
            })
            .collect();

        Self {
            from: from.id.clone(),
            to: to.id.clone(),
            from_name: from.name.clone(),
            to_name: to.name.clone(),
            waypoints,
            distance_m: haversine_distance(from.location, to.location),
        }
    }

    pub fn waypoints(&self) -> &[Point] {
        &self.waypoints
    }

    /// Great-circle length of the segment in meters.
    ///
    /// Informational; the resolver never consumes it.
    pub fn distance_m(&self) -> f64 {
        self.distance_m
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_m / 1000.0
    }

    /// Map a progress fraction onto the waypoint polyline.
    ///
    /// `progress × (N − 1)` selects the surrounding waypoint pair; the
    /// fractional remainder blends linearly between them. The caller is
    /// expected to hand in a value already clamped to [0, 1].
    pub fn point_at(&self, progress: f64) -> Point {
        let exact = progress * (self.waypoints.len() - 1) as f64;
        let base = exact.floor() as usize;

        if base >= self.waypoints.len() - 1 {
            return self.waypoints[self.waypoints.len() - 1];
        }

        let fraction = exact - base as f64;
        let a = self.waypoints[base];
        let b = self.waypoints[base + 1];
        Point::new(lerp(a.x(), b.x(), fraction), lerp(a.y(), b.y(), fraction))
    }
}

/// All precomputed segments of a line, indexed by station name pair.
///
/// Lookups are exact and case-sensitive on the declared direction only;
/// a reverse-direction query misses and leaves the caller to its fallback.
#[derive(Clone, Debug, Default)]
pub struct SegmentTable {
    segments: Vec<TrackSegment>,
    by_name: HashMap<Arc<str>, HashMap<Arc<str>, usize>>,
}

impl SegmentTable {
    /// Build one segment per consecutive station pair.
    ///
    /// Fewer than two stations produce an empty table; this is not an error.
    /// Duplicate station names overwrite their index entry, last declaration
    /// wins.
    pub fn build(stations: &[Arc<StationRecord>]) -> Self {
        let mut segments = Vec::with_capacity(stations.len().saturating_sub(1));
        let mut by_name: HashMap<Arc<str>, HashMap<Arc<str>, usize>> = HashMap::new();

        for pair in stations.windows(2) {
            let segment = TrackSegment::between(&pair[0], &pair[1]);
            by_name
                .entry(segment.from_name.clone())
                .or_default()
                .insert(segment.to_name.clone(), segments.len());
            segments.push(segment);
        }

        Self { segments, by_name }
    }

    pub fn get(&self, from: &str, to: &str) -> Option<&TrackSegment> {
        let index = *self.by_name.get(from)?.get(to)?;
        self.segments.get(index)
    }

    pub fn segments(&self) -> &[TrackSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Concatenate every segment's waypoints in declaration order.
    ///
    /// Shared endpoints between adjacent segments are not deduplicated, so a
    /// line of S segments yields `S × 21` points. Used to draw the full
    /// track polyline.
    pub fn polyline(&self) -> LineString {
        LineString::from_iter(self.segments.iter().flat_map(|segment| {
            segment.waypoints.iter().map(|p| Coord {
                x: p.x(),
                y: p.y(),
            })
        }))
    }
}
