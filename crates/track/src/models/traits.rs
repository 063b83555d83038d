//! The provider seam between a built line and its consumers.
//!
//! Everything downstream of construction (the movement simulation, a map
//! frontend, the probe tool) talks to this trait, so a network can be
//! in-memory, loaded from a bundle, or faked in tests without the consumer
//! noticing.

use std::sync::Arc;

use geo::{LineString, Point};

use crate::identifiers::{LineIdentifier, StationIdentifier};
use crate::models::types::{Result, StationRecord};
use crate::segment::TrackSegment;

/// Read-only access to one line's topology and precomputed geometry.
///
/// Implementations are immutable after construction and safe to share
/// between any number of concurrent readers.
pub trait TrackNetwork: Send + Sync {
    fn line_id(&self) -> &LineIdentifier;
    fn line_name(&self) -> &str;

    // ---- Lookups ----

    fn station(&self, id: &StationIdentifier) -> Option<Arc<StationRecord>>;

    /// Exact, case-sensitive lookup by display name.
    fn station_named(&self, name: &str) -> Option<Arc<StationRecord>>;

    /// All stations in declaration order.
    fn stations(&self) -> &[Arc<StationRecord>];

    /// All precomputed segments in declaration order.
    fn segments(&self) -> &[TrackSegment];

    /// The precomputed segment from `from` to `to`, declared direction only.
    fn segment_between(&self, from: &str, to: &str) -> Option<&TrackSegment>;

    // ---- Position resolution ----

    /// Resolve a (from, to, progress) triple to a coordinate.
    ///
    /// Progress is clamped to [0, 1]. When the pair has a precomputed
    /// segment, the result comes from its waypoint polyline; otherwise the
    /// two stations' raw coordinates are blended directly with smooth-step
    /// easing. Only a station name unknown to the line is an error.
    fn resolve_position(&self, from: &str, to: &str, progress: f64) -> Result<Point>;

    /// Every segment's waypoints concatenated in declaration order, shared
    /// endpoints repeated.
    fn track_polyline(&self) -> LineString;

    // ---- Spatial queries ----

    /// Stations within `radius_m` meters of a point.
    fn stations_near(&self, point: Point, radius_m: f64) -> Vec<Arc<StationRecord>>;

    /// The `n` stations closest to a point, nearest first.
    fn nearest_stations(&self, point: Point, n: usize) -> Vec<Arc<StationRecord>>;

    /// Snap a coordinate onto the nearest point of the precomputed track.
    ///
    /// `None` only when the line has no segments.
    fn nearest_track_point(&self, point: Point) -> Option<Point>;

    /// Haversine distance in meters from a coordinate to the track.
    ///
    /// `None` only when the line has no segments.
    fn distance_to_track(&self, point: Point) -> Option<f64>;
}
