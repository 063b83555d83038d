//! R-tree nodes for spatial lookups over a built line.
//!
//! Queries run in two stages: a fast Euclidean envelope filter inside the
//! R-tree, then an exact Haversine check on the survivors. Euclidean
//! distance over raw degrees drifts with latitude, so it is never trusted
//! for the final answer.

use std::sync::Arc;

use geo::{Line, Point};
use rstar::{PointDistance, RTreeObject, AABB};

use crate::models::types::StationRecord;

// ============================================================================
// Station Node
// ============================================================================

#[derive(Clone)]
pub struct StationNode {
    pub station: Arc<StationRecord>,
}

impl StationNode {
    pub fn new(station: Arc<StationRecord>) -> Self {
        Self { station }
    }

    fn coords(&self) -> [f64; 2] {
        [self.station.location.x(), self.station.location.y()]
    }
}

impl RTreeObject for StationNode {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.coords())
    }
}

impl PointDistance for StationNode {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let [x, y] = self.coords();
        let dx = x - point[0];
        let dy = y - point[1];
        dx * dx + dy * dy
    }
}

// ============================================================================
// Track Span Node
// ============================================================================

/// One waypoint-to-waypoint span of a precomputed segment.
///
/// Indexing the 20 spans of every segment rather than whole segments keeps
/// the envelopes tight around the curve.
#[derive(Clone)]
pub struct TrackSpanNode {
    pub span: Line,
    pub segment_index: usize,
    aabb: AABB<[f64; 2]>,
}

impl TrackSpanNode {
    pub fn new(span: Line, segment_index: usize) -> Self {
        let start = [span.start.x, span.start.y];
        let end = [span.end.x, span.end.y];
        let aabb = AABB::from_corners(start, end);

        Self {
            span,
            segment_index,
            aabb,
        }
    }

    /// Closest point of the span to `point`, in planar degree space.
    pub fn closest_point(&self, point: Point) -> Point {
        let a = [self.span.start.x, self.span.start.y];
        let b = [self.span.end.x, self.span.end.y];
        let p = [point.x(), point.y()];

        let ab = [b[0] - a[0], b[1] - a[1]];
        let ab_ab = ab[0] * ab[0] + ab[1] * ab[1];

        if ab_ab == 0.0 {
            return Point::new(a[0], a[1]);
        }

        let ap = [p[0] - a[0], p[1] - a[1]];
        let t = ((ab[0] * ap[0] + ab[1] * ap[1]) / ab_ab).clamp(0.0, 1.0);
        Point::new(a[0] + t * ab[0], a[1] + t * ab[1])
    }
}

impl RTreeObject for TrackSpanNode {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.aabb
    }
}

impl PointDistance for TrackSpanNode {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let closest = self.closest_point(Point::new(point[0], point[1]));
        let dx = point[0] - closest.x();
        let dy = point[1] - closest.y();
        dx * dx + dy * dy
    }
}
