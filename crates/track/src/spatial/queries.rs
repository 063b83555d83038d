//! Geodesic distance helpers.
//!
//! Uses the Haversine formula for accurate distances on Earth's surface.

use geo::{Closest, ClosestPoint, HaversineDistance, Line, Point};

/// Haversine distance between two points in meters.
pub fn haversine_distance(p1: Point, p2: Point) -> f64 {
    p1.haversine_distance(&p2)
}

/// Haversine distance from a point to a track span in meters.
///
/// The closest point on the span is found in planar degree space, then
/// measured geodesically. Good to well under a meter at track-span scale.
pub fn haversine_distance_to_span(point: Point, span: Line) -> f64 {
    match span.closest_point(&point) {
        Closest::Intersection(p) | Closest::SinglePoint(p) => haversine_distance(point, p),
        Closest::Indeterminate => f64::INFINITY,
    }
}

/// Convert meters to degrees at the equator.
///
/// Only used to size R-tree envelope queries; results are always re-checked
/// with the exact Haversine distance afterwards.
pub fn meters_to_degrees_approx(meters: f64) -> f64 {
    meters / 111_320.0
}
