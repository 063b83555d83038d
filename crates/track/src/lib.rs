//! # metro-track
//!
//! Track geometry core for a metro line live map.
//!
//! ## Features
//!
//! - **Build once, read many**: a [`StaticTrackNetwork`] is constructed from
//!   an ordered station list at startup and immutable afterwards
//! - **Precomputed segments**: every adjacent station pair gets a fixed
//!   21-waypoint smooth-step polyline, so position queries are O(1)
//! - **Easing fallback**: pairs without a precomputed segment interpolate
//!   directly between the raw station coordinates
//! - **Spatial queries**: R-tree backed radius, nearest-station, and
//!   track-snapping lookups
//!
//! ## Example
//!
//! ```
//! use metro_track::prelude::*;
//! use geo::Point;
//!
//! let line = LineDefinition::new(
//!     "line-1",
//!     "Line 1",
//!     vec![
//!         StationRecord::new("aluva", "Aluva", Point::new(76.3530, 10.1102)),
//!         StationRecord::new("pulinchode", "Pulinchode", Point::new(76.3445, 10.0987)),
//!     ],
//! );
//!
//! let network = StaticTrackNetwork::new(line).unwrap();
//!
//! // A train halfway between the two stations
//! let position = network.resolve_position("Aluva", "Pulinchode", 0.5).unwrap();
//! assert!(position.y() < 10.1102 && position.y() > 10.0987);
//!
//! // The full polyline for drawing the line on a map
//! assert_eq!(network.track_polyline().0.len(), 21);
//! ```

pub mod identifiers;
pub mod models;
pub mod provider;
pub mod segment;
pub mod spatial;

// Re-exports for convenience
pub mod prelude {
    pub use crate::identifiers::*;
    pub use crate::models::{traits::TrackNetwork, types::*};
    pub use crate::provider::StaticTrackNetwork;
    pub use crate::segment::{SegmentTable, TrackSegment, WAYPOINTS_PER_SEGMENT};
}

pub use prelude::*;
