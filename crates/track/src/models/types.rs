//! Core data types for line topology.

use std::sync::Arc;

use geo::Point;

use crate::identifiers::{LineIdentifier, StationIdentifier};

// ============================================================================
// Data Structures
// ============================================================================

/// A single station on a metro line.
///
/// Locations are WGS84 decimal degrees with `x` = longitude and `y` = latitude,
/// following the `geo` convention. Records are immutable once the network that
/// owns them has been built.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StationRecord {
    pub id: StationIdentifier,
    pub name: Arc<str>,
    #[cfg_attr(feature = "serde", serde(with = "point_degrees"))]
    pub location: Point,
}

impl StationRecord {
    pub fn new(id: impl Into<StationIdentifier>, name: impl AsRef<str>, location: Point) -> Self {
        Self {
            id: id.into(),
            name: name.as_ref().into(),
            location,
        }
    }
}

/// An ordered station sequence describing one line end to end.
///
/// This is the value handed to [`StaticTrackNetwork::new`] at startup; there
/// is no file format or wire protocol behind it unless a caller opts into the
/// `serde` feature.
///
/// [`StaticTrackNetwork::new`]: crate::provider::StaticTrackNetwork::new
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineDefinition {
    pub id: LineIdentifier,
    pub name: Arc<str>,
    pub stations: Vec<StationRecord>,
}

impl LineDefinition {
    pub fn new(
        id: impl Into<LineIdentifier>,
        name: impl AsRef<str>,
        stations: Vec<StationRecord>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.as_ref().into(),
            stations,
        }
    }
}

/// Serialize a `geo::Point` as `{ "lat": .., "lng": .. }`.
///
/// Station tables in the wild carry named latitude/longitude fields rather
/// than the `geo` x/y pair, so the serde representation follows them.
#[cfg(feature = "serde")]
mod point_degrees {
    use geo::Point;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Degrees {
        lat: f64,
        lng: f64,
    }

    pub fn serialize<S: Serializer>(point: &Point, serializer: S) -> Result<S::Ok, S::Error> {
        Degrees {
            lat: point.y(),
            lng: point.x(),
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Point, D::Error> {
        let degrees = Degrees::deserialize(deserializer)?;
        Ok(Point::new(degrees.lng, degrees.lat))
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    #[error("Station not found: {0}")]
    StationNotFound(String),

    #[error("Invalid line: {0}")]
    InvalidLine(String),
}

pub type Result<T> = std::result::Result<T, TrackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_record_new() {
        let station = StationRecord::new("aluva", "Aluva", Point::new(76.3530, 10.1102));
        assert_eq!(station.id, StationIdentifier::new("aluva"));
        assert_eq!(&*station.name, "Aluva");
        assert_eq!(station.location.y(), 10.1102);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_station_serde_round_trip() {
        let station = StationRecord::new("aluva", "Aluva", Point::new(76.3530, 10.1102));
        let json = serde_json::to_string(&station).unwrap();
        assert!(json.contains("\"lat\":10.1102"));
        assert!(json.contains("\"lng\":76.353"));

        let back: StationRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, station);
    }
}
