//! GeoJSON output for the built line.

use std::path::Path;

use anyhow::{Context, Result};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};
use metro_track::TrackNetwork;

/// Write the full track polyline plus one point feature per station.
pub fn write_line_geojson(path: &Path, network: &dyn TrackNetwork) -> Result<()> {
    let mut features = Vec::with_capacity(network.stations().len() + 1);

    let polyline: Vec<Vec<f64>> = network
        .track_polyline()
        .0
        .iter()
        .map(|c| vec![c.x, c.y])
        .collect();

    let mut track_properties = serde_json::Map::new();
    track_properties.insert(
        "feature_type".to_string(),
        serde_json::json!("track"),
    );
    track_properties.insert(
        "line".to_string(),
        serde_json::json!(network.line_name()),
    );

    features.push(Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::LineString(polyline))),
        id: None,
        properties: Some(track_properties),
        foreign_members: None,
    });

    for station in network.stations() {
        let mut properties = serde_json::Map::new();
        properties.insert("feature_type".to_string(), serde_json::json!("station"));
        properties.insert("name".to_string(), serde_json::json!(&*station.name));
        properties.insert("id".to_string(), serde_json::json!(station.id.as_str()));

        features.push(Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Point(vec![
                station.location.x(),
                station.location.y(),
            ]))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        });
    }

    let collection = GeoJson::FeatureCollection(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    });

    std::fs::write(path, collection.to_string())
        .with_context(|| format!("Failed to write GeoJSON to {}", path.display()))?;

    Ok(())
}
