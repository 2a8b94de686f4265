//! Loading the stop list and reference route.
//!
//! Both inputs are GeoJSON FeatureCollections produced by the offline
//! KML/CSV converter: the route as LineString or MultiLineString features,
//! the stops as Point features with a `name` property. GeoJSON positions are
//! `[longitude, latitude]`. Positions that are not valid coordinates are
//! skipped here so they never reach the geometry code.

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::domain::{Coordinate, Stop, StopIndex};
use crate::geo::Polyline;

/// Name given to stops without a `name` property.
const DEFAULT_STOP_NAME: &str = "Stop";

/// Errors loading network data.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid GeoJSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// The single reference route and its ordered stops for one session.
///
/// Stop order defines each stop's [`StopIndex`]; the set does not change
/// while the session runs.
#[derive(Debug, Clone, Default)]
pub struct TransitNetwork {
    stops: Vec<Stop>,
    route: Polyline,
}

impl TransitNetwork {
    pub fn new(stops: Vec<Stop>, route: Polyline) -> Self {
        Self { stops, route }
    }

    /// Load stops and route from GeoJSON files.
    pub fn load(stops_path: impl AsRef<Path>, route_path: impl AsRef<Path>) -> Result<Self, DataError> {
        Ok(Self {
            stops: load_stops(stops_path)?,
            route: load_route(route_path)?,
        })
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn stop(&self, index: StopIndex) -> Option<&Stop> {
        self.stops.get(index.0)
    }

    pub fn route(&self) -> &Polyline {
        &self.route
    }
}

fn read(path: &Path) -> Result<String, DataError> {
    std::fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Load the route polyline from a GeoJSON file.
pub fn load_route(path: impl AsRef<Path>) -> Result<Polyline, DataError> {
    parse_route(&read(path.as_ref())?)
}

/// Load the stop list from a GeoJSON file.
pub fn load_stops(path: impl AsRef<Path>) -> Result<Vec<Stop>, DataError> {
    parse_stops(&read(path.as_ref())?)
}

/// Parse a route FeatureCollection.
///
/// LineString and MultiLineString features are concatenated in file order.
/// Other geometry types are ignored.
pub fn parse_route(json: &str) -> Result<Polyline, DataError> {
    let collection: Value = serde_json::from_str(json)?;

    let mut points = Vec::new();
    for geometry in features(&collection).filter_map(|f| f.get("geometry")) {
        let coordinates = geometry.get("coordinates");
        match geometry.get("type").and_then(Value::as_str) {
            Some("LineString") => {
                points.extend(line_positions(coordinates));
            }
            Some("MultiLineString") => {
                for line in coordinates.and_then(Value::as_array).into_iter().flatten() {
                    points.extend(line_positions(Some(line)));
                }
            }
            _ => {}
        }
    }

    debug!(points = points.len(), "parsed route");
    Ok(Polyline::new(points))
}

/// Parse a stop FeatureCollection. Point features become stops in file order.
pub fn parse_stops(json: &str) -> Result<Vec<Stop>, DataError> {
    let collection: Value = serde_json::from_str(json)?;

    let stops: Vec<Stop> = features(&collection)
        .filter_map(|feature| {
            let geometry = feature.get("geometry")?;
            if geometry.get("type").and_then(Value::as_str) != Some("Point") {
                return None;
            }
            let coord = position(geometry.get("coordinates")?)?;
            let name = feature
                .get("properties")
                .and_then(|p| p.get("name"))
                .and_then(Value::as_str)
                .filter(|n| !n.is_empty())
                .unwrap_or(DEFAULT_STOP_NAME);
            Some(Stop::new(coord, name))
        })
        .collect();

    debug!(stops = stops.len(), "parsed stops");
    Ok(stops)
}

fn features(collection: &Value) -> impl Iterator<Item = &Value> {
    collection
        .get("features")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

fn line_positions(coordinates: Option<&Value>) -> impl Iterator<Item = Coordinate> + '_ {
    coordinates
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(position)
}

/// A GeoJSON position `[lon, lat, ...]` as a coordinate.
fn position(value: &Value) -> Option<Coordinate> {
    let pair = value.as_array()?;
    let lon = pair.first()?.as_f64()?;
    let lat = pair.get(1)?.as_f64()?;
    Coordinate::from_lon_lat(lon, lat).ok()
}
