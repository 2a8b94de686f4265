//! OSRM route service response types.
//!
//! Only the fields we read are modelled, and all of them are optional: the
//! shape of a third-party response is checked here rather than trusted.

use serde::Deserialize;

use crate::domain::Coordinate;

use super::error::RoutingError;

/// Body of `GET /route/v1/{profile}/{coordinates}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteResponse {
    /// `"Ok"` on success; other values name the failure (e.g. `"NoRoute"`).
    #[serde(default)]
    pub code: Option<String>,

    /// Candidate routes, best first.
    #[serde(default)]
    pub routes: Option<Vec<RouteCandidate>>,
}

/// One candidate route.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteCandidate {
    /// Length in meters.
    #[serde(default)]
    pub distance: Option<f64>,

    /// Present when the request asked for `geometries=geojson`.
    #[serde(default)]
    pub geometry: Option<RouteGeometry>,
}

/// GeoJSON LineString geometry.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteGeometry {
    /// `[longitude, latitude]` pairs.
    #[serde(default)]
    pub coordinates: Option<Vec<Vec<f64>>>,
}

impl RouteResponse {
    /// Parse a response body.
    pub fn from_body(body: &str) -> Result<Self, RoutingError> {
        let response: RouteResponse =
            serde_json::from_str(body).map_err(|e| RoutingError::Malformed(e.to_string()))?;

        match response.code.as_deref() {
            None | Some("Ok") => Ok(response),
            Some(code) => Err(RoutingError::NoRoute {
                code: code.to_string(),
            }),
        }
    }

    fn first_route(&self) -> Result<&RouteCandidate, RoutingError> {
        self.routes
            .as_ref()
            .and_then(|routes| routes.first())
            .ok_or_else(|| RoutingError::Malformed("no routes in response".to_string()))
    }

    /// Distance of the first route, in meters.
    pub fn first_distance(&self) -> Result<f64, RoutingError> {
        let distance = self
            .first_route()?
            .distance
            .ok_or_else(|| RoutingError::Malformed("route has no distance".to_string()))?;

        if !distance.is_finite() || distance < 0.0 {
            return Err(RoutingError::Malformed(format!(
                "invalid route distance {distance}"
            )));
        }
        Ok(distance)
    }

    /// Geometry of the first route, converted to (lat, lon) order.
    pub fn first_path(&self) -> Result<Vec<Coordinate>, RoutingError> {
        let pairs = self
            .first_route()?
            .geometry
            .as_ref()
            .and_then(|g| g.coordinates.as_ref())
            .ok_or_else(|| RoutingError::Malformed("route has no geometry".to_string()))?;

        coordinates_from_lon_lat(pairs)
    }
}

/// Convert wire `[lon, lat, ...]` pairs into coordinates.
///
/// Extra elements (altitude) are ignored. Any pair with fewer than two
/// values or outside the valid range rejects the whole list.
pub fn coordinates_from_lon_lat(pairs: &[Vec<f64>]) -> Result<Vec<Coordinate>, RoutingError> {
    pairs
        .iter()
        .map(|pair| match pair.as_slice() {
            [lon, lat, ..] => Coordinate::from_lon_lat(*lon, *lat)
                .map_err(|e| RoutingError::Malformed(format!("bad coordinate {pair:?}: {e}"))),
            _ => Err(RoutingError::Malformed(format!(
                "coordinate pair {pair:?} has fewer than 2 values"
            ))),
        })
        .collect()
}

/// Format a coordinate for a request path: longitude first.
pub fn lon_lat_param(c: Coordinate) -> String {
    format!("{},{}", c.lon(), c.lat())
}
