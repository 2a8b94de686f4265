//! Data transfer objects for web requests and responses.
//!
//! Coordinates serialize as `[lat, lon]`; distances are in meters.

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, DistanceSource, Itinerary, ItineraryStop, Stop, StopIndex, TransitLeg, WalkLeg};
use crate::geo::Polyline;
use crate::planner::NearestMode;

/// Request to plan an itinerary.
#[derive(Debug, Deserialize)]
pub struct PlanItineraryRequest {
    /// Origin as "lat, lon"
    pub from: String,

    /// Destination as "lat, lon"
    pub to: String,

    /// How to choose stops (defaults to the planner's configured mode)
    pub mode: Option<NearestMode>,
}

/// A stop in responses.
#[derive(Debug, Serialize)]
pub struct StopResult {
    pub index: StopIndex,
    pub name: String,
    pub coord: Coordinate,
}

impl StopResult {
    pub fn from_stop(index: StopIndex, stop: &Stop) -> Self {
        Self {
            index,
            name: stop.name.clone(),
            coord: stop.coord,
        }
    }

    pub fn from_itinerary_stop(stop: &ItineraryStop) -> Self {
        Self {
            index: stop.index,
            name: stop.name.clone(),
            coord: stop.coord,
        }
    }
}

/// All stops on the route, in route order.
#[derive(Debug, Serialize)]
pub struct StopsResponse {
    pub stops: Vec<StopResult>,
}

/// The reference route polyline.
#[derive(Debug, Serialize)]
pub struct RouteGeometryResponse {
    pub points: Vec<Coordinate>,
    pub length_m: f64,
}

impl RouteGeometryResponse {
    pub fn from_polyline(route: &Polyline) -> Self {
        Self {
            points: route.points().to_vec(),
            length_m: route.length_m(),
        }
    }
}

/// A walking leg.
#[derive(Debug, Serialize)]
pub struct WalkLegResult {
    pub path: Vec<Coordinate>,

    /// Path is a straight line, not a walking route
    pub approximate: bool,

    pub distance_m: f64,

    /// "walking" or "geodesic"
    pub distance_source: &'static str,
}

impl WalkLegResult {
    pub fn from_leg(leg: &WalkLeg) -> Self {
        Self {
            path: leg.path.clone(),
            approximate: leg.approximate,
            distance_m: leg.distance_m,
            distance_source: match leg.distance_source {
                DistanceSource::Walking => "walking",
                DistanceSource::Geodesic => "geodesic",
            },
        }
    }
}

/// The ride along the route.
#[derive(Debug, Serialize)]
pub struct TransitLegResult {
    pub path: Vec<Coordinate>,
    pub distance_m: f64,
}

impl TransitLegResult {
    pub fn from_leg(leg: &TransitLeg) -> Self {
        Self {
            path: leg.path.clone(),
            distance_m: leg.distance_m,
        }
    }
}

/// A planned itinerary.
#[derive(Debug, Serialize)]
pub struct ItineraryResponse {
    pub board: StopResult,
    pub alight: StopResult,
    pub access: WalkLegResult,

    /// Absent when the route could not be matched
    pub transit: Option<TransitLegResult>,

    pub egress: WalkLegResult,
    pub total_distance_m: f64,

    /// One-line human readable description
    pub summary: String,
}

impl ItineraryResponse {
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        Self {
            board: StopResult::from_itinerary_stop(&itinerary.board),
            alight: StopResult::from_itinerary_stop(&itinerary.alight),
            access: WalkLegResult::from_leg(&itinerary.access),
            transit: itinerary.transit.as_ref().map(TransitLegResult::from_leg),
            egress: WalkLegResult::from_leg(&itinerary.egress),
            total_distance_m: itinerary.total_distance_m(),
            summary: summary(itinerary),
        }
    }
}

fn km(meters: f64) -> String {
    format!("{:.2}", meters / 1000.0)
}

/// E.g. "Board at Kawe → Alight at Posta • Walk ~0.40 km + Bus ~5.21 km + Walk ~0.12 km".
fn summary(itinerary: &Itinerary) -> String {
    let bus = itinerary
        .transit
        .as_ref()
        .map_or_else(|| "—".to_string(), |t| km(t.distance_m));
    format!(
        "Board at {} → Alight at {} • Walk ~{} km + Bus ~{} km + Walk ~{} km",
        itinerary.board.name,
        itinerary.alight.name,
        km(itinerary.access.distance_m),
        bus,
        km(itinerary.egress.distance_m),
    )
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
