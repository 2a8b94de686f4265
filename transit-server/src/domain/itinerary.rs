//! Three-leg itinerary: walk, ride along the route, walk.

use super::{Coordinate, StopIndex};

/// Where a leg's distance figure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceSource {
    /// Resolved by the walking router.
    Walking,
    /// Great-circle estimate (router unavailable or straight-line mode).
    Geodesic,
}

/// A walking leg (access or egress).
#[derive(Debug, Clone, PartialEq)]
pub struct WalkLeg {
    /// Path from the leg's start to its end, at least two points.
    pub path: Vec<Coordinate>,

    /// True when `path` is a straight line because no walking path resolved.
    pub approximate: bool,

    /// Leg length in meters.
    pub distance_m: f64,

    pub distance_source: DistanceSource,
}

/// The in-vehicle leg along the reference route.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitLeg {
    /// Route sub-path ordered in the direction of travel (board to alight).
    pub path: Vec<Coordinate>,

    /// Route-relative distance between board and alight, in meters.
    pub distance_m: f64,
}

/// A stop chosen as the board or alight point.
#[derive(Debug, Clone, PartialEq)]
pub struct ItineraryStop {
    pub index: StopIndex,
    pub name: String,
    pub coord: Coordinate,
}

/// A planned trip. Built once per query and never modified.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    pub board: ItineraryStop,
    pub alight: ItineraryStop,
    pub access: WalkLeg,

    /// `None` when the reference route cannot be matched (fewer than two points).
    pub transit: Option<TransitLeg>,

    pub egress: WalkLeg,
}

impl Itinerary {
    /// Total distance over all legs, in meters.
    pub fn total_distance_m(&self) -> f64 {
        self.access.distance_m
            + self.transit.as_ref().map_or(0.0, |t| t.distance_m)
            + self.egress.distance_m
    }
}
