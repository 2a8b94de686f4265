//! Local tangent-plane approximation.
//!
//! Maps coordinates to meters on a plane anchored at a reference latitude.
//! Only valid over short (city-scale) spans: it does not account for
//! convergence of meridians away from the anchor and does not handle
//! crossing the antimeridian.

use crate::domain::Coordinate;

use super::distance::EARTH_RADIUS_M;

/// A point in a local planar frame, in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarPoint {
    pub x: f64,
    pub y: f64,
}

impl PlanarPoint {
    pub fn distance_to(&self, other: &PlanarPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Equirectangular frame anchored at a reference latitude.
#[derive(Debug, Clone, Copy)]
pub struct LocalFrame {
    cos_ref: f64,
}

impl LocalFrame {
    pub fn anchored_at(reference_lat: f64) -> Self {
        Self {
            cos_ref: reference_lat.to_radians().cos(),
        }
    }

    /// `x = R * lon * cos(ref_lat)`, `y = R * lat`, angles in radians.
    pub fn project(&self, c: Coordinate) -> PlanarPoint {
        PlanarPoint {
            x: EARTH_RADIUS_M * c.lon().to_radians() * self.cos_ref,
            y: EARTH_RADIUS_M * c.lat().to_radians(),
        }
    }
}
