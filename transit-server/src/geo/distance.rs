//! Great-circle distance.

use crate::domain::Coordinate;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance between two coordinates, in meters.
///
/// Returns exactly `0.0` for identical inputs. The haversine term is clamped
/// to `[0, 1]` so rounding near antipodal points cannot produce `NaN`.
pub fn haversine_m(a: Coordinate, b: Coordinate) -> f64 {
    if a == b {
        return 0.0;
    }

    let phi1 = a.lat().to_radians();
    let phi2 = b.lat().to_radians();
    let d_phi = (b.lat() - a.lat()).to_radians();
    let d_lambda = (b.lon() - a.lon()).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
}
