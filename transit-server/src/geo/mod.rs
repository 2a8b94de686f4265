//! Route geometry: distances, snapping and sub-path extraction.
//!
//! Everything here is pure and synchronous. Inputs are validated
//! [`Coordinate`](crate::domain::Coordinate)s, so the only failure mode is a
//! polyline too short to have a direction.

mod distance;
mod matcher;
mod planar;
mod polyline;
mod subpath;

pub use distance::{EARTH_RADIUS_M, haversine_m};
pub use matcher::{Projection, SegmentProjection, project_onto_segment, project_point_onto_polyline};
pub use planar::{LocalFrame, PlanarPoint};
pub use polyline::{CumulativeDistances, Polyline};
pub use subpath::extract_subpath;

/// Errors from geometric operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    /// The polyline has fewer than two points.
    #[error("polyline has {points} point(s); at least 2 are required")]
    DegeneratePolyline { points: usize },
}
