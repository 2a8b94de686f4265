//! Snapping points onto a polyline.

use crate::domain::Coordinate;

use super::GeometryError;
use super::distance::haversine_m;
use super::planar::LocalFrame;
use super::polyline::Polyline;

/// Result of projecting a point onto a polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Index of the matched segment (from point `segment` to `segment + 1`).
    pub segment: usize,

    /// Fractional position along the segment, always within `[0, 1]`.
    pub t: f64,

    /// Perpendicular distance from the query point, in meters (local frame).
    pub distance_m: f64,

    /// The matched point on the polyline.
    pub point: Coordinate,

    /// Distance along the polyline from its start to `point`, in meters.
    pub route_distance_m: f64,
}

/// Projection of a point onto a single segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProjection {
    pub t: f64,
    pub distance_m: f64,
    pub point: Coordinate,
}

/// Project `p` onto the segment `a`-`b` in `frame`.
///
/// `t` is clamped to `[0, 1]`: points beyond either end snap to that end.
/// A zero-length segment projects to `a`.
pub fn project_onto_segment(
    p: Coordinate,
    a: Coordinate,
    b: Coordinate,
    frame: &LocalFrame,
) -> SegmentProjection {
    let pxy = frame.project(p);
    let axy = frame.project(a);
    let bxy = frame.project(b);

    let vx = bxy.x - axy.x;
    let vy = bxy.y - axy.y;
    let wx = pxy.x - axy.x;
    let wy = pxy.y - axy.y;
    let vv = vx * vx + vy * vy;

    let t = if vv > 0.0 {
        ((wx * vx + wy * vy) / vv).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let dx = pxy.x - (axy.x + t * vx);
    let dy = pxy.y - (axy.y + t * vy);

    SegmentProjection {
        t,
        distance_m: dx.hypot(dy),
        point: a.lerp(&b, t),
    }
}

/// Find the closest point on `polyline` to `point`.
///
/// Each query uses a planar frame anchored at the query point's own latitude.
/// The segment with the smallest perpendicular distance wins; on ties the
/// lowest segment index is kept. The reported route distance uses geodesic
/// segment lengths, not planar ones.
///
/// Fails with [`GeometryError::DegeneratePolyline`] for fewer than two points.
pub fn project_point_onto_polyline(
    point: Coordinate,
    polyline: &Polyline,
) -> Result<Projection, GeometryError> {
    if polyline.is_degenerate() {
        return Err(GeometryError::DegeneratePolyline {
            points: polyline.len(),
        });
    }

    let frame = LocalFrame::anchored_at(point.lat());

    let mut best: Option<(usize, SegmentProjection)> = None;
    for (i, (a, b)) in polyline.segments().enumerate() {
        let proj = project_onto_segment(point, a, b, &frame);
        // Strict comparison keeps the first segment on ties
        if best.is_none_or(|(_, current)| proj.distance_m < current.distance_m) {
            best = Some((i, proj));
        }
    }

    let Some((segment, proj)) = best else {
        return Err(GeometryError::DegeneratePolyline {
            points: polyline.len(),
        });
    };

    let points = polyline.points();
    let cum = polyline.cumulative_distances();
    let start = cum.get(segment).unwrap_or(0.0);
    let segment_len = haversine_m(points[segment], points[segment + 1]);

    Ok(Projection {
        segment,
        t: proj.t,
        distance_m: proj.distance_m,
        point: proj.point,
        route_distance_m: start + proj.t * segment_len,
    })
}
