//! Polylines and their cumulative arc-length index.

use crate::domain::Coordinate;

use super::distance::haversine_m;

/// An ordered sequence of coordinates describing a route or walked path.
///
/// Fewer than two points is allowed but degenerate: such a polyline has no
/// direction and zero length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True when the polyline has fewer than two points.
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 2
    }

    /// Consecutive point pairs, in order.
    pub fn segments(&self) -> impl Iterator<Item = (Coordinate, Coordinate)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    /// Running arc lengths, one entry per point.
    pub fn cumulative_distances(&self) -> CumulativeDistances {
        CumulativeDistances::for_points(&self.points)
    }

    /// Geodesic length of the whole polyline, in meters.
    pub fn length_m(&self) -> f64 {
        self.segments().map(|(a, b)| haversine_m(a, b)).sum()
    }

    /// Coordinate at a route-relative distance, clamped to the polyline.
    ///
    /// Returns `None` for an empty polyline.
    pub fn point_at(&self, distance_m: f64) -> Option<Coordinate> {
        match self.points.as_slice() {
            [] => None,
            [only] => Some(*only),
            points => {
                let (segment, t) = self.cumulative_distances().locate(distance_m);
                Some(points[segment].lerp(&points[segment + 1], t))
            }
        }
    }
}

impl From<Vec<Coordinate>> for Polyline {
    fn from(points: Vec<Coordinate>) -> Self {
        Self::new(points)
    }
}

/// Cumulative distance table aligned index-for-index with a polyline.
///
/// Entry 0 is always 0 and entries never decrease. Derived from a polyline
/// and rebuilt whenever it is needed; it is never edited independently.
#[derive(Debug, Clone, PartialEq)]
pub struct CumulativeDistances {
    acc: Vec<f64>,
}

impl CumulativeDistances {
    fn for_points(points: &[Coordinate]) -> Self {
        let mut acc = Vec::with_capacity(points.len().max(1));
        acc.push(0.0);
        for w in points.windows(2) {
            let last = acc[acc.len() - 1];
            acc.push(last + haversine_m(w[0], w[1]));
        }
        Self { acc }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.acc
    }

    pub fn len(&self) -> usize {
        self.acc.len()
    }

    pub fn is_empty(&self) -> bool {
        self.acc.is_empty()
    }

    /// Distance along the line to point `index`.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.acc.get(index).copied()
    }

    /// Total length (the last entry).
    pub fn total(&self) -> f64 {
        self.acc.last().copied().unwrap_or(0.0)
    }

    /// Length of segment `segment` (from point `segment` to `segment + 1`).
    pub fn segment_length(&self, segment: usize) -> Option<f64> {
        Some(self.get(segment + 1)? - self.get(segment)?)
    }

    /// Distance along the line at fraction `t` of `segment`.
    pub fn distance_at(&self, segment: usize, t: f64) -> Option<f64> {
        Some(self.get(segment)? + t * self.segment_length(segment)?)
    }

    /// Inverse of [`distance_at`](Self::distance_at): the segment and
    /// fraction at a given distance, clamped to `[0, total]`.
    ///
    /// Returns `(0, 0.0)` when there are no segments. At a shared vertex the
    /// earlier segment is chosen (`t = 1`), except at distance 0.
    pub fn locate(&self, distance_m: f64) -> (usize, f64) {
        let segments = self.acc.len().saturating_sub(1);
        if segments == 0 {
            return (0, 0.0);
        }

        let d = distance_m.clamp(0.0, self.total());
        // First point whose cumulative distance reaches `d`
        let reach = self.acc.partition_point(|&v| v < d);
        let segment = reach.saturating_sub(1).min(segments - 1);

        let len = self.acc[segment + 1] - self.acc[segment];
        let t = if len > 0.0 {
            ((d - self.acc[segment]) / len).clamp(0.0, 1.0)
        } else {
            0.0
        };
        (segment, t)
    }
}
