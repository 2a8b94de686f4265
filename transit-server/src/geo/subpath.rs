//! Extracting the part of a polyline between two route distances.

use crate::domain::Coordinate;

use super::polyline::Polyline;

/// Points of `polyline` between route distances `start_m` and `end_m`.
///
/// Both distances are clamped to `[0, length]` and swapped if needed, so the
/// result always runs in the polyline's own direction; callers travelling
/// the other way reverse it themselves. The window's endpoints are
/// interpolated, raw vertices inside the window are kept, and no point is
/// emitted twice in a row. A zero-length window yields at most one point.
///
/// Returns an empty vector for polylines with fewer than two points, and
/// when either distance is not finite.
pub fn extract_subpath(polyline: &Polyline, start_m: f64, end_m: f64) -> Vec<Coordinate> {
    if polyline.is_degenerate() || !start_m.is_finite() || !end_m.is_finite() {
        return Vec::new();
    }

    let cum = polyline.cumulative_distances();
    let acc = cum.as_slice();
    let total = cum.total();

    let s = start_m.clamp(0.0, total);
    let e = end_m.clamp(0.0, total);
    let (from, to) = if s <= e { (s, e) } else { (e, s) };

    let mut out: Vec<Coordinate> = Vec::new();
    for (i, (a, b)) in polyline.segments().enumerate() {
        let seg_start = acc[i];
        let seg_end = acc[i + 1];

        if seg_end < from {
            continue;
        }
        if seg_start > to {
            break;
        }

        let seg_len = seg_end - seg_start;
        let (t0, t1) = if seg_len > 0.0 {
            (
                ((from - seg_start) / seg_len).clamp(0.0, 1.0),
                ((to - seg_start) / seg_len).clamp(0.0, 1.0),
            )
        } else {
            (0.0, 0.0)
        };

        if out.is_empty() {
            out.push(a.lerp(&b, t0));
        }
        let exit = a.lerp(&b, t1);
        if out.last() != Some(&exit) {
            out.push(exit);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::haversine_m;

    fn c(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    fn l_shape() -> Polyline {
        Polyline::new(vec![c(0.0, 0.0), c(0.0, 1.0), c(1.0, 1.0)])
    }

    fn assert_close(actual: &[Coordinate], expected: &[(f64, f64)]) {
        assert_eq!(actual.len(), expected.len(), "got {actual:?}");
        for (a, (lat, lon)) in actual.iter().zip(expected) {
            assert!((a.lat() - lat).abs() < 1e-6, "got {actual:?}");
            assert!((a.lon() - lon).abs() < 1e-6, "got {actual:?}");
        }
    }

    #[test]
    fn extracts_window_across_vertex() {
        let poly = l_shape();
        let d01 = haversine_m(c(0.0, 0.0), c(0.0, 1.0));
        let d12 = haversine_m(c(0.0, 1.0), c(1.0, 1.0));

        let out = extract_subpath(&poly, d01 / 2.0, d01 + d12 / 2.0);
        assert_close(&out, &[(0.0, 0.5), (0.0, 1.0), (0.5, 1.0)]);
    }

    #[test]
    fn swapped_arguments_give_same_forward_path() {
        let poly = l_shape();
        let d01 = haversine_m(c(0.0, 0.0), c(0.0, 1.0));
        let forward = extract_subpath(&poly, d01 / 2.0, d01 * 1.5);
        let backward = extract_subpath(&poly, d01 * 1.5, d01 / 2.0);
        assert_eq!(forward, backward);
    }

    #[test]
    fn full_range_is_whole_polyline() {
        let poly = l_shape();
        let out = extract_subpath(&poly, -100.0, 1e12);
        assert_eq!(out, poly.points());
    }

    #[test]
    fn zero_length_window() {
        let poly = l_shape();
        let d01 = poly.cumulative_distances().get(1).unwrap();

        // Interior of a segment
        let out = extract_subpath(&poly, d01 / 3.0, d01 / 3.0);
        assert_eq!(out.len(), 1);

        // Exactly on a shared vertex
        let out = extract_subpath(&poly, d01, d01);
        assert_eq!(out, vec![c(0.0, 1.0)]);

        // Start of the polyline
        let out = extract_subpath(&poly, 0.0, 0.0);
        assert_eq!(out, vec![c(0.0, 0.0)]);
    }

    #[test]
    fn degenerate_polylines_are_empty() {
        assert!(extract_subpath(&Polyline::default(), 0.0, 10.0).is_empty());
        assert!(extract_subpath(&Polyline::new(vec![c(1.0, 1.0)]), 0.0, 10.0).is_empty());
    }

    #[test]
    fn duplicate_vertices_are_not_repeated() {
        let poly = Polyline::new(vec![c(0.0, 0.0), c(0.0, 1.0), c(0.0, 1.0), c(0.0, 2.0)]);
        let out = extract_subpath(&poly, 0.0, 1e12);
        assert_eq!(out, vec![c(0.0, 0.0), c(0.0, 1.0), c(0.0, 2.0)]);
    }

    #[test]
    fn non_finite_distances_are_empty() {
        let poly = l_shape();
        assert!(extract_subpath(&poly, 1_000.0, f64::NAN).is_empty());
        assert!(extract_subpath(&poly, f64::NAN, 1_000.0).is_empty());
        assert!(extract_subpath(&poly, 0.0, f64::INFINITY).is_empty());
        assert!(extract_subpath(&poly, f64::NEG_INFINITY, 0.0).is_empty());
    }
}
