//! Choosing the stop nearest to a point.

use futures::future::join_all;
use tracing::{debug, trace};

use crate::cache::WalkDistanceCache;
use crate::domain::{Coordinate, DistanceSource, Stop, StopIndex};
use crate::geo::haversine_m;
use crate::routing::{Lookup, WalkingRouter};

/// The stop chosen for a point, with the distance used to choose it.
#[derive(Debug, Clone, PartialEq)]
pub struct NearestStop {
    pub index: StopIndex,
    pub coord: Coordinate,
    pub distance_m: f64,
    pub source: DistanceSource,
}

/// Stop with the smallest great-circle distance over the whole list.
///
/// Ties go to the lowest index. Returns `None` for an empty list.
pub fn nearest_stop_by_geodesic(point: Coordinate, stops: &[Stop]) -> Option<NearestStop> {
    let mut best: Option<NearestStop> = None;
    for (i, stop) in stops.iter().enumerate() {
        let d = haversine_m(point, stop.coord);
        if best.as_ref().is_none_or(|b| d < b.distance_m) {
            best = Some(NearestStop {
                index: StopIndex(i),
                coord: stop.coord,
                distance_m: d,
                source: DistanceSource::Geodesic,
            });
        }
    }
    best
}

/// Indices of the `k` stops closest to `point` by Euclidean distance on raw
/// degrees. Only used to bound how many stops get a router lookup.
fn prune_candidates(point: Coordinate, stops: &[Stop], k: usize) -> Vec<StopIndex> {
    let degrees = |c: Coordinate| (point.lat() - c.lat()).hypot(point.lon() - c.lon());

    let mut ranked: Vec<(usize, f64)> = stops
        .iter()
        .enumerate()
        .map(|(i, s)| (i, degrees(s.coord)))
        .collect();
    // Stable, so equal distances keep list order
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));

    ranked
        .into_iter()
        .take(k.min(stops.len()))
        .map(|(i, _)| StopIndex(i))
        .collect()
}

/// Stop with the shortest walking distance from `point`.
///
/// The `k` straight-line-nearest stops are looked up concurrently, from the
/// cache where possible and from `router` otherwise; resolved distances are
/// cached. If none resolves, falls back to [`nearest_stop_by_geodesic`] over
/// the entire list, not just the candidates.
///
/// Returns `None` only for an empty stop list.
pub async fn resolve_nearest_stop_by_walking<R: WalkingRouter>(
    point: Coordinate,
    stops: &[Stop],
    k: usize,
    router: &R,
    cache: &WalkDistanceCache,
) -> Option<NearestStop> {
    if stops.is_empty() {
        return None;
    }

    let candidates = prune_candidates(point, stops, k);

    let lookups = candidates.iter().map(|&index| async move {
        let coord = stops[index.0].coord;
        if let Some(meters) = cache.get(point, index).await {
            trace!(%index, meters, "walking distance cache hit");
            return (index, Lookup::Resolved(meters));
        }

        let lookup = router.walking_distance(point, coord).await;
        if let Lookup::Resolved(meters) = lookup {
            cache.insert(point, index, meters).await;
        }
        (index, lookup)
    });
    let results = join_all(lookups).await;

    let mut best: Option<NearestStop> = None;
    for (index, lookup) in results {
        let Lookup::Resolved(meters) = lookup else {
            continue;
        };
        if best.as_ref().is_none_or(|b| meters < b.distance_m) {
            best = Some(NearestStop {
                index,
                coord: stops[index.0].coord,
                distance_m: meters,
                source: DistanceSource::Walking,
            });
        }
    }

    if best.is_none() {
        debug!(%point, candidates = candidates.len(), "no walking distance resolved, using geodesic nearest");
        return nearest_stop_by_geodesic(point, stops);
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::MockRouter;

    fn c(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    fn stops(coords: &[(f64, f64)]) -> Vec<Stop> {
        coords
            .iter()
            .enumerate()
            .map(|(i, (lat, lon))| Stop::new(c(*lat, *lon), format!("Stop {i}")))
            .collect()
    }

    fn brute_force_nearest(point: Coordinate, stops: &[Stop]) -> usize {
        let mut best = 0;
        for (i, s) in stops.iter().enumerate() {
            if haversine_m(point, s.coord) < haversine_m(point, stops[best].coord) {
                best = i;
            }
        }
        best
    }

    #[test]
    fn geodesic_nearest() {
        let list = stops(&[(0.0, 0.02), (0.0, 0.01), (0.0, 0.03)]);
        let nearest = nearest_stop_by_geodesic(c(0.0, 0.0), &list).unwrap();
        assert_eq!(nearest.index, StopIndex(1));
        assert_eq!(nearest.source, DistanceSource::Geodesic);
        assert_eq!(nearest.distance_m, haversine_m(c(0.0, 0.0), c(0.0, 0.01)));

        assert!(nearest_stop_by_geodesic(c(0.0, 0.0), &[]).is_none());
    }

    #[test]
    fn geodesic_ties_keep_lowest_index() {
        let list = stops(&[(0.0, 0.01), (0.0, -0.01)]);
        let nearest = nearest_stop_by_geodesic(c(0.0, 0.0), &list).unwrap();
        assert_eq!(nearest.index, StopIndex(0));
    }

    #[test]
    fn prune_keeps_k_closest_in_order() {
        let list = stops(&[(0.0, 0.05), (0.0, 0.01), (0.0, 0.03), (0.0, 0.02)]);
        let picked = prune_candidates(c(0.0, 0.0), &list, 2);
        assert_eq!(picked, vec![StopIndex(1), StopIndex(3)]);

        assert_eq!(prune_candidates(c(0.0, 0.0), &list, 10).len(), 4);
        assert!(prune_candidates(c(0.0, 0.0), &list, 0).is_empty());
    }

    #[tokio::test]
    async fn picks_shortest_walk_not_shortest_line() {
        let list = stops(&[(0.0, 0.01), (0.0, 0.02), (0.0, 0.5)]);
        // The closest stop is across a river: a long walk
        let router = MockRouter::default()
            .with_distance_to(c(0.0, 0.01), 5_000.0)
            .with_distance_to(c(0.0, 0.02), 2_400.0);
        let cache = WalkDistanceCache::new();

        let nearest = resolve_nearest_stop_by_walking(c(0.0, 0.0), &list, 2, &router, &cache)
            .await
            .unwrap();
        assert_eq!(nearest.index, StopIndex(1));
        assert_eq!(nearest.distance_m, 2_400.0);
        assert_eq!(nearest.source, DistanceSource::Walking);
        assert_eq!(router.distance_calls(), 2);
    }

    #[tokio::test]
    async fn only_candidates_are_looked_up() {
        let list = stops(&[(0.0, 0.01), (0.0, 0.02), (0.0, 0.5)]);
        // The far stop would win on walking distance but is pruned
        let router = MockRouter::default()
            .with_distance_to(c(0.0, 0.01), 3_000.0)
            .with_distance_to(c(0.0, 0.5), 10.0);
        let cache = WalkDistanceCache::new();

        let nearest = resolve_nearest_stop_by_walking(c(0.0, 0.0), &list, 2, &router, &cache)
            .await
            .unwrap();
        assert_eq!(nearest.index, StopIndex(0));
    }

    #[tokio::test]
    async fn cached_distances_skip_the_router() {
        let list = stops(&[(0.0, 0.01), (0.0, 0.02)]);
        let router = MockRouter::default()
            .with_distance_to(c(0.0, 0.01), 1_500.0)
            .with_distance_to(c(0.0, 0.02), 1_200.0);
        let cache = WalkDistanceCache::new();

        resolve_nearest_stop_by_walking(c(0.0, 0.0), &list, 2, &router, &cache).await;
        assert_eq!(router.distance_calls(), 2);

        // Within rounding precision of the first query
        let again = resolve_nearest_stop_by_walking(c(0.000_001, 0.0), &list, 2, &router, &cache)
            .await
            .unwrap();
        assert_eq!(router.distance_calls(), 2);
        assert_eq!(again.index, StopIndex(1));
        assert_eq!(again.distance_m, 1_200.0);
    }

    #[tokio::test]
    async fn unresolved_lookups_are_not_cached() {
        let list = stops(&[(0.0, 0.01)]);
        let router = MockRouter::unavailable();
        let cache = WalkDistanceCache::new();

        resolve_nearest_stop_by_walking(c(0.0, 0.0), &list, 1, &router, &cache).await;
        resolve_nearest_stop_by_walking(c(0.0, 0.0), &list, 1, &router, &cache).await;
        assert_eq!(router.distance_calls(), 2);
        assert_eq!(cache.entry_count().await, 0);
    }

    #[tokio::test]
    async fn failing_router_falls_back_to_geodesic() {
        let point = c(0.0, 0.0);
        let list = stops(&[(0.0, 0.01), (0.0, 0.02)]);
        let router = MockRouter::unavailable();
        let cache = WalkDistanceCache::new();

        let nearest = resolve_nearest_stop_by_walking(point, &list, 0, &router, &cache)
            .await
            .unwrap();
        assert_eq!(nearest.index, StopIndex(0));
        assert!((nearest.distance_m - haversine_m(point, list[0].coord)).abs() < 1e-6);
        assert_eq!(nearest.source, DistanceSource::Geodesic);
    }

    #[tokio::test]
    async fn fallback_searches_the_whole_list() {
        // At this latitude a degree of longitude is short, so raw-degree
        // pruning keeps the wrong stop; the fallback must still find the true one
        let point = c(60.0, 0.0);
        let list = stops(&[(60.015, 0.0), (60.0, 0.02), (61.0, 0.0)]);
        let router = MockRouter::unavailable();
        let cache = WalkDistanceCache::new();

        assert_eq!(prune_candidates(point, &list, 1), vec![StopIndex(0)]);

        let nearest = resolve_nearest_stop_by_walking(point, &list, 1, &router, &cache)
            .await
            .unwrap();
        assert_eq!(nearest.index.0, brute_force_nearest(point, &list));
        assert_eq!(nearest.index, StopIndex(1));
    }

    #[tokio::test]
    async fn empty_stop_list() {
        let router = MockRouter::unavailable();
        let cache = WalkDistanceCache::new();
        assert!(
            resolve_nearest_stop_by_walking(c(0.0, 0.0), &[], 5, &router, &cache)
                .await
                .is_none()
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::routing::MockRouter;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn unavailable_router_matches_brute_force(
            point in (-6.9f64..-6.7, 39.1f64..39.3),
            coords in prop::collection::vec((-6.9f64..-6.7, 39.1f64..39.3), 1..20),
            k in 0usize..8,
        ) {
            let point = Coordinate::new(point.0, point.1).unwrap();
            let list: Vec<Stop> = coords
                .iter()
                .map(|(lat, lon)| Stop::new(Coordinate::new(*lat, *lon).unwrap(), "s"))
                .collect();

            let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let nearest = rt.block_on(resolve_nearest_stop_by_walking(
                point,
                &list,
                k,
                &MockRouter::unavailable(),
                &WalkDistanceCache::new(),
            ));

            let expected = nearest_stop_by_geodesic(point, &list).unwrap();
            prop_assert_eq!(nearest, Some(expected));
        }
    }
}
