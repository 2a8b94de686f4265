//! Three-leg itinerary planning.

use tracing::{debug, info};

use crate::cache::WalkDistanceCache;
use crate::data::TransitNetwork;
use crate::domain::{Coordinate, Itinerary, ItineraryStop, Stop, TransitLeg, WalkLeg};
use crate::geo::{Polyline, extract_subpath, project_point_onto_polyline};
use crate::routing::{Lookup, WalkingRouter};

use super::config::{NearestMode, PlannerConfig};
use super::nearest::{NearestStop, nearest_stop_by_geodesic, resolve_nearest_stop_by_walking};

/// Error from itinerary planning.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// There is no stop to board or alight at.
    #[error("the network has no stops")]
    NoStops,
}

/// Itinerary planner.
///
/// Owns the walking router and the session's distance cache, so one planner
/// should serve every query of a session.
pub struct Planner<R> {
    router: R,
    cache: WalkDistanceCache,
    config: PlannerConfig,
}

impl<R: WalkingRouter> Planner<R> {
    /// Create a new planner with an empty cache.
    pub fn new(router: R, config: PlannerConfig) -> Self {
        Self {
            router,
            cache: WalkDistanceCache::new(),
            config,
        }
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    pub fn cache(&self) -> &WalkDistanceCache {
        &self.cache
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Nearest stop to `point` under `mode`.
    pub async fn nearest_stop(
        &self,
        point: Coordinate,
        stops: &[Stop],
        mode: NearestMode,
    ) -> Option<NearestStop> {
        match mode {
            NearestMode::Walking => {
                resolve_nearest_stop_by_walking(
                    point,
                    stops,
                    self.config.candidate_count,
                    &self.router,
                    &self.cache,
                )
                .await
            }
            NearestMode::Straight => nearest_stop_by_geodesic(point, stops),
        }
    }

    /// Plan a trip from `from` to `to`: walk to the board stop, ride the
    /// route to the alight stop, walk to the destination.
    ///
    /// Walk legs without a resolved path fall back to a straight line. The
    /// transit leg is `None` when the route has fewer than two points or
    /// both stops snap to the same route point.
    pub async fn plan(
        &self,
        network: &TransitNetwork,
        from: Coordinate,
        to: Coordinate,
        mode: NearestMode,
    ) -> Result<Itinerary, PlanError> {
        let stops = network.stops();

        let (board, alight) = tokio::join!(
            self.nearest_stop(from, stops, mode),
            self.nearest_stop(to, stops, mode),
        );
        let (Some(board), Some(alight)) = (board, alight) else {
            return Err(PlanError::NoStops);
        };

        let (access_path, egress_path) = tokio::join!(
            self.router.walking_path(from, board.coord),
            self.router.walking_path(alight.coord, to),
        );
        let access = walk_leg(access_path, from, board.coord, &board);
        let egress = walk_leg(egress_path, alight.coord, to, &alight);

        let transit = transit_leg(network.route(), board.coord, alight.coord);

        let itinerary = Itinerary {
            board: itinerary_stop(stops, &board),
            alight: itinerary_stop(stops, &alight),
            access,
            transit,
            egress,
        };

        info!(
            board = %itinerary.board.index,
            alight = %itinerary.alight.index,
            total_m = itinerary.total_distance_m(),
            ?mode,
            "planned itinerary"
        );

        Ok(itinerary)
    }
}

fn itinerary_stop(stops: &[Stop], nearest: &NearestStop) -> ItineraryStop {
    ItineraryStop {
        index: nearest.index,
        name: stops[nearest.index.0].name.clone(),
        coord: nearest.coord,
    }
}

/// Walk leg from `start` to `end`, using the resolved path when it has at
/// least two points and the straight line otherwise.
fn walk_leg(
    path: Lookup<Vec<Coordinate>>,
    start: Coordinate,
    end: Coordinate,
    nearest: &NearestStop,
) -> WalkLeg {
    let (path, approximate) = match path {
        Lookup::Resolved(path) if path.len() >= 2 => (path, false),
        _ => (vec![start, end], true),
    };

    WalkLeg {
        path,
        approximate,
        distance_m: nearest.distance_m,
        distance_source: nearest.source,
    }
}

/// Ride along `route` from the stop at `board` to the stop at `alight`.
fn transit_leg(route: &Polyline, board: Coordinate, alight: Coordinate) -> Option<TransitLeg> {
    let (a, b) = match (
        project_point_onto_polyline(board, route),
        project_point_onto_polyline(alight, route),
    ) {
        (Ok(a), Ok(b)) => (a, b),
        (Err(e), _) | (_, Err(e)) => {
            debug!(error = %e, "no route match");
            return None;
        }
    };

    let mut path = extract_subpath(route, a.route_distance_m, b.route_distance_m);
    if path.len() < 2 {
        debug!(board = %board, alight = %alight, "board and alight match the same route point");
        return None;
    }
    // Sub-paths run in route order; travel runs board to alight
    if a.route_distance_m > b.route_distance_m {
        path.reverse();
    }

    Some(TransitLeg {
        path,
        distance_m: (b.route_distance_m - a.route_distance_m).abs(),
    })
}
