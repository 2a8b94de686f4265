//! Itinerary planning over a single reference route.
//!
//! A trip is three legs: walk from the origin to the board stop, ride the
//! route to the alight stop, walk to the destination. Stops are chosen by
//! walking distance where the router can resolve it and by great-circle
//! distance otherwise.

mod config;
mod itinerary;
mod nearest;

pub use config::{NearestMode, PlannerConfig};
pub use itinerary::{PlanError, Planner};
pub use nearest::{NearestStop, nearest_stop_by_geodesic, resolve_nearest_stop_by_walking};
