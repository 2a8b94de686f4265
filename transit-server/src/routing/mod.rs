//! Walking route lookups against an external OSRM-compatible service.
//!
//! Key characteristics:
//! - At most `max_concurrent` requests are in flight per client (and its
//!   clones); the rest wait in FIFO order
//! - Each lookup makes up to `max_retries + 1` attempts before giving up
//! - Failures never surface as errors: a lookup is either resolved or
//!   [`Lookup::Unresolved`], and callers fall back to geometry
//! - The wire protocol is longitude-first; everything returned here is
//!   latitude-first

mod client;
mod config;
mod error;
mod mock;
mod throttle;
mod types;

pub use client::OsrmClient;
pub use config::{DEFAULT_BASE_URL, DEFAULT_MAX_CONCURRENT, DEFAULT_MAX_RETRIES, RoutingConfig};
pub use error::RoutingError;
pub use mock::MockRouter;
pub use throttle::{Throttle, ThrottlePermit};
pub use types::{RouteCandidate, RouteGeometry, RouteResponse, coordinates_from_lon_lat};

use crate::domain::Coordinate;

/// Outcome of an external lookup.
///
/// `Unresolved` is not an error: it means "use the geometric fallback".
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Resolved(T),
    Unresolved,
}

impl<T> Lookup<T> {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Lookup::Resolved(_))
    }

    /// Convert into an `Option`.
    pub fn resolved(self) -> Option<T> {
        match self {
            Lookup::Resolved(v) => Some(v),
            Lookup::Unresolved => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Lookup::Resolved(v) => Lookup::Resolved(f(v)),
            Lookup::Unresolved => Lookup::Unresolved,
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Lookup::Resolved(v),
            None => Lookup::Unresolved,
        }
    }
}

/// Source of walking paths and distances.
///
/// This abstraction allows the planner to be tested without a routing service.
pub trait WalkingRouter {
    /// Walking path from `origin` to `destination`, in (lat, lon) order.
    fn walking_path(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> impl Future<Output = Lookup<Vec<Coordinate>>> + Send;

    /// Walking distance from `origin` to `destination`, in meters.
    fn walking_distance(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> impl Future<Output = Lookup<f64>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_conversions() {
        let resolved: Lookup<f64> = Some(3.0).into();
        assert!(resolved.is_resolved());
        assert_eq!(resolved.clone().map(|m| m * 2.0), Lookup::Resolved(6.0));
        assert_eq!(resolved.resolved(), Some(3.0));

        let unresolved: Lookup<f64> = None.into();
        assert!(!unresolved.is_resolved());
        assert_eq!(unresolved.resolved(), None);
    }
}
