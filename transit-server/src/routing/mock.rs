//! In-memory walking router for tests and offline development.
//!
//! Serves canned distances and paths; anything not configured is unresolved,
//! which makes it easy to exercise the geometric fallbacks.

use std::sync::Mutex;

use crate::domain::Coordinate;

use super::{Lookup, WalkingRouter};

/// Canned walking router.
#[derive(Debug, Default)]
pub struct MockRouter {
    /// Distances keyed by (origin, destination); `None` matches any origin.
    distances: Vec<((Option<Coordinate>, Coordinate), f64)>,

    /// Paths keyed by (origin, destination).
    paths: Vec<((Coordinate, Coordinate), Vec<Coordinate>)>,

    distance_calls: Mutex<usize>,
    path_calls: Mutex<usize>,
}

impl MockRouter {
    /// A router that resolves nothing, as if the service were down.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Resolve walking distance to `destination` as `meters`, from any origin.
    pub fn with_distance_to(mut self, destination: Coordinate, meters: f64) -> Self {
        self.distances.push(((None, destination), meters));
        self
    }

    /// Resolve walking distance from `origin` to `destination` as `meters`.
    pub fn with_distance(mut self, origin: Coordinate, destination: Coordinate, meters: f64) -> Self {
        self.distances.push(((Some(origin), destination), meters));
        self
    }

    /// Resolve the walking path from `origin` to `destination`.
    pub fn with_path(mut self, origin: Coordinate, destination: Coordinate, path: Vec<Coordinate>) -> Self {
        self.paths.push(((origin, destination), path));
        self
    }

    /// Number of distance lookups made so far.
    pub fn distance_calls(&self) -> usize {
        *self.distance_calls.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Number of path lookups made so far.
    pub fn path_calls(&self) -> usize {
        *self.path_calls.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl WalkingRouter for MockRouter {
    async fn walking_path(&self, origin: Coordinate, destination: Coordinate) -> Lookup<Vec<Coordinate>> {
        *self.path_calls.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        self.paths
            .iter()
            .find(|((o, d), _)| *o == origin && *d == destination)
            .map(|(_, path)| path.clone())
            .into()
    }

    async fn walking_distance(&self, origin: Coordinate, destination: Coordinate) -> Lookup<f64> {
        *self.distance_calls.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        self.distances
            .iter()
            .find(|((o, d), _)| *d == destination && o.is_none_or(|o| o == origin))
            .map(|(_, meters)| *meters)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[tokio::test]
    async fn serves_configured_lookups() {
        let router = MockRouter::default()
            .with_distance_to(c(1.0, 1.0), 250.0)
            .with_path(c(0.0, 0.0), c(1.0, 1.0), vec![c(0.0, 0.0), c(1.0, 1.0)]);

        assert_eq!(
            router.walking_distance(c(5.0, 5.0), c(1.0, 1.0)).await,
            Lookup::Resolved(250.0)
        );
        assert_eq!(
            router.walking_distance(c(5.0, 5.0), c(2.0, 2.0)).await,
            Lookup::Unresolved
        );
        assert!(router.walking_path(c(0.0, 0.0), c(1.0, 1.0)).await.is_resolved());
        assert!(!router.walking_path(c(1.0, 1.0), c(0.0, 0.0)).await.is_resolved());

        assert_eq!(router.distance_calls(), 2);
        assert_eq!(router.path_calls(), 2);
    }

    #[tokio::test]
    async fn distances_can_depend_on_origin() {
        let router = MockRouter::default().with_distance(c(0.0, 0.0), c(1.0, 1.0), 120.0);

        assert_eq!(
            router.walking_distance(c(0.0, 0.0), c(1.0, 1.0)).await,
            Lookup::Resolved(120.0)
        );
        assert_eq!(
            router.walking_distance(c(2.0, 2.0), c(1.0, 1.0)).await,
            Lookup::Unresolved
        );
    }
}
