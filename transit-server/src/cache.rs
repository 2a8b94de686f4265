//! Session cache of resolved walking distances.
//!
//! Keys round the query point to 5 decimal places (about 1.1 m), so repeated
//! queries from nearly the same spot share entries despite GPS jitter, and
//! pair it with the destination stop's index. Walking paths are never
//! cached, only scalar distances.
//!
//! The stop set is fixed for a session and the rounded key space is small,
//! so entries are neither evicted nor expired.

use moka::future::Cache as MokaCache;

use crate::domain::{Coordinate, StopIndex};

/// Rounding scale for cache keys: 5 decimal places.
const KEY_SCALE: f64 = 1e5;

/// Cache key: (query point rounded to 5 decimals, stop index).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WalkKey {
    lat_e5: i64,
    lon_e5: i64,
    stop: StopIndex,
}

impl WalkKey {
    pub fn new(origin: Coordinate, stop: StopIndex) -> Self {
        Self {
            lat_e5: (origin.lat() * KEY_SCALE).round() as i64,
            lon_e5: (origin.lon() * KEY_SCALE).round() as i64,
            stop,
        }
    }

    pub fn stop(&self) -> StopIndex {
        self.stop
    }
}

/// Walking distances in meters, keyed by [`WalkKey`].
///
/// Clones share the same entries.
#[derive(Clone)]
pub struct WalkDistanceCache {
    entries: MokaCache<WalkKey, f64>,
}

impl Default for WalkDistanceCache {
    fn default() -> Self {
        Self::new()
    }
}

impl WalkDistanceCache {
    /// Create an empty, unbounded cache.
    pub fn new() -> Self {
        Self {
            entries: MokaCache::builder().build(),
        }
    }

    /// Cached distance from `origin` to `stop`, if any.
    pub async fn get(&self, origin: Coordinate, stop: StopIndex) -> Option<f64> {
        self.entries.get(&WalkKey::new(origin, stop)).await
    }

    /// Record a resolved distance from `origin` to `stop`.
    pub async fn insert(&self, origin: Coordinate, stop: StopIndex, meters: f64) {
        self.entries.insert(WalkKey::new(origin, stop), meters).await;
    }

    /// Number of cached entries (settles after pending maintenance runs).
    pub async fn entry_count(&self) -> u64 {
        self.entries.run_pending_tasks().await;
        self.entries.entry_count()
    }
}
