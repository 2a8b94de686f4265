//! OSRM HTTP client for walking routes.
//!
//! Every logical request holds one throttle slot for all of its attempts,
//! so retries queue behind other callers like any other request.

use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::Coordinate;

use super::config::RoutingConfig;
use super::error::RoutingError;
use super::throttle::Throttle;
use super::types::{RouteResponse, lon_lat_param};
use super::{Lookup, WalkingRouter};

const PATH_QUERY: &[(&str, &str)] = &[("overview", "full"), ("geometries", "geojson")];

const DISTANCE_QUERY: &[(&str, &str)] = &[
    ("overview", "false"),
    ("alternatives", "false"),
    ("steps", "false"),
];

/// Client for an OSRM-compatible route service.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    http: reqwest::Client,
    base_url: String,
    profile: String,
    max_retries: u32,
    retry_backoff: Duration,
    throttle: Throttle,
}

impl OsrmClient {
    /// Create a new client with the given configuration.
    pub fn new(config: RoutingConfig) -> Result<Self, RoutingError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            profile: config.profile,
            max_retries: config.max_retries,
            retry_backoff: config.retry_backoff,
            throttle: Throttle::new(config.max_concurrent),
        })
    }

    /// The throttle shared by all requests from this client (and its clones).
    pub fn throttle(&self) -> &Throttle {
        &self.throttle
    }

    fn route_url(&self, origin: Coordinate, destination: Coordinate) -> String {
        format!(
            "{}/route/v1/{}/{};{}",
            self.base_url,
            self.profile,
            lon_lat_param(origin),
            lon_lat_param(destination)
        )
    }

    /// Walking path from `origin` to `destination`, in (lat, lon) order.
    pub async fn try_walking_path(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Vec<Coordinate>, RoutingError> {
        let response = self.fetch_route(origin, destination, PATH_QUERY).await?;
        response.first_path()
    }

    /// Walking distance from `origin` to `destination`, in meters.
    pub async fn try_walking_distance(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<f64, RoutingError> {
        let response = self.fetch_route(origin, destination, DISTANCE_QUERY).await?;
        response.first_distance()
    }

    /// One logical request: up to `max_retries + 1` sequential attempts
    /// under a single throttle slot.
    async fn fetch_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        query: &[(&str, &str)],
    ) -> Result<RouteResponse, RoutingError> {
        let url = self.route_url(origin, destination);
        self.throttle.run(self.attempts(&url, query)).await?
    }

    /// Attempts for one logical request, run while holding a throttle slot.
    async fn attempts(&self, url: &str, query: &[(&str, &str)]) -> Result<RouteResponse, RoutingError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.attempt(url, query).await {
                Ok(body) => return RouteResponse::from_body(&body),
                Err(e) if e.is_retryable() && attempt <= self.max_retries => {
                    debug!(%url, attempt, error = %e, "routing attempt failed, retrying");
                    if !self.retry_backoff.is_zero() {
                        tokio::time::sleep(self.retry_backoff).await;
                    }
                }
                Err(e) => {
                    return Err(RoutingError::Exhausted {
                        attempts: attempt,
                        last: Box::new(e),
                    });
                }
            }
        }
    }

    async fn attempt(&self, url: &str, query: &[(&str, &str)]) -> Result<String, RoutingError> {
        let response = self.http.get(url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RoutingError::Status {
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

impl WalkingRouter for OsrmClient {
    async fn walking_path(&self, origin: Coordinate, destination: Coordinate) -> Lookup<Vec<Coordinate>> {
        match self.try_walking_path(origin, destination).await {
            Ok(path) => Lookup::Resolved(path),
            Err(e) => {
                warn!(%origin, %destination, error = %e, "walking path unresolved");
                Lookup::Unresolved
            }
        }
    }

    async fn walking_distance(&self, origin: Coordinate, destination: Coordinate) -> Lookup<f64> {
        match self.try_walking_distance(origin, destination).await {
            Ok(meters) => Lookup::Resolved(meters),
            Err(e) => {
                warn!(%origin, %destination, error = %e, "walking distance unresolved");
                Lookup::Unresolved
            }
        }
    }
}
