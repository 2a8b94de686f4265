//! Process configuration from environment variables.
//!
//! | Variable                 | Default                          |
//! |--------------------------|----------------------------------|
//! | `TRANSIT_BIND_ADDR`      | `127.0.0.1:3000`                 |
//! | `TRANSIT_STOPS_PATH`     | `data/stops.geojson`             |
//! | `TRANSIT_ROUTE_PATH`     | `data/route.geojson`             |
//! | `ROUTING_BASE_URL`       | `https://router.project-osrm.org`|
//! | `ROUTING_MAX_CONCURRENT` | `2`                              |
//! | `ROUTING_MAX_RETRIES`    | `2`                              |

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::planner::PlannerConfig;
use crate::routing::RoutingConfig;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_STOPS_PATH: &str = "data/stops.geojson";
const DEFAULT_ROUTE_PATH: &str = "data/route.geojson";

/// Error reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{key}={value:?} is invalid: {message}")]
    Invalid {
        key: &'static str,
        value: String,
        message: String,
    },
}

/// Everything the server needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub stops_path: PathBuf,
    pub route_path: PathBuf,
    pub routing: RoutingConfig,
    pub planner: PlannerConfig,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value if set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = parse(
            "TRANSIT_BIND_ADDR",
            lookup("TRANSIT_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        )?;

        let stops_path = lookup("TRANSIT_STOPS_PATH").unwrap_or_else(|| DEFAULT_STOPS_PATH.to_string());
        let route_path = lookup("TRANSIT_ROUTE_PATH").unwrap_or_else(|| DEFAULT_ROUTE_PATH.to_string());

        let mut routing = RoutingConfig::default();
        if let Some(url) = lookup("ROUTING_BASE_URL") {
            routing = routing.with_base_url(url);
        }
        if let Some(v) = lookup("ROUTING_MAX_CONCURRENT") {
            let n: usize = parse("ROUTING_MAX_CONCURRENT", v.clone())?;
            if n == 0 {
                return Err(ConfigError::Invalid {
                    key: "ROUTING_MAX_CONCURRENT",
                    value: v,
                    message: "must be at least 1".to_string(),
                });
            }
            routing = routing.with_max_concurrent(n);
        }
        if let Some(v) = lookup("ROUTING_MAX_RETRIES") {
            routing = routing.with_max_retries(parse("ROUTING_MAX_RETRIES", v)?);
        }

        Ok(Self {
            bind_addr,
            stops_path: PathBuf::from(stops_path),
            route_path: PathBuf::from(route_path),
            routing,
            planner: PlannerConfig::default(),
        })
    }
}

fn parse<T>(key: &'static str, value: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let parsed = value.trim().parse::<T>();
    parsed.map_err(|e| ConfigError::Invalid {
        key,
        message: e.to_string(),
        value,
    })
}
