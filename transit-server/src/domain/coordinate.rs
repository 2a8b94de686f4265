//! Geographic coordinate type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a latitude/longitude pair is not a valid coordinate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidCoordinate {
    #[error("coordinate values must be finite")]
    NotFinite,

    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    #[error("expected \"lat, lon\", got {0:?}")]
    Malformed(String),
}

/// A validated (latitude, longitude) pair in decimal degrees.
///
/// Any `Coordinate` value is finite and in range by construction, so the
/// geometry code never re-validates.
///
/// # Examples
///
/// ```
/// use transit_server::domain::Coordinate;
///
/// let c: Coordinate = "-6.8, 39.28".parse().unwrap();
/// assert_eq!(c.lat(), -6.8);
/// assert_eq!(c.lon(), 39.28);
///
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// assert!(Coordinate::new(f64::NAN, 0.0).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate", into = "[f64; 2]")]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting non-finite or out-of-range values.
    pub fn new(lat: f64, lon: f64) -> Result<Self, InvalidCoordinate> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(InvalidCoordinate::NotFinite);
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoordinate::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(InvalidCoordinate::LongitudeOutOfRange(lon));
        }
        Ok(Self { lat, lon })
    }

    /// Create a coordinate from a `[longitude, latitude]` ordered pair,
    /// the order used by GeoJSON and OSRM.
    pub fn from_lon_lat(lon: f64, lat: f64) -> Result<Self, InvalidCoordinate> {
        Self::new(lat, lon)
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Linear interpolation of latitude and longitude between `self` and `other`.
    ///
    /// `t` is expected in `[0, 1]`. `t = 0` and `t = 1` return the endpoints
    /// exactly.
    pub fn lerp(&self, other: &Coordinate, t: f64) -> Coordinate {
        let s = 1.0 - t;
        Coordinate {
            lat: (self.lat * s + other.lat * t).clamp(-90.0, 90.0),
            lon: (self.lon * s + other.lon * t).clamp(-180.0, 180.0),
        }
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinate({}, {})", self.lat, self.lon)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lon)
    }
}

impl FromStr for Coordinate {
    type Err = InvalidCoordinate;

    /// Parse `"lat, lon"` (whitespace around either number is ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || InvalidCoordinate::Malformed(s.to_string());

        let mut parts = s.split(',');
        let (Some(lat), Some(lon), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(malformed());
        };

        let lat: f64 = lat.trim().parse().map_err(|_| malformed())?;
        let lon: f64 = lon.trim().parse().map_err(|_| malformed())?;
        Coordinate::new(lat, lon)
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(c: Coordinate) -> Self {
        [c.lat, c.lon]
    }
}

/// Accepted wire shapes: `[lat, lon]` or `{ "lat": .., "lon": .. }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCoordinate {
    Pair([f64; 2]),
    Named { lat: f64, lon: f64 },
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = InvalidCoordinate;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        match raw {
            RawCoordinate::Pair([lat, lon]) => Coordinate::new(lat, lon),
            RawCoordinate::Named { lat, lon } => Coordinate::new(lat, lon),
        }
    }
}
