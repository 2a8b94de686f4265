//! Stops along the reference route.

use std::fmt;

use serde::Serialize;

use super::Coordinate;

/// Position of a stop within the session's stop list.
///
/// This is the stop's identity: display names are not unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StopIndex(pub usize);

impl fmt::Display for StopIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A stop: a coordinate plus a display name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stop {
    pub coord: Coordinate,
    pub name: String,
}

impl Stop {
    pub fn new(coord: Coordinate, name: impl Into<String>) -> Self {
        Self {
            coord,
            name: name.into(),
        }
    }
}
