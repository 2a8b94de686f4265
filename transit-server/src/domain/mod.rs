//! Domain types for the transit route planner.
//!
//! Coordinates are validated at construction time, so the geometry and
//! planning code that receives them can trust they are finite and in range.

mod coordinate;
mod itinerary;
mod stop;

pub use coordinate::{Coordinate, InvalidCoordinate};
pub use itinerary::{DistanceSource, Itinerary, ItineraryStop, TransitLeg, WalkLeg};
pub use stop::{Stop, StopIndex};
