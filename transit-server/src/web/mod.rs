//! Web layer for the transit route planner.
//!
//! Provides JSON endpoints for the stop list, the route geometry and
//! itinerary planning.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
