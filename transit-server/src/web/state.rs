//! Application state for the web layer.

use std::sync::Arc;

use crate::data::TransitNetwork;
use crate::planner::Planner;

/// Shared application state.
pub struct AppState<R> {
    /// Itinerary planner, with the session's walking-distance cache
    pub planner: Arc<Planner<R>>,

    /// Stops and reference route
    pub network: Arc<TransitNetwork>,
}

impl<R> AppState<R> {
    /// Create a new app state.
    pub fn new(planner: Planner<R>, network: TransitNetwork) -> Self {
        Self {
            planner: Arc::new(planner),
            network: Arc::new(network),
        }
    }
}

// Derived Clone would require `R: Clone`
impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            planner: Arc::clone(&self.planner),
            network: Arc::clone(&self.network),
        }
    }
}
