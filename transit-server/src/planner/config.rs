//! Planner configuration.

use serde::Deserialize;

/// How the board and alight stops are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NearestMode {
    /// Rank the closest candidates by walking distance from the router.
    #[default]
    Walking,
    /// Pick the stop with the smallest great-circle distance.
    Straight,
}

/// Configuration parameters for itinerary planning.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// How many straight-line-nearest stops get a walking-distance lookup.
    pub candidate_count: usize,

    /// Mode used when a request does not choose one.
    pub default_mode: NearestMode,
}

impl PlannerConfig {
    pub fn new(candidate_count: usize, default_mode: NearestMode) -> Self {
        Self {
            candidate_count,
            default_mode,
        }
    }

    pub fn with_candidate_count(mut self, n: usize) -> Self {
        self.candidate_count = n;
        self
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            candidate_count: 6,
            default_mode: NearestMode::Walking,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlannerConfig::default();
        assert_eq!(config.candidate_count, 6);
        assert_eq!(config.default_mode, NearestMode::Walking);
    }

    #[test]
    fn custom_config() {
        let config = PlannerConfig::new(3, NearestMode::Straight).with_candidate_count(4);
        assert_eq!(config.candidate_count, 4);
        assert_eq!(config.default_mode, NearestMode::Straight);
    }

    #[test]
    fn mode_from_json() {
        let mode: NearestMode = serde_json::from_str(r#""straight""#).unwrap();
        assert_eq!(mode, NearestMode::Straight);
        let mode: NearestMode = serde_json::from_str(r#""walking""#).unwrap();
        assert_eq!(mode, NearestMode::Walking);
        assert!(serde_json::from_str::<NearestMode>(r#""drive""#).is_err());
    }
}
