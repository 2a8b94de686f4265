//! Transit route planner server.
//!
//! Matches arbitrary points to a single bus route and its stops, then
//! estimates a walk / ride / walk itinerary. Walking distances and paths
//! come from an OSRM-compatible service when it answers, and from geometry
//! when it does not.

pub mod cache;
pub mod config;
pub mod data;
pub mod domain;
pub mod geo;
pub mod planner;
pub mod routing;
pub mod web;
