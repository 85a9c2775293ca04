//! Convention-based detectors.
//!
//! Both detectors are naming and path heuristics over already-extracted
//! records. They never look at source text and never fail.

pub mod api_routes;
pub mod components;

pub use api_routes::{detect_api_endpoints, route_path_for};
pub use components::detect_components;
