//! Civic Grid Geo - Location resolution and hotspot clustering
//!
//! This crate maps free-text locations to zones, validates and measures
//! points, and groups geocoded complaints into ranked hotspots.

pub mod cluster;
pub mod export;
pub mod hotspot;
pub mod index;
pub mod resolver;
pub mod spatial;
pub mod validation;

pub use cluster::{ClusterAssignment, ClusterError, Dbscan, PointLabel};
pub use export::hotspots_to_geojson;
pub use hotspot::{compute_hotspots, HotspotClusterer};
pub use index::{IndexedPoint, PointIndex};
pub use resolver::{resolve_zone_and_coords, LocationResolver};
pub use validation::{validate_point, validate_points, ValidationError, ValidationResult};
