//! Civic Grid Intake - Complaint intake and hotspot orchestration
//!
//! This crate composes zone resolution and SLA computation into intake-time
//! field derivation, lodges complaints through the store port, and feeds
//! store snapshots to the hotspot clusterer.

pub mod facade;
pub mod hotspots;
pub mod lodge;
pub mod models;

pub use facade::IntakeFacade;
pub use hotspots::{normalize_zone_filter, HotspotService};
pub use lodge::{ticket_number, ComplaintIntake};
pub use models::{ComplaintDraft, ComplaintFields, HeatmapPoint};
