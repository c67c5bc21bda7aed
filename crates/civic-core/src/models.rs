pub mod complaint;
pub mod geometry;
pub mod hotspot;
pub mod zone;

pub use complaint::{
    Complaint, ComplaintId, ComplaintRecord, ComplaintStatus, IntakeSource, Priority,
};
pub use geometry::GeoPoint;
pub use hotspot::{ClusterParams, Hotspot, HotspotReport, HotspotStatus, Severity, TieBreak};
pub use zone::{FallbackZone, Zone, ZoneResolution};
