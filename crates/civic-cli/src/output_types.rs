use chrono::{DateTime, Utc};
use civic_core::models::{ComplaintRecord, GeoPoint, Hotspot};
use civic_intake::ComplaintFields;
use serde::Serialize;
use tabled::Tabled;

/// Output for resolve command
#[derive(Debug, Serialize)]
pub struct ResolveOutput {
    pub input: Option<String>,
    pub zone: String,
    pub coords: GeoPoint,
    pub matched_keyword: Option<String>,
    pub fallback: bool,
}

/// Output for sla command
#[derive(Debug, Serialize)]
pub struct SlaOutput {
    pub category: String,
    pub hours: u32,
    pub start: DateTime<Utc>,
    pub deadline: DateTime<Utc>,
    pub remaining_hours: i64,
    pub breached: bool,
}

/// Output for intake command
#[derive(Debug, Serialize)]
pub struct IntakeOutput {
    pub fields: ComplaintFields,
    pub record: ComplaintRecord,
}

/// Hotspot table row
#[derive(Debug, Tabled)]
pub struct HotspotRow {
    #[tabled(rename = "#")]
    pub id: u32,
    #[tabled(rename = "Area")]
    pub area: String,
    #[tabled(rename = "Zone")]
    pub zone: String,
    #[tabled(rename = "Complaints")]
    pub count: usize,
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Severity")]
    pub severity: String,
    #[tabled(rename = "Centroid")]
    pub centroid: String,
}

impl From<&Hotspot> for HotspotRow {
    fn from(hotspot: &Hotspot) -> Self {
        Self {
            id: hotspot.id,
            area: hotspot.area_name.clone(),
            zone: hotspot.zone.clone(),
            count: hotspot.complaint_count,
            category: hotspot.dominant_category.clone(),
            severity: hotspot.severity.to_string(),
            centroid: hotspot.centroid.to_string(),
        }
    }
}

/// Output for heatmap command
#[derive(Debug, Serialize)]
pub struct HeatmapOutput {
    pub zone: Option<String>,
    pub count: usize,
    pub points: Vec<[f64; 3]>,
}

/// One configuration key with provenance
#[derive(Debug, Serialize, Tabled)]
pub struct ConfigEntry {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}
