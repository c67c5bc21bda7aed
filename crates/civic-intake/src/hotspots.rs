//! Store-backed hotspot and heatmap views.
//!
//! Both views read a bounded, newest-first snapshot of geocoded complaints.
//! Zone filtering happens here, by restricting the snapshot; the clusterer
//! itself knows nothing about zones.

use civic_core::canonical_code;
use civic_core::error::Result;
use civic_core::models::{ComplaintRecord, HotspotReport, HotspotStatus};
use civic_geo::HotspotClusterer;
use civic_store::{ComplaintStore, RecordFilter};

use crate::models::HeatmapPoint;

/// Most recent complaints considered for clustering
pub const HOTSPOT_SAMPLE_LIMIT: usize = 1000;

/// Most recent complaints drawn on the heatmap
pub const HEATMAP_SAMPLE_LIMIT: usize = 2000;

/// `None`, blank and "all" mean no filter; anything else becomes a zone id
pub fn normalize_zone_filter(zone: Option<&str>) -> Option<String> {
    let zone = zone?.trim();
    if zone.is_empty() || zone.eq_ignore_ascii_case("all") {
        return None;
    }
    Some(canonical_code(zone))
}

/// Hotspot and heatmap queries over a complaint store
pub struct HotspotService<S>
where
    S: ComplaintStore,
{
    store: S,
    clusterer: HotspotClusterer,
}

impl<S> HotspotService<S>
where
    S: ComplaintStore,
{
    pub fn new(store: S, clusterer: HotspotClusterer) -> Self {
        Self { store, clusterer }
    }

    pub fn clusterer(&self) -> &HotspotClusterer {
        &self.clusterer
    }

    /// Ranked hotspots for a zone (or all zones).
    ///
    /// A degraded report is logged and returned as-is; store failures
    /// propagate.
    pub async fn hotspots(&self, zone: Option<&str>) -> Result<HotspotReport> {
        let records = self.snapshot(zone, HOTSPOT_SAMPLE_LIMIT).await?;
        let complaints: Vec<_> = records.iter().filter_map(ComplaintRecord::to_complaint).collect();

        let report = self.clusterer.cluster_report(&complaints);
        match &report.status {
            HotspotStatus::Computed => tracing::debug!(
                complaints = complaints.len(),
                hotspots = report.hotspots.len(),
                noise = report.noise_points,
                "Hotspots computed"
            ),
            HotspotStatus::Degraded { reason } => tracing::warn!(
                complaints = complaints.len(),
                reason = %reason,
                "Hotspot clustering degraded to an empty result"
            ),
        }
        Ok(report)
    }

    /// Priority-weighted points for a zone (or all zones)
    pub async fn heatmap(&self, zone: Option<&str>) -> Result<Vec<HeatmapPoint>> {
        let records = self.snapshot(zone, HEATMAP_SAMPLE_LIMIT).await?;

        Ok(records
            .iter()
            .filter_map(|r| {
                r.coords.map(|c| HeatmapPoint {
                    lat: c.lat,
                    lng: c.lng,
                    intensity: r.priority.heat_intensity(),
                })
            })
            .collect())
    }

    async fn snapshot(&self, zone: Option<&str>, limit: usize) -> Result<Vec<ComplaintRecord>> {
        let mut filter = RecordFilter::new().geocoded().with_limit(limit);
        filter.zone = normalize_zone_filter(zone);
        self.store.select(&filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_zone_filter() {
        assert_eq!(normalize_zone_filter(None), None);
        assert_eq!(normalize_zone_filter(Some("")), None);
        assert_eq!(normalize_zone_filter(Some("  ")), None);
        assert_eq!(normalize_zone_filter(Some("All")), None);
        assert_eq!(normalize_zone_filter(Some("rohini")), Some("ROHINI".to_string()));
        assert_eq!(normalize_zone_filter(Some("Civil-Lines")), Some("CIVIL_LINES".to_string()));
        assert_eq!(normalize_zone_filter(Some("city sp")), Some("CITY_SP".to_string()));
    }
}
