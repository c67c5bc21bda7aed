//! Hotspot ranking over geocoded complaints.
//!
//! Complaints are labelled with [`Dbscan`], each non-noise cluster is
//! summarised into a [`Hotspot`], and the largest clusters are returned.
//! Any clustering failure is folded into a degraded [`HotspotReport`]; it
//! never reaches the caller as an error.

use civic_core::models::{
    ClusterParams, Complaint, GeoPoint, Hotspot, HotspotReport, HotspotStatus, Severity, TieBreak,
};

use crate::cluster::{ClusterError, Dbscan, Result};
use crate::spatial::mean_center;

const UNKNOWN_AREA: &str = "Unknown Area";
const GENERAL: &str = "General";

/// Groups complaints into ranked hotspots
#[derive(Debug, Clone, Default)]
pub struct HotspotClusterer {
    params: ClusterParams,
}

impl HotspotClusterer {
    pub fn new(params: ClusterParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ClusterParams {
        &self.params
    }

    /// Ranked hotspots; empty when there are none or when clustering failed
    pub fn cluster(&self, complaints: &[Complaint]) -> Vec<Hotspot> {
        self.cluster_report(complaints).hotspots
    }

    /// Ranked hotspots plus whether the run completed
    pub fn cluster_report(&self, complaints: &[Complaint]) -> HotspotReport {
        if complaints.is_empty() {
            return HotspotReport::empty();
        }

        match self.run(complaints) {
            Ok(report) => report,
            Err(e) => {
                tracing::debug!(error = %e, complaints = complaints.len(), "Clustering degraded");
                HotspotReport::degraded(e.to_string())
            }
        }
    }

    fn run(&self, complaints: &[Complaint]) -> Result<HotspotReport> {
        let dbscan = Dbscan::new(self.params.radius_deg, self.params.min_points)?;
        let points: Vec<GeoPoint> = complaints.iter().map(|c| c.coords).collect();
        let assignment = dbscan.fit(&points)?;

        let mut hotspots = assignment
            .clusters()
            .into_iter()
            .enumerate()
            .map(|(label, members)| {
                let members: Vec<&Complaint> = members.iter().map(|&i| &complaints[i]).collect();
                summarize(label, &members)
            })
            .collect::<Result<Vec<_>>>()?;

        rank(&mut hotspots, self.params.tie_break);
        hotspots.truncate(self.params.top_n);

        let noise_points = assignment.noise_count();
        Ok(HotspotReport {
            status: HotspotStatus::Computed,
            hotspots,
            clustered_points: complaints.len() - noise_points,
            noise_points,
        })
    }
}

/// Hotspots for `complaints` with the default radius, threshold and top-N
pub fn compute_hotspots(complaints: &[Complaint]) -> Vec<Hotspot> {
    HotspotClusterer::default().cluster(complaints)
}

fn summarize(label: usize, members: &[&Complaint]) -> Result<Hotspot> {
    let coords: Vec<GeoPoint> = members.iter().map(|c| c.coords).collect();
    let centroid = mean_center(&coords)
        .filter(GeoPoint::is_finite)
        .ok_or(ClusterError::NumericOverflow { label })?;

    let area_name = most_frequent(members.iter().map(|c| area_prefix(&c.location_text)))
        .unwrap_or_else(|| UNKNOWN_AREA.to_string());
    let dominant_category = most_frequent(members.iter().map(|c| or_general(&c.category)))
        .unwrap_or_else(|| GENERAL.to_string());
    let zone = members
        .first()
        .map(|c| or_general(&c.zone))
        .unwrap_or_else(|| GENERAL.to_string());

    Ok(Hotspot {
        id: label as u32 + 1,
        area_name,
        zone,
        complaint_count: members.len(),
        dominant_category,
        severity: Severity::from_count(members.len()),
        centroid,
    })
}

/// Location text up to the first comma, trimmed
fn area_prefix(location_text: &str) -> String {
    let prefix = location_text.split(',').next().unwrap_or_default().trim();
    if prefix.is_empty() {
        UNKNOWN_AREA.to_string()
    } else {
        prefix.to_string()
    }
}

fn or_general(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        GENERAL.to_string()
    } else {
        value.to_string()
    }
}

/// Most common value; ties go to the value seen first
fn most_frequent(values: impl Iterator<Item = String>) -> Option<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(v, _)| *v == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }

    let mut best: Option<(String, usize)> = None;
    for (value, count) in counts {
        if best.as_ref().map_or(true, |(_, c)| count > *c) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// Stable sort by descending count, then the configured tie-break
fn rank(hotspots: &mut [Hotspot], tie_break: TieBreak) {
    hotspots.sort_by(|a, b| {
        let by_count = b.complaint_count.cmp(&a.complaint_count);
        match tie_break {
            TieBreak::ClusterOrder => by_count,
            TieBreak::AreaThenCentroid => by_count
                .then_with(|| a.area_name.cmp(&b.area_name))
                .then_with(|| a.centroid.lat.total_cmp(&b.centroid.lat))
                .then_with(|| a.centroid.lng.total_cmp(&b.centroid.lng)),
        }
    });
}
