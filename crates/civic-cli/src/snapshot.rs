//! Complaint snapshots read from JSON files.
//!
//! A snapshot is a JSON array of rows. Only `category` and `location` are
//! required; a missing zone is resolved from the location. Zones and
//! categories are stored in canonical form, the same as lodged complaints.
//! Explicit ids must be unique; rows without one are numbered after the
//! largest explicit id. Rows with missing or out-of-range coordinates stay out
//! of clustering and the heatmap.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use civic_core::models::{
    ComplaintId, ComplaintRecord, ComplaintStatus, GeoPoint, IntakeSource, Priority,
};
use civic_core::canonical_code;
use civic_geo::validate_point;
use civic_intake::IntakeFacade;
use civic_store::MemoryComplaintStore;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotRow {
    #[serde(default)]
    pub id: Option<u64>,
    pub category: String,
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub zone: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: ComplaintStatus,
    #[serde(default)]
    pub source: IntakeSource,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

impl SnapshotRow {
    fn into_record(self, id: u64, position: usize, facade: &IntakeFacade) -> ComplaintRecord {
        let zone = self
            .zone
            .filter(|z| !z.trim().is_empty())
            .map(|z| canonical_code(&z))
            .unwrap_or_else(|| facade.resolver().resolve_str(&self.location).zone_id);
        let coords = match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => checked_coords(position, GeoPoint::new(lat, lng)),
            _ => None,
        };
        let (sla_hours, sla_deadline) = facade.compute_sla(&self.category, self.created_at);

        ComplaintRecord {
            id: ComplaintId(id),
            complaint_number: String::new(),
            category: canonical_code(&self.category),
            description: self.description,
            location: self.location,
            zone,
            coords,
            priority: self.priority,
            status: self.status,
            source: self.source,
            sla_hours,
            sla_deadline,
            citizen_name: None,
            citizen_phone: None,
            assigned_to: None,
            notes: None,
            created_at: self.created_at,
            resolved_at: None,
        }
    }
}

fn checked_coords(position: usize, point: GeoPoint) -> Option<GeoPoint> {
    let validation = validate_point(&point);
    if validation.is_valid {
        return Some(point);
    }
    for error in &validation.errors {
        tracing::warn!(row = position, reason = %error.reason, "Ignoring snapshot coordinates");
    }
    None
}

pub fn parse_rows(content: &str) -> Result<Vec<SnapshotRow>> {
    serde_json::from_str(content).context("Snapshot must be a JSON array of complaint rows")
}

/// Load a snapshot file into an in-memory store
pub fn load_store(path: &Path, facade: &IntakeFacade) -> Result<MemoryComplaintStore> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    let rows = parse_rows(&content)?;

    tracing::debug!(rows = rows.len(), path = %path.display(), "Loaded complaint snapshot");

    Ok(MemoryComplaintStore::with_records(to_records(rows, facade)?))
}

/// Records for `rows`, rejecting duplicate explicit ids
pub fn to_records(rows: Vec<SnapshotRow>, facade: &IntakeFacade) -> Result<Vec<ComplaintRecord>> {
    let mut seen = HashSet::new();
    for (position, id) in rows.iter().enumerate().filter_map(|(i, r)| r.id.map(|id| (i, id))) {
        if !seen.insert(id) {
            bail!("Duplicate complaint id {} in snapshot row {}", id, position);
        }
    }

    let mut next_id = seen.iter().max().map_or(0, |max| max + 1);
    Ok(rows
        .into_iter()
        .enumerate()
        .map(|(position, row)| {
            let id = row.id.unwrap_or_else(|| {
                next_id += 1;
                next_id - 1
            });
            row.into_record(id, position, facade)
        })
        .collect())
}
