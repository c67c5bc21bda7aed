use async_trait::async_trait;
use chrono::{DateTime, Utc};
use civic_core::error::Result;
use civic_core::models::{
    ComplaintId, ComplaintRecord, ComplaintStatus, GeoPoint, IntakeSource, Priority,
};
use serde::{Deserialize, Serialize};

/// Port for complaint record storage
#[async_trait]
pub trait ComplaintStore: Send + Sync {
    /// Records matching `filter`, newest first
    async fn select(&self, filter: &RecordFilter) -> Result<Vec<ComplaintRecord>>;

    /// Get a single record by ID
    async fn get(&self, id: ComplaintId) -> Result<Option<ComplaintRecord>>;

    /// Store a new complaint and return it with its assigned ID
    async fn insert(&self, complaint: NewComplaint) -> Result<ComplaintRecord>;

    /// Apply an operator update; `None` if the ID is unknown
    async fn update(
        &self,
        id: ComplaintId,
        update: ComplaintUpdate,
    ) -> Result<Option<ComplaintRecord>>;
}

/// Selection criteria for [`ComplaintStore::select`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordFilter {
    /// Exact zone identifier
    pub zone: Option<String>,

    pub status: Option<ComplaintStatus>,

    /// Skip records that were never geocoded
    pub with_coords_only: bool,

    /// Maximum number of records returned
    pub limit: Option<usize>,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = Some(zone.into());
        self
    }

    pub fn with_status(mut self, status: ComplaintStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn geocoded(mut self) -> Self {
        self.with_coords_only = true;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether `record` passes every criterion except the limit
    pub fn matches(&self, record: &ComplaintRecord) -> bool {
        if let Some(zone) = &self.zone {
            if &record.zone != zone {
                return false;
            }
        }
        if let Some(status) = self.status {
            if record.status != status {
                return false;
            }
        }
        !(self.with_coords_only && record.coords.is_none())
    }
}

/// A fully derived complaint ready to be stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewComplaint {
    pub complaint_number: String,
    pub category: String,
    pub description: String,
    pub location: String,
    pub zone: String,
    pub coords: Option<GeoPoint>,
    pub priority: Priority,
    pub source: IntakeSource,
    pub sla_hours: u32,
    pub sla_deadline: DateTime<Utc>,
    pub citizen_name: Option<String>,
    pub citizen_phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Operator-side changes; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplaintUpdate {
    pub status: Option<ComplaintStatus>,
    pub assigned_to: Option<String>,
    pub notes: Option<String>,
    pub priority: Option<Priority>,
}

impl ComplaintUpdate {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.assigned_to.is_none()
            && self.notes.is_none()
            && self.priority.is_none()
    }
}
