use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::geometry::GeoPoint;
use crate::error::{CivicError, Result};

/// Unique identifier for a stored complaint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComplaintId(pub u64);

impl fmt::Display for ComplaintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Complaint priority as chosen by the citizen or operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }

    /// Weight used when the complaint is drawn on a heatmap
    pub fn heat_intensity(&self) -> f64 {
        match self {
            Priority::Critical => 1.0,
            Priority::High => 0.8,
            Priority::Medium => 0.5,
            Priority::Low => 0.3,
        }
    }
}

impl FromStr for Priority {
    type Err = CivicError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "critical" => Ok(Priority::Critical),
            other => Err(CivicError::invalid_complaint(
                "priority",
                format!("'{}' is not one of low, medium, high, critical", other),
            )),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workflow status of a stored complaint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ComplaintStatus {
    #[default]
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
}

impl FromStr for ComplaintStatus {
    type Err = CivicError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "open" => Ok(ComplaintStatus::Open),
            "in-progress" | "in progress" => Ok(ComplaintStatus::InProgress),
            "resolved" => Ok(ComplaintStatus::Resolved),
            other => Err(CivicError::invalid_complaint(
                "status",
                format!("'{}' is not one of open, in-progress, resolved", other),
            )),
        }
    }
}

/// Channel a complaint arrived through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IntakeSource {
    #[default]
    Web,
    Voice,
    Sms,
}

impl IntakeSource {
    /// Ticket prefix and how many trailing timestamp digits follow it
    pub fn ticket_format(&self) -> (&'static str, usize) {
        match self {
            IntakeSource::Web => ("MCD-WEB-", 10),
            IntakeSource::Voice => ("MCD-", 8),
            IntakeSource::Sms => ("MCD-SMS-", 8),
        }
    }
}

/// Geocoded complaint as seen by the zone, SLA and clustering engine.
///
/// Zone, coordinates and SLA hours are derived at intake time and never
/// supplied by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Complaint {
    pub id: ComplaintId,
    pub category: String,
    pub location_text: String,
    pub zone: String,
    pub coords: GeoPoint,
    pub priority: Priority,
    pub sla_hours: u32,
    pub created_at: DateTime<Utc>,
}

impl Complaint {
    /// Create a complaint at the given coordinate with empty text fields
    pub fn new(id: u64, coords: GeoPoint) -> Self {
        Self {
            id: ComplaintId(id),
            category: String::new(),
            location_text: String::new(),
            zone: String::new(),
            coords,
            priority: Priority::default(),
            sla_hours: 48,
            created_at: DateTime::<Utc>::default(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_location(mut self, location_text: impl Into<String>) -> Self {
        self.location_text = location_text.into();
        self
    }

    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = zone.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_sla_hours(mut self, sla_hours: u32) -> Self {
        self.sla_hours = sla_hours;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

/// Full complaint record as held by the external store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplaintRecord {
    /// Store-assigned identifier
    pub id: ComplaintId,

    /// Citizen-facing ticket number (e.g. "MCD-WEB-1767225600")
    pub complaint_number: String,

    pub category: String,
    pub description: String,

    /// Free-text location as given by the citizen
    pub location: String,

    pub zone: String,

    /// Derived coordinate; `None` for legacy rows that were never geocoded
    pub coords: Option<GeoPoint>,

    pub priority: Priority,
    pub status: ComplaintStatus,
    pub source: IntakeSource,
    pub sla_hours: u32,
    pub sla_deadline: DateTime<Utc>,
    pub citizen_name: Option<String>,
    pub citizen_phone: Option<String>,
    pub assigned_to: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl ComplaintRecord {
    /// Project onto the engine's view; records without coordinates yield `None`
    pub fn to_complaint(&self) -> Option<Complaint> {
        let coords = self.coords?;
        Some(Complaint {
            id: self.id,
            category: self.category.clone(),
            location_text: self.location.clone(),
            zone: self.zone.clone(),
            coords,
            priority: self.priority,
            sla_hours: self.sla_hours,
            created_at: self.created_at,
        })
    }
}
