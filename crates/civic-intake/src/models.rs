use chrono::{DateTime, Utc};
use civic_core::error::{CivicError, Result};
use civic_core::models::{GeoPoint, IntakeSource, Priority};
use serde::{Deserialize, Serialize};

/// Minimum description length after trimming
pub const MIN_DESCRIPTION_CHARS: usize = 5;

/// Minimum location length after trimming
pub const MIN_LOCATION_CHARS: usize = 3;

/// A complaint as submitted by a citizen, before derivation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplaintDraft {
    pub category: String,
    pub description: String,
    pub location: String,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub citizen_name: Option<String>,
    #[serde(default)]
    pub citizen_phone: Option<String>,
    #[serde(default)]
    pub source: IntakeSource,
}

impl ComplaintDraft {
    pub fn new(
        category: impl Into<String>,
        description: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            description: description.into(),
            location: location.into(),
            priority: None,
            citizen_name: None,
            citizen_phone: None,
            source: IntakeSource::default(),
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_source(mut self, source: IntakeSource) -> Self {
        self.source = source;
        self
    }

    pub fn with_citizen(mut self, name: impl Into<String>, phone: impl Into<String>) -> Self {
        self.citizen_name = Some(name.into());
        self.citizen_phone = Some(phone.into());
        self
    }

    /// Check the citizen-supplied text fields
    pub fn validate(&self) -> Result<()> {
        if self.category.trim().is_empty() {
            return Err(CivicError::invalid_complaint("category", "must not be empty"));
        }
        if self.description.trim().chars().count() < MIN_DESCRIPTION_CHARS {
            return Err(CivicError::invalid_complaint(
                "description",
                format!("must be at least {} characters", MIN_DESCRIPTION_CHARS),
            ));
        }
        if self.location.trim().chars().count() < MIN_LOCATION_CHARS {
            return Err(CivicError::invalid_complaint(
                "location",
                format!("must be at least {} characters", MIN_LOCATION_CHARS),
            ));
        }
        Ok(())
    }
}

/// Fields derived at intake time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplaintFields {
    pub zone: String,
    pub coords: GeoPoint,
    pub sla_hours: u32,
    pub deadline: DateTime<Utc>,
    pub priority: Priority,
}

/// One weighted point for a heatmap layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatmapPoint {
    pub lat: f64,
    pub lng: f64,
    pub intensity: f64,
}

impl HeatmapPoint {
    /// `[lat, lng, intensity]`, the layout map libraries expect
    pub fn to_triple(&self) -> [f64; 3] {
        [self.lat, self.lng, self.intensity]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_draft() {
        let draft = ComplaintDraft::new("CLEANLINESS", "Garbage pile", "Rohini Sector 5");
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_short_fields_rejected() {
        let short_description = ComplaintDraft::new("CLEANLINESS", " bad ", "Rohini");
        assert!(matches!(
            short_description.validate(),
            Err(CivicError::InvalidComplaint { field, .. }) if field == "description"
        ));

        let short_location = ComplaintDraft::new("CLEANLINESS", "Garbage pile", "  ab ");
        assert!(matches!(
            short_location.validate(),
            Err(CivicError::InvalidComplaint { field, .. }) if field == "location"
        ));

        let no_category = ComplaintDraft::new("   ", "Garbage pile", "Rohini");
        assert!(matches!(
            no_category.validate(),
            Err(CivicError::InvalidComplaint { field, .. }) if field == "category"
        ));
    }

    #[test]
    fn test_draft_deserializes_with_defaults() {
        let draft: ComplaintDraft = serde_json::from_str(
            r#"{"category": "ELECTRICAL", "description": "Streetlight out", "location": "Dwarka"}"#,
        )
        .unwrap();
        assert_eq!(draft.source, IntakeSource::Web);
        assert!(draft.priority.is_none());
    }
}
