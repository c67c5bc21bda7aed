use serde::{Deserialize, Serialize};

use super::geometry::GeoPoint;

/// A coarse administrative partition of the service area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// Stable zone code (e.g. "ROHINI")
    pub id: String,

    /// Representative coordinate for complaints resolved to this zone
    pub centroid: GeoPoint,

    /// Lower-case area names, in match precedence order
    pub area_keywords: Vec<String>,
}

impl Zone {
    pub fn new<I, S>(id: impl Into<String>, centroid: GeoPoint, area_keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            centroid,
            area_keywords: area_keywords.into_iter().map(Into::into).collect(),
        }
    }

    /// First keyword contained in the already-normalized text
    pub fn first_match(&self, normalized_text: &str) -> Option<&str> {
        self.area_keywords
            .iter()
            .find(|keyword| normalized_text.contains(keyword.as_str()))
            .map(String::as_str)
    }
}

/// Zone and coordinate returned when no keyword matches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackZone {
    pub zone_id: String,
    pub coords: GeoPoint,
}

/// Outcome of resolving free-text location input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneResolution {
    pub zone_id: String,
    pub coords: GeoPoint,

    /// Keyword that decided the match; `None` means the fallback was used
    pub matched_keyword: Option<String>,
}

impl ZoneResolution {
    pub fn is_fallback(&self) -> bool {
        self.matched_keyword.is_none()
    }

    pub fn into_pair(self) -> (String, GeoPoint) {
        (self.zone_id, self.coords)
    }
}
