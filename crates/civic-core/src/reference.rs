//! Static reference tables: the ordered zone directory and the SLA table.
//!
//! Both are immutable after construction. Zone order is part of the data:
//! the resolver takes the first zone whose keyword matches, so reordering
//! zones or keywords changes resolution results.

use crate::error::{CivicError, Result};
use crate::models::{FallbackZone, GeoPoint, Zone};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Canonical upper-case code for categories and zone filters.
///
/// Trims, upper-cases ASCII letters and turns each run of spaces, hyphens or
/// underscores into a single `_`: `" public  health"` becomes `PUBLIC_HEALTH`.
pub fn canonical_code(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_separator = false;

    for ch in raw.trim().chars() {
        if ch == '-' || ch == '_' || ch.is_whitespace() {
            pending_separator = true;
            continue;
        }
        if pending_separator && !out.is_empty() {
            out.push('_');
        }
        pending_separator = false;
        out.push(ch.to_ascii_uppercase());
    }

    out
}

/// Ordered list of zones plus the fallback used for unmatched text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneDirectory {
    zones: Vec<Zone>,
    fallback: FallbackZone,
}

impl ZoneDirectory {
    /// Build a directory, normalizing keywords and checking invariants
    pub fn new(zones: Vec<Zone>, fallback: FallbackZone) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(zones.len());

        for zone in zones {
            let id = zone.id.trim().to_string();
            if id.is_empty() {
                return Err(CivicError::invalid_reference("zone id must not be empty"));
            }
            if !seen.insert(id.clone()) {
                return Err(CivicError::invalid_reference(format!("duplicate zone id '{}'", id)));
            }
            if !zone.centroid.is_finite() {
                return Err(CivicError::invalid_reference(format!(
                    "zone '{}' has a non-finite centroid",
                    id
                )));
            }

            let mut keywords = Vec::with_capacity(zone.area_keywords.len());
            for keyword in zone.area_keywords {
                let keyword = keyword.trim().to_lowercase();
                // An empty keyword is a substring of every text
                if keyword.is_empty() {
                    return Err(CivicError::invalid_reference(format!(
                        "zone '{}' has an empty area keyword",
                        id
                    )));
                }
                keywords.push(keyword);
            }

            normalized.push(Zone { id, centroid: zone.centroid, area_keywords: keywords });
        }

        if !seen.contains(fallback.zone_id.as_str()) {
            return Err(CivicError::invalid_reference(format!(
                "fallback zone '{}' is not in the directory",
                fallback.zone_id
            )));
        }
        if !fallback.coords.is_finite() {
            return Err(CivicError::invalid_reference("fallback coordinate is not finite"));
        }

        Ok(Self { zones: normalized, fallback })
    }

    /// Delhi municipal zones, in resolution precedence order
    pub fn delhi() -> Self {
        let zones = vec![
            Zone::new(
                "ROHINI",
                GeoPoint::new(28.7041, 77.1025),
                ["rohini", "pitampura", "mangolpuri", "sultanpuri", "budh vihar"],
            ),
            Zone::new(
                "SOUTH",
                GeoPoint::new(28.5494, 77.2001),
                ["saket", "hauz khas", "malviya nagar", "vasant kunj", "mehrauli", "lajpat nagar"],
            ),
            Zone::new(
                "CENTRAL",
                GeoPoint::new(28.6448, 77.2115),
                ["karol bagh", "paharganj", "old delhi", "daryaganj", "chandni chowk"],
            ),
            Zone::new(
                "WEST",
                GeoPoint::new(28.6219, 77.0878),
                ["janakpuri", "dwarka", "vikaspuri", "uttam nagar", "rajouri garden"],
            ),
            Zone::new(
                "EAST",
                GeoPoint::new(28.6304, 77.2770),
                ["laxmi nagar", "mayur vihar", "preet vihar", "shahdara", "patparganj"],
            ),
            Zone::new("NARELA", GeoPoint::new(28.8526, 77.0929), ["narela", "bawana", "alipur"]),
            Zone::new(
                "NAJAFGARH",
                GeoPoint::new(28.6094, 76.9798),
                ["najafgarh", "dichaon kalan", "chhawla"],
            ),
        ];

        // City centre, not the CENTRAL zone centroid
        let fallback =
            FallbackZone { zone_id: "CENTRAL".to_string(), coords: GeoPoint::new(28.6139, 77.2090) };

        Self { zones, fallback }
    }

    /// Zones in precedence order
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn fallback(&self) -> &FallbackZone {
        &self.fallback
    }

    pub fn get(&self, id: &str) -> Option<&Zone> {
        self.zones.iter().find(|zone| zone.id == id)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

/// Category → response-time budget table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlaTable {
    entries: Vec<(String, u32)>,
    default_hours: u32,
}

impl SlaTable {
    pub const DEFAULT_HOURS: u32 = 48;

    /// Build a table; category names are stored in canonical form
    pub fn new<I, S>(entries: I, default_hours: u32) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: AsRef<str>,
    {
        if default_hours == 0 {
            return Err(CivicError::invalid_reference("default SLA hours must be positive"));
        }

        let mut table: Vec<(String, u32)> = Vec::new();
        for (name, hours) in entries {
            let code = canonical_code(name.as_ref());
            if code.is_empty() {
                return Err(CivicError::invalid_reference("SLA category name must not be empty"));
            }
            if hours == 0 {
                return Err(CivicError::invalid_reference(format!(
                    "SLA hours for '{}' must be positive",
                    code
                )));
            }
            // Later duplicates override earlier ones
            match table.iter_mut().find(|(existing, _)| *existing == code) {
                Some(entry) => entry.1 = hours,
                None => table.push((code, hours)),
            }
        }

        Ok(Self { entries: table, default_hours })
    }

    /// MCD department SLA budgets
    pub fn delhi() -> Self {
        let entries = [
            ("VETERINARY", 24),
            ("TOLL_TAX", 48),
            ("HORTICULTURE", 48),
            ("ELECTRICAL", 48),
            ("ENGINEERING_BUILDING", 72),
            ("PARKING_CELL", 24),
            ("PUBLIC_HEALTH", 24),
            ("GENERAL_BRANCH", 48),
            ("CLEANLINESS", 24),
            ("ENGINEERING_WORKS", 72),
            ("ENGINEERING", 72),
            ("ADVERTISEMENT", 48),
            ("IT_DEPARTMENT", 72),
            ("GENERAL", 48),
        ];

        Self {
            entries: entries.iter().map(|(name, hours)| (name.to_string(), *hours)).collect(),
            default_hours: Self::DEFAULT_HOURS,
        }
    }

    /// Hours for an already-canonical category code
    pub fn hours_for(&self, code: &str) -> Option<u32> {
        self.entries.iter().find(|(name, _)| name == code).map(|(_, hours)| *hours)
    }

    pub fn default_hours(&self) -> u32 {
        self.default_hours
    }

    /// Replace the fallback budget for unknown categories
    pub fn with_default_hours(mut self, hours: u32) -> Result<Self> {
        if hours == 0 {
            return Err(CivicError::invalid_reference("default SLA hours must be positive"));
        }
        self.default_hours = hours;
        Ok(self)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(name, hours)| (name.as_str(), *hours))
    }
}

/// All static reference data, loaded once at start-up
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceData {
    pub zones: ZoneDirectory,
    pub sla: SlaTable,
}

impl ReferenceData {
    pub fn delhi() -> Self {
        Self { zones: ZoneDirectory::delhi(), sla: SlaTable::delhi() }
    }

    /// Load reference data from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| CivicError::ConfigInvalid {
                key: "reference_data".to_string(),
                reason: format!("Failed to read {}: {}", path.as_ref().display(), e),
            })?;
        Self::from_toml_str(&content)
    }

    /// Parse reference data from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ReferenceFile = toml::from_str(content).map_err(|e| {
            CivicError::invalid_reference(format!("Failed to parse TOML: {}", e))
        })?;

        let zones = file
            .zones
            .into_iter()
            .map(|z| Zone::new(z.id, GeoPoint::new(z.lat, z.lng), z.areas))
            .collect();
        let fallback = FallbackZone {
            zone_id: file.fallback.zone.trim().to_string(),
            coords: GeoPoint::new(file.fallback.lat, file.fallback.lng),
        };

        let sla = match file.sla {
            Some(section) => SlaTable::new(
                section.categories.into_iter().map(|c| (c.name, c.hours)),
                section.default_hours.unwrap_or(SlaTable::DEFAULT_HOURS),
            )?,
            None => SlaTable::delhi(),
        };

        Ok(Self { zones: ZoneDirectory::new(zones, fallback)?, sla })
    }
}

#[derive(Debug, Deserialize)]
struct ReferenceFile {
    fallback: FallbackSection,
    #[serde(default)]
    zones: Vec<ZoneSection>,
    sla: Option<SlaSection>,
}

#[derive(Debug, Deserialize)]
struct FallbackSection {
    zone: String,
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct ZoneSection {
    id: String,
    lat: f64,
    lng: f64,
    #[serde(default)]
    areas: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SlaSection {
    default_hours: Option<u32>,
    #[serde(default)]
    categories: Vec<SlaCategory>,
}

#[derive(Debug, Deserialize)]
struct SlaCategory {
    name: String,
    hours: u32,
}
