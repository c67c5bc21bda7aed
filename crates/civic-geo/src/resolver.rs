//! Free-text location → zone resolution.
//!
//! Matching is plain substring search over lower-cased, trimmed text. Zones
//! are tried in directory order and keywords in their listed order; the first
//! hit wins. There is no scoring and no word-boundary check, so a keyword can
//! match inside a longer word. Unmatched input resolves to the directory's
//! fallback zone, never to an error.

use civic_core::models::ZoneResolution;
use civic_core::ZoneDirectory;
use std::sync::OnceLock;

/// Resolves location text against a zone directory
#[derive(Debug, Clone)]
pub struct LocationResolver {
    directory: ZoneDirectory,
}

impl LocationResolver {
    pub fn new(directory: ZoneDirectory) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> &ZoneDirectory {
        &self.directory
    }

    /// Resolve optional free text to a zone and representative coordinate
    pub fn resolve(&self, text: Option<&str>) -> ZoneResolution {
        let normalized = text.map(|t| t.trim().to_lowercase()).unwrap_or_default();

        if !normalized.is_empty() {
            for zone in self.directory.zones() {
                if let Some(keyword) = zone.first_match(&normalized) {
                    return ZoneResolution {
                        zone_id: zone.id.clone(),
                        coords: zone.centroid,
                        matched_keyword: Some(keyword.to_string()),
                    };
                }
            }
        }

        let fallback = self.directory.fallback();
        ZoneResolution {
            zone_id: fallback.zone_id.clone(),
            coords: fallback.coords,
            matched_keyword: None,
        }
    }

    /// Resolve a plain string (empty text takes the fallback)
    pub fn resolve_str(&self, text: &str) -> ZoneResolution {
        self.resolve(Some(text))
    }
}

impl Default for LocationResolver {
    fn default() -> Self {
        Self::new(ZoneDirectory::delhi())
    }
}

/// Resolve against the built-in Delhi directory
pub fn resolve_zone_and_coords(text: Option<&str>) -> (String, civic_core::models::GeoPoint) {
    static RESOLVER: OnceLock<LocationResolver> = OnceLock::new();
    RESOLVER.get_or_init(LocationResolver::default).resolve(text).into_pair()
}
