//! Intake-time field derivation.
//!
//! Pure composition of the location resolver and the SLA calculator. The
//! same inputs always produce the same fields, so complaint creation can be
//! retried safely by the caller.

use chrono::{DateTime, Utc};
use civic_core::models::{GeoPoint, Priority};
use civic_core::{ReferenceData, SlaCalculator};
use civic_geo::LocationResolver;

use crate::models::ComplaintFields;

/// Derives zone, coordinates and SLA for a new complaint
#[derive(Debug, Clone, Default)]
pub struct IntakeFacade {
    resolver: LocationResolver,
    sla: SlaCalculator,
}

impl IntakeFacade {
    pub fn new(resolver: LocationResolver, sla: SlaCalculator) -> Self {
        Self { resolver, sla }
    }

    /// Build a facade over loaded reference data
    pub fn from_reference(reference: ReferenceData) -> Self {
        Self::new(LocationResolver::new(reference.zones), SlaCalculator::new(reference.sla))
    }

    pub fn resolver(&self) -> &LocationResolver {
        &self.resolver
    }

    pub fn sla(&self) -> &SlaCalculator {
        &self.sla
    }

    pub fn build_complaint_fields(
        &self,
        category: &str,
        location_text: Option<&str>,
        priority: Option<Priority>,
        created_at: DateTime<Utc>,
    ) -> ComplaintFields {
        let (zone, coords) = self.resolve_zone_and_coords(location_text);
        let sla_hours = self.sla.sla_hours(category);
        let deadline = self.sla.deadline(category, created_at);

        tracing::debug!(
            category,
            zone = %zone,
            sla_hours,
            "Derived complaint fields"
        );

        ComplaintFields { zone, coords, sla_hours, deadline, priority: priority.unwrap_or_default() }
    }

    pub fn resolve_zone_and_coords(&self, location_text: Option<&str>) -> (String, GeoPoint) {
        self.resolver.resolve(location_text).into_pair()
    }

    pub fn compute_sla(&self, category: &str, created_at: DateTime<Utc>) -> (u32, DateTime<Utc>) {
        let terms = self.sla.terms(category, created_at);
        (terms.hours, terms.deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn created_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 10, 14, 0, 0).unwrap()
    }

    #[test]
    fn test_build_fields_for_known_area() {
        let facade = IntakeFacade::default();
        let fields =
            facade.build_complaint_fields("VETERINARY", Some("Near Rohini Sector 5"), None, created_at());

        assert_eq!(fields.zone, "ROHINI");
        assert_eq!(fields.sla_hours, 24);
        assert_eq!(fields.deadline, created_at() + Duration::hours(24));
        assert_eq!(fields.priority, Priority::Medium);
    }

    #[test]
    fn test_build_fields_falls_back() {
        let facade = IntakeFacade::default();
        let fields = facade.build_complaint_fields(
            "something new",
            None,
            Some(Priority::Critical),
            created_at(),
        );

        assert_eq!(fields.zone, "CENTRAL");
        assert_eq!(fields.coords, GeoPoint::new(28.6139, 77.2090));
        assert_eq!(fields.sla_hours, 48);
        assert_eq!(fields.priority, Priority::Critical);
    }

    #[test]
    fn test_build_fields_is_deterministic() {
        let facade = IntakeFacade::default();
        let a = facade.build_complaint_fields("ENGINEERING", Some("Dwarka Sec 10"), None, created_at());
        let b = facade.build_complaint_fields("ENGINEERING", Some("Dwarka Sec 10"), None, created_at());
        assert_eq!(a, b);
    }

    #[test]
    fn test_compute_sla_matches_fields() {
        let facade = IntakeFacade::default();
        let (hours, deadline) = facade.compute_sla("PUBLIC_HEALTH", created_at());
        let fields = facade.build_complaint_fields("PUBLIC_HEALTH", None, None, created_at());
        assert_eq!((hours, deadline), (fields.sla_hours, fields.deadline));
    }
}
