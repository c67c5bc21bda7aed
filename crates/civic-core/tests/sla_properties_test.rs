//! Property tests for category canonicalisation and SLA deadlines

use chrono::{Duration, TimeZone, Utc};
use civic_core::{canonical_code, compute_sla, SlaCalculator, SlaTable};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_canonical_code_is_idempotent(raw in "[A-Za-z0-9 _-]{0,30}") {
        let once = canonical_code(&raw);
        prop_assert_eq!(canonical_code(&once), once);
    }

    #[test]
    fn prop_canonical_code_ignores_ascii_case(raw in "[A-Za-z _-]{0,30}") {
        prop_assert_eq!(canonical_code(&raw.to_lowercase()), canonical_code(&raw));
    }

    #[test]
    fn prop_deadline_is_start_plus_hours(
        category in "[A-Za-z_ ]{0,24}",
        secs in 0i64..4_000_000_000,
    ) {
        let start = Utc.timestamp_opt(secs, 0).unwrap();
        let calculator = SlaCalculator::default();
        let terms = calculator.terms(&category, start);

        prop_assert_eq!(terms.deadline, start + Duration::hours(i64::from(terms.hours)));
        prop_assert_eq!(compute_sla(&category, start), (terms.hours, terms.deadline));
        prop_assert!(!calculator.is_breached(&category, start, terms.deadline));
    }

    #[test]
    fn prop_unknown_categories_get_default(hours in 1u32..1000, suffix in "[0-9]{1,6}") {
        let table = SlaTable::delhi().with_default_hours(hours).unwrap();
        let calculator = SlaCalculator::new(table);
        prop_assert_eq!(calculator.sla_hours(&format!("NOT_A_CATEGORY_{}", suffix)), hours);
    }
}
