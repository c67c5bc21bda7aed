//! Category-driven SLA budgets and deadlines.
//!
//! Deadlines use plain calendar arithmetic: no business hours, no holidays.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::reference::{canonical_code, SlaTable};

/// Budget and absolute deadline for one complaint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlaTerms {
    pub hours: u32,
    pub deadline: DateTime<Utc>,
}

/// Looks up response-time budgets by category
#[derive(Debug, Clone, PartialEq)]
pub struct SlaCalculator {
    table: SlaTable,
}

impl SlaCalculator {
    pub fn new(table: SlaTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &SlaTable {
        &self.table
    }

    /// Allotted hours; unknown or free-form categories get the default budget
    pub fn sla_hours(&self, category: &str) -> u32 {
        let code = canonical_code(category);
        self.table.hours_for(&code).unwrap_or_else(|| self.table.default_hours())
    }

    /// `start + sla_hours(category)` hours
    pub fn deadline(&self, category: &str, start: DateTime<Utc>) -> DateTime<Utc> {
        add_hours(start, self.sla_hours(category))
    }

    /// Hours and deadline in one call
    pub fn terms(&self, category: &str, start: DateTime<Utc>) -> SlaTerms {
        let hours = self.sla_hours(category);
        SlaTerms { hours, deadline: add_hours(start, hours) }
    }

    /// Time left before the deadline; negative once breached
    pub fn remaining(&self, category: &str, start: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
        self.deadline(category, start) - now
    }

    pub fn is_breached(&self, category: &str, start: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now > self.deadline(category, start)
    }
}

impl Default for SlaCalculator {
    fn default() -> Self {
        Self::new(SlaTable::delhi())
    }
}

/// Hours and deadline for `category` against the built-in Delhi table
pub fn compute_sla(category: &str, created_at: DateTime<Utc>) -> (u32, DateTime<Utc>) {
    static CALCULATOR: OnceLock<SlaCalculator> = OnceLock::new();
    let terms = CALCULATOR.get_or_init(SlaCalculator::default).terms(category, created_at);
    (terms.hours, terms.deadline)
}

fn add_hours(start: DateTime<Utc>, hours: u32) -> DateTime<Utc> {
    start
        .checked_add_signed(Duration::hours(i64::from(hours)))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
