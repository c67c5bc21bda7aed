use chrono::{DateTime, Utc};
use civic_core::canonical_code;
use civic_core::error::Result;
use civic_core::models::{ComplaintRecord, IntakeSource};
use civic_store::{ComplaintStore, NewComplaint};

use crate::facade::IntakeFacade;
use crate::models::ComplaintDraft;

/// Citizen-facing ticket number: source prefix plus trailing timestamp digits.
///
/// Two complaints from the same source in the same second share a number;
/// the store ID is the unique key.
pub fn ticket_number(source: IntakeSource, created_at: DateTime<Utc>) -> String {
    let (prefix, digits) = source.ticket_format();
    let stamp = created_at.timestamp().to_string();
    let tail = &stamp[stamp.len().saturating_sub(digits)..];
    format!("{}{}", prefix, tail)
}

/// Validates drafts, derives their fields and writes them to the store
pub struct ComplaintIntake<S>
where
    S: ComplaintStore,
{
    store: S,
    facade: IntakeFacade,
}

impl<S> ComplaintIntake<S>
where
    S: ComplaintStore,
{
    pub fn new(store: S, facade: IntakeFacade) -> Self {
        Self { store, facade }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn facade(&self) -> &IntakeFacade {
        &self.facade
    }

    /// Lodge a new complaint; the record starts Open
    pub async fn lodge(
        &self,
        draft: ComplaintDraft,
        created_at: DateTime<Utc>,
    ) -> Result<ComplaintRecord> {
        draft.validate()?;

        let location = draft.location.trim().to_string();
        let fields = self.facade.build_complaint_fields(
            &draft.category,
            Some(&location),
            draft.priority,
            created_at,
        );

        let complaint = NewComplaint {
            complaint_number: ticket_number(draft.source, created_at),
            category: canonical_code(&draft.category),
            description: draft.description.trim().to_string(),
            location,
            zone: fields.zone,
            coords: Some(fields.coords),
            priority: fields.priority,
            source: draft.source,
            sla_hours: fields.sla_hours,
            sla_deadline: fields.deadline,
            citizen_name: draft.citizen_name,
            citizen_phone: draft.citizen_phone,
            created_at,
        };

        let record = self.store.insert(complaint).await?;
        tracing::info!(
            id = %record.id,
            complaint_number = %record.complaint_number,
            zone = %record.zone,
            sla_hours = record.sla_hours,
            "Complaint lodged"
        );
        Ok(record)
    }
}
