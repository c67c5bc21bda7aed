//! In-memory complaint store for development, tests and the CLI.
//!
//! Uses `RwLock::unwrap()` intentionally. Lock poisoning only occurs when
//! another thread panicked while holding the lock, which is an unrecoverable
//! state.

use async_trait::async_trait;
use chrono::Utc;
use civic_core::error::Result;
use civic_core::models::{ComplaintId, ComplaintRecord, ComplaintStatus};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::ports::{ComplaintStore, ComplaintUpdate, NewComplaint, RecordFilter};

/// In-memory implementation of ComplaintStore
#[derive(Debug, Clone, Default)]
pub struct MemoryComplaintStore {
    records: Arc<RwLock<HashMap<ComplaintId, ComplaintRecord>>>,
    next_id: Arc<RwLock<u64>>,
}

impl MemoryComplaintStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `records` as-is, keeping their IDs
    pub fn with_records(records: impl IntoIterator<Item = ComplaintRecord>) -> Self {
        let store = Self::new();
        {
            let mut map = store.records.write().unwrap();
            let mut next_id = store.next_id.write().unwrap();
            for record in records {
                *next_id = (*next_id).max(record.id.0 + 1);
                map.insert(record.id, record);
            }
        }
        store
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ComplaintStore for MemoryComplaintStore {
    async fn select(&self, filter: &RecordFilter) -> Result<Vec<ComplaintRecord>> {
        let records = self.records.read().unwrap();

        let mut selected: Vec<ComplaintRecord> =
            records.values().filter(|r| filter.matches(r)).cloned().collect();
        selected.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.0.cmp(&a.id.0)));

        if let Some(limit) = filter.limit {
            selected.truncate(limit);
        }
        Ok(selected)
    }

    async fn get(&self, id: ComplaintId) -> Result<Option<ComplaintRecord>> {
        let records = self.records.read().unwrap();
        Ok(records.get(&id).cloned())
    }

    async fn insert(&self, complaint: NewComplaint) -> Result<ComplaintRecord> {
        let mut records = self.records.write().unwrap();
        let mut next_id = self.next_id.write().unwrap();

        let id = ComplaintId(*next_id);
        *next_id += 1;

        let record = ComplaintRecord {
            id,
            complaint_number: complaint.complaint_number,
            category: complaint.category,
            description: complaint.description,
            location: complaint.location,
            zone: complaint.zone,
            coords: complaint.coords,
            priority: complaint.priority,
            status: ComplaintStatus::Open,
            source: complaint.source,
            sla_hours: complaint.sla_hours,
            sla_deadline: complaint.sla_deadline,
            citizen_name: complaint.citizen_name,
            citizen_phone: complaint.citizen_phone,
            assigned_to: None,
            notes: None,
            created_at: complaint.created_at,
            resolved_at: None,
        };

        records.insert(id, record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        id: ComplaintId,
        update: ComplaintUpdate,
    ) -> Result<Option<ComplaintRecord>> {
        let mut records = self.records.write().unwrap();

        let Some(record) = records.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(status) = update.status {
            if status == ComplaintStatus::Resolved && record.status != ComplaintStatus::Resolved {
                record.resolved_at = Some(Utc::now());
            }
            record.status = status;
        }
        if let Some(assigned_to) = update.assigned_to {
            record.assigned_to = Some(assigned_to);
        }
        if let Some(notes) = update.notes {
            record.notes = Some(notes);
        }
        if let Some(priority) = update.priority {
            record.priority = priority;
        }

        Ok(Some(record.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone};
    use civic_core::models::{GeoPoint, IntakeSource, Priority};

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap()
    }

    fn new_complaint(zone: &str, coords: Option<GeoPoint>, minutes: i64) -> NewComplaint {
        let created_at = base_time() + Duration::minutes(minutes);
        NewComplaint {
            complaint_number: format!("MCD-WEB-{}", created_at.timestamp()),
            category: "CLEANLINESS".to_string(),
            description: "Garbage not collected".to_string(),
            location: "Rohini Sector 5".to_string(),
            zone: zone.to_string(),
            coords,
            priority: Priority::Medium,
            source: IntakeSource::Web,
            sla_hours: 24,
            sla_deadline: created_at + Duration::hours(24),
            citizen_name: None,
            citizen_phone: None,
            created_at,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let store = MemoryComplaintStore::new();

        let first = store.insert(new_complaint("ROHINI", None, 0)).await.unwrap();
        let second = store.insert(new_complaint("ROHINI", None, 1)).await.unwrap();

        assert_eq!(first.id, ComplaintId(0));
        assert_eq!(second.id, ComplaintId(1));
        assert_eq!(first.status, ComplaintStatus::Open);
        assert!(first.resolved_at.is_none());
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_select_newest_first_with_limit() {
        let store = MemoryComplaintStore::new();
        for minutes in [5, 1, 9, 3] {
            store.insert(new_complaint("SOUTH", None, minutes)).await.unwrap();
        }

        let records = store.select(&RecordFilter::new().with_limit(3)).await.unwrap();
        let offsets: Vec<i64> =
            records.iter().map(|r| (r.created_at - base_time()).num_minutes()).collect();
        assert_eq!(offsets, vec![9, 5, 3]);
    }

    #[tokio::test]
    async fn test_select_filters() {
        let store = MemoryComplaintStore::new();
        let point = Some(GeoPoint::new(28.7, 77.1));
        store.insert(new_complaint("ROHINI", point, 0)).await.unwrap();
        store.insert(new_complaint("ROHINI", None, 1)).await.unwrap();
        let south = store.insert(new_complaint("SOUTH", point, 2)).await.unwrap();

        let rohini = store.select(&RecordFilter::new().with_zone("ROHINI")).await.unwrap();
        assert_eq!(rohini.len(), 2);

        let geocoded = store.select(&RecordFilter::new().geocoded()).await.unwrap();
        assert_eq!(geocoded.len(), 2);

        store
            .update(
                south.id,
                ComplaintUpdate { status: Some(ComplaintStatus::InProgress), ..Default::default() },
            )
            .await
            .unwrap();
        let in_progress = store
            .select(&RecordFilter::new().with_status(ComplaintStatus::InProgress))
            .await
            .unwrap();
        assert_eq!(in_progress.len(), 1);
        assert_eq!(in_progress[0].zone, "SOUTH");
    }

    #[tokio::test]
    async fn test_resolving_stamps_resolved_at() {
        let store = MemoryComplaintStore::new();
        let record = store.insert(new_complaint("EAST", None, 0)).await.unwrap();

        let updated = store
            .update(
                record.id,
                ComplaintUpdate {
                    status: Some(ComplaintStatus::Resolved),
                    notes: Some("Cleared".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.status, ComplaintStatus::Resolved);
        assert!(updated.resolved_at.is_some());
        assert_eq!(updated.notes.as_deref(), Some("Cleared"));
        assert_eq!(store.get(record.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let store = MemoryComplaintStore::new();
        let result = store.update(ComplaintId(42), ComplaintUpdate::default()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_with_records_continues_ids() {
        let seeded = MemoryComplaintStore::new();
        let record = seeded.insert(new_complaint("WEST", None, 0)).await.unwrap();
        let mut imported = record.clone();
        imported.id = ComplaintId(7);

        let store = MemoryComplaintStore::with_records([imported]);
        let next = store.insert(new_complaint("WEST", None, 1)).await.unwrap();
        assert_eq!(next.id, ComplaintId(8));
    }
}
