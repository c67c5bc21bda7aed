//! Intake command implementation

use crate::cli::IntakeArgs;
use crate::output::OutputWriter;
use crate::output_types::IntakeOutput;
use anyhow::{Context, Result};
use civic_core::config::LayeredConfig;
use civic_intake::{ComplaintDraft, ComplaintIntake};
use civic_store::MemoryComplaintStore;

use super::{build_facade, parse_time};

pub async fn execute(args: IntakeArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let facade = build_facade(config)?;
    let created_at = parse_time(args.created_at.as_deref())?;

    let mut draft = ComplaintDraft::new(args.category, args.description, args.location)
        .with_source(args.source);
    draft.priority = args.priority;

    let fields = facade.build_complaint_fields(
        &draft.category,
        Some(draft.location.trim()),
        draft.priority,
        created_at,
    );

    let intake = ComplaintIntake::new(MemoryComplaintStore::new(), facade);
    let record = intake.lodge(draft, created_at).await.context("Complaint rejected")?;

    if output.is_json() {
        output.result(IntakeOutput { fields, record })?;
    } else {
        output.success(format!("Lodged {}", record.complaint_number));
        output.kv("Zone", &record.zone);
        output.kv("Coordinates", fields.coords);
        output.kv("Category", &record.category);
        output.kv("Priority", record.priority);
        output.kv("SLA", format!("{} hours", record.sla_hours));
        output.kv("Deadline", record.sla_deadline.format("%Y-%m-%d %H:%M:%S UTC"));
    }

    Ok(())
}
