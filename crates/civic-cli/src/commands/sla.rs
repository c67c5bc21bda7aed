//! SLA command implementation

use crate::cli::SlaArgs;
use crate::output::OutputWriter;
use crate::output_types::SlaOutput;
use anyhow::Result;
use chrono::Utc;
use civic_core::config::LayeredConfig;

use super::{build_facade, parse_time};

pub fn execute(args: SlaArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let facade = build_facade(config)?;
    let start = parse_time(args.start.as_deref())?;
    let now = Utc::now();

    let calculator = facade.sla();
    let terms = calculator.terms(&args.category, start);
    let remaining = calculator.remaining(&args.category, start, now);
    let breached = calculator.is_breached(&args.category, start, now);

    if output.is_json() {
        output.result(SlaOutput {
            category: args.category,
            hours: terms.hours,
            start,
            deadline: terms.deadline,
            remaining_hours: remaining.num_hours(),
            breached,
        })?;
    } else {
        output.kv("Category", &args.category);
        output.kv("SLA", format!("{} hours", terms.hours));
        output.kv("Deadline", terms.deadline.format("%Y-%m-%d %H:%M:%S UTC"));
        if breached {
            output.warning(format!("Breached {} hours ago", -remaining.num_hours()));
        } else {
            output.kv("Remaining", format!("{} hours", remaining.num_hours()));
        }
    }

    Ok(())
}
