//! Command implementations

mod config;
mod heatmap;
mod hotspots;
mod intake;
mod resolve;
mod sla;

use crate::cli::{Cli, Commands};
use crate::config_loader::load_config;
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use civic_core::config::LayeredConfig;
use civic_intake::IntakeFacade;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Resolve(args) => resolve::execute(args, &config, &output),
        Commands::Sla(args) => sla::execute(args, &config, &output),
        Commands::Intake(args) => intake::execute(args, &config, &output).await,
        Commands::Hotspots(args) => hotspots::execute(args, &config, &output).await,
        Commands::Heatmap(args) => heatmap::execute(args, &config, &output).await,
        Commands::Config => config::execute(&config, &output),
    }
}

/// Facade over the configured reference data
fn build_facade(config: &LayeredConfig) -> Result<IntakeFacade> {
    let reference = config.load_reference_data().context("Failed to load reference data")?;
    Ok(IntakeFacade::from_reference(reference))
}

/// RFC 3339 timestamp, or now when absent
fn parse_time(value: Option<&str>) -> Result<DateTime<Utc>> {
    match value {
        Some(s) => Ok(DateTime::parse_from_rfc3339(s)
            .with_context(|| format!("Invalid RFC 3339 timestamp: {}", s))?
            .with_timezone(&Utc)),
        None => Ok(Utc::now()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_time() {
        let parsed = parse_time(Some("2026-01-01T05:30:00+05:30")).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
        assert!(parse_time(Some("yesterday")).is_err());
    }
}
