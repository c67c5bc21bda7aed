use civic_core::config::parse_tie_break;
use civic_core::models::{IntakeSource, Priority, TieBreak};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Civic Grid - Zone assignment, SLA deadlines and complaint hotspots
#[derive(Parser, Debug)]
#[command(name = "civic")]
#[command(about = "Zone assignment, SLA deadlines and complaint hotspots", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to ./civic.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Reference data file with zones and SLA table
    #[arg(long, global = true, value_name = "FILE")]
    pub reference: Option<PathBuf>,

    /// Clustering radius in degrees
    #[arg(long, global = true)]
    pub radius: Option<f64>,

    /// Neighbours (self included) needed for a core point
    #[arg(long, global = true)]
    pub min_points: Option<usize>,

    /// Maximum number of hotspots returned
    #[arg(long, global = true)]
    pub top_n: Option<usize>,

    /// Ordering among equally sized hotspots (cluster_order or area_then_centroid)
    #[arg(long, global = true, value_parser = parse_tie_break_arg)]
    pub tie_break: Option<TieBreak>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve free-text location to a zone and coordinate
    Resolve(ResolveArgs),

    /// Compute the SLA budget and deadline for a category
    Sla(SlaArgs),

    /// Derive fields for a new complaint and lodge it
    Intake(IntakeArgs),

    /// Rank complaint hotspots from a JSON snapshot
    Hotspots(HotspotsArgs),

    /// Priority-weighted heatmap points from a JSON snapshot
    Heatmap(HeatmapArgs),

    /// Show effective configuration and where each value came from
    Config,
}

#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Location text (omit to resolve empty input)
    pub text: Option<String>,
}

#[derive(Parser, Debug)]
pub struct SlaArgs {
    /// Complaint category (e.g. VETERINARY, "public health")
    pub category: String,

    /// Start time in RFC 3339 (defaults to now)
    #[arg(long)]
    pub start: Option<String>,
}

#[derive(Parser, Debug)]
pub struct IntakeArgs {
    #[arg(long)]
    pub category: String,

    #[arg(long)]
    pub location: String,

    #[arg(long)]
    pub description: String,

    /// low, medium, high or critical
    #[arg(long, value_parser = parse_priority_arg)]
    pub priority: Option<Priority>,

    /// web, voice or sms
    #[arg(long, default_value = "web", value_parser = parse_source_arg)]
    pub source: IntakeSource,

    /// Creation time in RFC 3339 (defaults to now)
    #[arg(long)]
    pub created_at: Option<String>,
}

#[derive(Parser, Debug)]
pub struct HotspotsArgs {
    /// JSON array of complaint rows
    #[arg(long, short = 'i')]
    pub input: PathBuf,

    /// Restrict to one zone ("all" for every zone)
    #[arg(long)]
    pub zone: Option<String>,

    /// Emit a GeoJSON FeatureCollection instead of the report
    #[arg(long)]
    pub geojson: bool,
}

#[derive(Parser, Debug)]
pub struct HeatmapArgs {
    /// JSON array of complaint rows
    #[arg(long, short = 'i')]
    pub input: PathBuf,

    /// Restrict to one zone ("all" for every zone)
    #[arg(long)]
    pub zone: Option<String>,
}

fn parse_tie_break_arg(s: &str) -> Result<TieBreak, String> {
    parse_tie_break(s).map_err(|e| e.to_string())
}

fn parse_priority_arg(s: &str) -> Result<Priority, String> {
    s.parse::<Priority>().map_err(|e| e.to_string())
}

fn parse_source_arg(s: &str) -> Result<IntakeSource, String> {
    match s.trim().to_lowercase().as_str() {
        "web" => Ok(IntakeSource::Web),
        "voice" => Ok(IntakeSource::Voice),
        "sms" => Ok(IntakeSource::Sms),
        other => Err(format!("Invalid source: {}. Use web, voice or sms", other)),
    }
}
