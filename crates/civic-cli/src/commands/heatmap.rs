//! Heatmap command implementation

use crate::cli::HeatmapArgs;
use crate::output::OutputWriter;
use crate::output_types::HeatmapOutput;
use crate::snapshot::load_store;
use anyhow::Result;
use civic_core::config::LayeredConfig;
use civic_geo::HotspotClusterer;
use civic_intake::{normalize_zone_filter, HotspotService};

use super::build_facade;

pub async fn execute(args: HeatmapArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let facade = build_facade(config)?;
    let store = load_store(&args.input, &facade)?;

    let service = HotspotService::new(store, HotspotClusterer::default());
    let points = service.heatmap(args.zone.as_deref()).await?;

    let heatmap = HeatmapOutput {
        zone: normalize_zone_filter(args.zone.as_deref()),
        count: points.len(),
        points: points.iter().map(|p| p.to_triple()).collect(),
    };

    if output.is_json() {
        output.result(heatmap)?;
    } else {
        output.kv("Zone", heatmap.zone.as_deref().unwrap_or("all"));
        output.kv("Points", heatmap.count);
        output.data(&heatmap.points)?;
    }

    Ok(())
}
