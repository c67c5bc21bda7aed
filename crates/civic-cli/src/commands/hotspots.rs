//! Hotspots command implementation

use crate::cli::HotspotsArgs;
use crate::output::OutputWriter;
use crate::output_types::HotspotRow;
use crate::snapshot::load_store;
use anyhow::Result;
use civic_core::config::LayeredConfig;
use civic_core::models::HotspotStatus;
use civic_geo::spatial::radius_in_meters;
use civic_geo::{hotspots_to_geojson, HotspotClusterer};
use civic_intake::HotspotService;

use super::build_facade;

pub async fn execute(args: HotspotsArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let facade = build_facade(config)?;
    let params = config.cluster_params()?;
    let store = load_store(&args.input, &facade)?;

    let service = HotspotService::new(store, HotspotClusterer::new(params));
    let report = service.hotspots(args.zone.as_deref()).await?;

    if let HotspotStatus::Degraded { reason } = &report.status {
        output.warning(format!("Hotspots unavailable: {}", reason));
    }

    if args.geojson {
        return output.data(&hotspots_to_geojson(&report.hotspots));
    }

    if output.is_json() {
        output.result(&report)?;
    } else {
        let reference_point = facade.resolver().directory().fallback().coords;
        output.section("Hotspots");
        output.kv(
            "Radius",
            format!(
                "{}° (~{:.0} m)",
                params.radius_deg,
                radius_in_meters(params.radius_deg, &reference_point)
            ),
        );
        output.table(report.hotspots.iter().map(HotspotRow::from).collect());
        output.kv("Clustered", report.clustered_points);
        output.kv("Noise", report.noise_points);
    }

    Ok(())
}
