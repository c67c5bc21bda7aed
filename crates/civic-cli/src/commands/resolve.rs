//! Resolve command implementation

use crate::cli::ResolveArgs;
use crate::output::OutputWriter;
use crate::output_types::ResolveOutput;
use anyhow::Result;
use civic_core::config::LayeredConfig;

use super::build_facade;

pub fn execute(args: ResolveArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let facade = build_facade(config)?;
    let resolution = facade.resolver().resolve(args.text.as_deref());

    if output.is_json() {
        output.result(ResolveOutput {
            input: args.text,
            fallback: resolution.is_fallback(),
            zone: resolution.zone_id,
            coords: resolution.coords,
            matched_keyword: resolution.matched_keyword,
        })?;
    } else {
        output.kv("Zone", &resolution.zone_id);
        output.kv("Coordinates", resolution.coords);
        match &resolution.matched_keyword {
            Some(keyword) => output.kv("Matched", keyword),
            None => output.info("No area name matched; using the fallback zone"),
        }
    }

    Ok(())
}
