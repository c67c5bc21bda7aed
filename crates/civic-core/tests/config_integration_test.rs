//! Integration tests for layered configuration
//!
//! These tests verify that configuration loading follows the correct precedence:
//! CLI arguments > Environment variables > Config file > Defaults

use civic_core::config::{CliConfigOverrides, ConfigSource, LayeredConfig};
use civic_core::models::TieBreak;
use serial_test::serial;
use std::env;
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

const ENV_KEYS: [&str; 6] = [
    "CIVIC_CLUSTER_RADIUS",
    "CIVIC_MIN_POINTS",
    "CIVIC_TOP_N",
    "CIVIC_DEFAULT_SLA_HOURS",
    "CIVIC_TIE_BREAK",
    "CIVIC_REFERENCE_DATA",
];

fn clear_env() {
    for key in ENV_KEYS {
        env::remove_var(key);
    }
}

#[test]
fn test_partial_file_configuration() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
top_n = 8
# Only override top_n, leave others as defaults
"#
    )
    .unwrap();

    let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

    assert_eq!(config.top_n.value, 8);
    assert_eq!(config.top_n.source, ConfigSource::File);
    assert_eq!(config.cluster_radius_deg.value, 0.003);
    assert_eq!(config.cluster_radius_deg.source, ConfigSource::Default);
    assert_eq!(config.min_points.source, ConfigSource::Default);
}

#[test]
fn test_missing_file_is_config_error() {
    let result = LayeredConfig::with_defaults().load_from_file("/nonexistent/civic.toml");
    assert!(result.is_err());
}

#[test]
fn test_malformed_file_is_config_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "top_n = \"five\"").unwrap();

    let result = LayeredConfig::with_defaults().load_from_file(file.path());
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_env_overrides_file() {
    clear_env();

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "min_points = 4\ntop_n = 7").unwrap();

    env::set_var("CIVIC_MIN_POINTS", "3");
    env::set_var("CIVIC_TIE_BREAK", "area_then_centroid");

    let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap().load_from_env();

    assert_eq!(config.min_points.value, 3);
    assert_eq!(config.min_points.source, ConfigSource::Environment);
    assert_eq!(config.top_n.value, 7);
    assert_eq!(config.top_n.source, ConfigSource::File);
    assert_eq!(config.tie_break.value, TieBreak::AreaThenCentroid);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_env_values_are_ignored() {
    clear_env();

    env::set_var("CIVIC_CLUSTER_RADIUS", "wide");
    env::set_var("CIVIC_TOP_N", "-2");

    let config = LayeredConfig::with_defaults().load_from_env();

    assert_eq!(config.cluster_radius_deg.value, 0.003);
    assert_eq!(config.cluster_radius_deg.source, ConfigSource::Default);
    assert_eq!(config.top_n.value, 5);

    clear_env();
}

#[test]
#[serial]
fn test_cli_overrides_env() {
    clear_env();

    env::set_var("CIVIC_CLUSTER_RADIUS", "0.004");

    let mut config = LayeredConfig::with_defaults().load_from_env();
    assert_eq!(config.cluster_radius_deg.source, ConfigSource::Environment);

    config.update_from_cli(CliConfigOverrides {
        cluster_radius_deg: Some(0.002),
        ..Default::default()
    });

    assert_eq!(config.cluster_radius_deg.value, 0.002);
    assert_eq!(config.cluster_radius_deg.source, ConfigSource::Cli);

    clear_env();
}

#[test]
#[serial]
fn test_reference_file_from_env() {
    clear_env();

    let dir = TempDir::new().unwrap();
    let reference = dir.path().join("city.toml");
    fs::write(
        &reference,
        r#"
[fallback]
zone = "PORT"
lat = -8.65
lng = 115.21

[[zones]]
id = "PORT"
lat = -8.65
lng = 115.21
areas = ["benoa"]

[sla]
default_hours = 24
"#,
    )
    .unwrap();

    env::set_var("CIVIC_REFERENCE_DATA", reference.display().to_string());
    env::set_var("CIVIC_DEFAULT_SLA_HOURS", "12");

    let config = LayeredConfig::with_defaults().load_from_env();
    let data = config.load_reference_data().unwrap();

    assert_eq!(data.zones.len(), 1);
    assert_eq!(data.zones.fallback().zone_id, "PORT");
    assert_eq!(data.sla.default_hours(), 12);

    clear_env();
}
