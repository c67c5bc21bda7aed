use crate::error::{CivicError, Result};
use crate::models::{ClusterParams, TieBreak};
use crate::reference::ReferenceData;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }

    pub fn is_default(&self) -> bool {
        self.source == ConfigSource::Default
    }
}

/// Layered configuration for the complaint engine
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub cluster_radius_deg: ConfigValue<f64>,
    pub min_points: ConfigValue<usize>,
    pub top_n: ConfigValue<usize>,
    pub default_sla_hours: ConfigValue<u32>,
    pub tie_break: ConfigValue<TieBreak>,
    pub reference_data: ConfigValue<Option<PathBuf>>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            cluster_radius_deg: ConfigValue::new(
                ClusterParams::DEFAULT_RADIUS_DEG,
                ConfigSource::Default,
            ),
            min_points: ConfigValue::new(ClusterParams::DEFAULT_MIN_POINTS, ConfigSource::Default),
            top_n: ConfigValue::new(ClusterParams::DEFAULT_TOP_N, ConfigSource::Default),
            default_sla_hours: ConfigValue::new(48, ConfigSource::Default),
            tie_break: ConfigValue::new(TieBreak::ClusterOrder, ConfigSource::Default),
            reference_data: ConfigValue::new(None, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| CivicError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| CivicError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(radius) = file_config.cluster_radius_deg {
            self.cluster_radius_deg.update(radius, ConfigSource::File);
        }

        if let Some(min_points) = file_config.min_points {
            self.min_points.update(min_points, ConfigSource::File);
        }

        if let Some(top_n) = file_config.top_n {
            self.top_n.update(top_n, ConfigSource::File);
        }

        if let Some(hours) = file_config.default_sla_hours {
            self.default_sla_hours.update(hours, ConfigSource::File);
        }

        if let Some(tie_break) = file_config.tie_break {
            self.tie_break.update(tie_break, ConfigSource::File);
        }

        if let Some(reference) = file_config.reference_data {
            // Relative paths are taken relative to the config file
            let resolved = match path.as_ref().parent() {
                Some(dir) if reference.is_relative() => dir.join(reference),
                _ => reference,
            };
            self.reference_data.update(Some(resolved), ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // CIVIC_CLUSTER_RADIUS
        if let Ok(radius_str) = env::var("CIVIC_CLUSTER_RADIUS") {
            match radius_str.trim().parse::<f64>() {
                Ok(radius) => self.cluster_radius_deg.update(radius, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid CIVIC_CLUSTER_RADIUS value '{}': expected degrees as a decimal",
                    radius_str
                ),
            }
        }

        // CIVIC_MIN_POINTS
        if let Ok(min_str) = env::var("CIVIC_MIN_POINTS") {
            match min_str.trim().parse::<usize>() {
                Ok(min_points) => self.min_points.update(min_points, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid CIVIC_MIN_POINTS value '{}': expected a positive integer",
                    min_str
                ),
            }
        }

        // CIVIC_TOP_N
        if let Ok(top_str) = env::var("CIVIC_TOP_N") {
            match top_str.trim().parse::<usize>() {
                Ok(top_n) => self.top_n.update(top_n, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid CIVIC_TOP_N value '{}': expected a positive integer",
                    top_str
                ),
            }
        }

        // CIVIC_DEFAULT_SLA_HOURS
        if let Ok(hours_str) = env::var("CIVIC_DEFAULT_SLA_HOURS") {
            match hours_str.trim().parse::<u32>() {
                Ok(hours) => self.default_sla_hours.update(hours, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid CIVIC_DEFAULT_SLA_HOURS value '{}': expected whole hours",
                    hours_str
                ),
            }
        }

        // CIVIC_TIE_BREAK
        if let Ok(tie_str) = env::var("CIVIC_TIE_BREAK") {
            match parse_tie_break(&tie_str) {
                Ok(tie_break) => self.tie_break.update(tie_break, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid CIVIC_TIE_BREAK value '{}': expected cluster_order or area_then_centroid",
                    tie_str
                ),
            }
        }

        // CIVIC_REFERENCE_DATA
        if let Ok(path) = env::var("CIVIC_REFERENCE_DATA") {
            if !path.trim().is_empty() {
                self.reference_data
                    .update(Some(PathBuf::from(path.trim())), ConfigSource::Environment);
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(radius) = overrides.cluster_radius_deg {
            self.cluster_radius_deg.update(radius, ConfigSource::Cli);
        }

        if let Some(min_points) = overrides.min_points {
            self.min_points.update(min_points, ConfigSource::Cli);
        }

        if let Some(top_n) = overrides.top_n {
            self.top_n.update(top_n, ConfigSource::Cli);
        }

        if let Some(tie_break) = overrides.tie_break {
            self.tie_break.update(tie_break, ConfigSource::Cli);
        }

        if let Some(reference) = overrides.reference_data {
            self.reference_data.update(Some(reference), ConfigSource::Cli);
        }
    }

    /// Validated clustering parameters
    pub fn cluster_params(&self) -> Result<ClusterParams> {
        let radius = self.cluster_radius_deg.value;
        if !radius.is_finite() || radius <= 0.0 {
            return Err(CivicError::ConfigInvalid {
                key: "cluster_radius_deg".to_string(),
                reason: format!("radius must be a positive finite number of degrees, got {}", radius),
            });
        }
        if self.min_points.value == 0 {
            return Err(CivicError::ConfigInvalid {
                key: "min_points".to_string(),
                reason: "min_points must be at least 1".to_string(),
            });
        }
        if self.top_n.value == 0 {
            return Err(CivicError::ConfigInvalid {
                key: "top_n".to_string(),
                reason: "top_n must be at least 1".to_string(),
            });
        }

        Ok(ClusterParams {
            radius_deg: radius,
            min_points: self.min_points.value,
            top_n: self.top_n.value,
            tie_break: self.tie_break.value,
        })
    }

    /// Reference tables: the configured file, or the built-in Delhi data.
    ///
    /// A non-default `default_sla_hours` overrides the table's own default.
    pub fn load_reference_data(&self) -> Result<ReferenceData> {
        let mut data = match &self.reference_data.value {
            Some(path) => ReferenceData::load(path)?,
            None => ReferenceData::delhi(),
        };

        if !self.default_sla_hours.is_default() {
            data.sla = data.sla.with_default_hours(self.default_sla_hours.value)?;
        }

        Ok(data)
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "cluster_radius_deg".to_string(),
            (format!("{}", self.cluster_radius_deg.value), self.cluster_radius_deg.source),
        );

        map.insert(
            "min_points".to_string(),
            (self.min_points.value.to_string(), self.min_points.source),
        );

        map.insert("top_n".to_string(), (self.top_n.value.to_string(), self.top_n.source));

        map.insert(
            "default_sla_hours".to_string(),
            (self.default_sla_hours.value.to_string(), self.default_sla_hours.source),
        );

        map.insert(
            "tie_break".to_string(),
            (format!("{:?}", self.tie_break.value), self.tie_break.source),
        );

        map.insert(
            "reference_data".to_string(),
            (
                self.reference_data
                    .value
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "built-in (Delhi)".to_string()),
                self.reference_data.source,
            ),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    cluster_radius_deg: Option<f64>,
    min_points: Option<usize>,
    top_n: Option<usize>,
    default_sla_hours: Option<u32>,
    tie_break: Option<TieBreak>,
    reference_data: Option<PathBuf>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub cluster_radius_deg: Option<f64>,
    pub min_points: Option<usize>,
    pub top_n: Option<usize>,
    pub tie_break: Option<TieBreak>,
    pub reference_data: Option<PathBuf>,
}

/// Parse tie-break mode from string
pub fn parse_tie_break(s: &str) -> Result<TieBreak> {
    match s.trim().to_lowercase().replace('-', "_").as_str() {
        "cluster_order" | "cluster" => Ok(TieBreak::ClusterOrder),
        "area_then_centroid" | "area" => Ok(TieBreak::AreaThenCentroid),
        _ => Err(CivicError::ConfigInvalid {
            key: "tie_break".to_string(),
            reason: format!("Invalid tie-break: {}. Use cluster_order or area_then_centroid", s),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = LayeredConfig::with_defaults();
        assert_eq!(config.cluster_radius_deg.value, 0.003);
        assert_eq!(config.cluster_radius_deg.source, ConfigSource::Default);
        assert_eq!(config.min_points.value, 2);
        assert_eq!(config.top_n.value, 5);
        assert_eq!(config.default_sla_hours.value, 48);
        assert!(config.reference_data.value.is_none());
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(100, ConfigSource::Default);

        // File should override default
        value.update(200, ConfigSource::File);
        assert_eq!(value.value, 200);
        assert_eq!(value.source, ConfigSource::File);

        // Environment should override file
        value.update(300, ConfigSource::Environment);
        assert_eq!(value.value, 300);
        assert_eq!(value.source, ConfigSource::Environment);

        // CLI should override environment
        value.update(400, ConfigSource::Cli);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);

        // Lower precedence should not override
        value.update(500, ConfigSource::File);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
cluster_radius_deg = 0.005
min_points = 3
top_n = 10
tie_break = "area_then_centroid"
"#
        )
        .unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert_eq!(config.cluster_radius_deg.value, 0.005);
        assert_eq!(config.cluster_radius_deg.source, ConfigSource::File);
        assert_eq!(config.min_points.value, 3);
        assert_eq!(config.top_n.value, 10);
        assert_eq!(config.tie_break.value, TieBreak::AreaThenCentroid);
        assert_eq!(config.default_sla_hours.source, ConfigSource::Default);
    }

    #[test]
    fn test_relative_reference_path_follows_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("civic.toml");
        fs::write(&config_path, "reference_data = \"zones.toml\"\n").unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(&config_path).unwrap();
        assert_eq!(config.reference_data.value, Some(dir.path().join("zones.toml")));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = LayeredConfig::with_defaults();

        let overrides = CliConfigOverrides {
            cluster_radius_deg: Some(0.01),
            top_n: Some(3),
            ..Default::default()
        };

        config.update_from_cli(overrides);

        assert_eq!(config.cluster_radius_deg.value, 0.01);
        assert_eq!(config.cluster_radius_deg.source, ConfigSource::Cli);
        assert_eq!(config.top_n.value, 3);
        assert_eq!(config.min_points.source, ConfigSource::Default);
        assert_eq!(config.tie_break.source, ConfigSource::Default);
    }

    #[test]
    fn test_cluster_params_validation() {
        let mut config = LayeredConfig::with_defaults();
        assert_eq!(config.cluster_params().unwrap(), ClusterParams::default());

        config.cluster_radius_deg.update(-1.0, ConfigSource::Cli);
        assert!(config.cluster_params().is_err());

        let mut config = LayeredConfig::with_defaults();
        config.min_points.update(0, ConfigSource::Cli);
        assert!(config.cluster_params().is_err());

        let mut config = LayeredConfig::with_defaults();
        config.top_n.update(0, ConfigSource::Cli);
        assert!(config.cluster_params().is_err());
    }

    #[test]
    fn test_default_sla_override_applies_to_reference() {
        let mut config = LayeredConfig::with_defaults();
        assert_eq!(config.load_reference_data().unwrap().sla.default_hours(), 48);

        config.default_sla_hours.update(36, ConfigSource::File);
        assert_eq!(config.load_reference_data().unwrap().sla.default_hours(), 36);
    }

    #[test]
    fn test_parse_tie_break() {
        assert_eq!(parse_tie_break("cluster_order").unwrap(), TieBreak::ClusterOrder);
        assert_eq!(parse_tie_break("Area-Then-Centroid").unwrap(), TieBreak::AreaThenCentroid);
        assert!(parse_tie_break("random").is_err());
    }

    #[test]
    fn test_inspection_map() {
        let config = LayeredConfig::with_defaults();
        let map = config.to_inspection_map();

        assert!(map.contains_key("cluster_radius_deg"));
        assert!(map.contains_key("min_points"));
        assert!(map.contains_key("top_n"));
        assert!(map.contains_key("tie_break"));

        let (reference, source) = &map["reference_data"];
        assert_eq!(reference, "built-in (Delhi)");
        assert_eq!(*source, ConfigSource::Default);
    }
}
