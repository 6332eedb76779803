//! Settings loading.
//!
//! Overrides and template variables are read from a TOML, JSON or YAML file
//! (format chosen by extension) layered with `METRIC_OVERRIDES_*` environment
//! variables:
//!
//! ```toml
//! [variables]
//! host = "web-01"
//!
//! [[overrides]]
//! pattern = "cpu.*"
//! operator = "max"
//! unit_format = "percent"
//! decimals = 1
//! click_through = "https://grafana/d/cpu?var-host=$host"
//!
//! [[overrides.thresholds]]
//! value = 0
//! state = 0
//! color = "#299c46"
//!
//! [[overrides.thresholds]]
//! value = 90
//! state = 2
//! color = "#d44a3a"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use overrides_types::{MetricDataPoint, OverrideRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::OverridesError;

/// Environment variable prefix for settings.
pub const ENV_PREFIX: &str = "METRIC_OVERRIDES";

/// Settings for a standalone override run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Overrides, in match order.
    pub overrides: Vec<OverrideRecord>,
    /// Template variables for click-through links.
    pub variables: BTreeMap<String, String>,
}

impl Settings {
    /// Load settings from a file, then apply environment variables.
    pub fn load(path: &Path) -> Result<Self, OverridesError> {
        let config = Config::builder()
            .add_source(File::from(path))
            .add_source(Self::environment())
            .build()?;
        let settings: Settings = config.try_deserialize()?;
        debug!(
            path = %path.display(),
            overrides = settings.overrides.len(),
            variables = settings.variables.len(),
            "Loaded settings"
        );
        Ok(settings)
    }

    /// Parse settings from a string in the given format, without environment variables.
    pub fn parse(content: &str, format: FileFormat) -> Result<Self, OverridesError> {
        let config = Config::builder()
            .add_source(File::from_str(content, format))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
    }
}

/// Read a JSON array of data points from `path`.
pub fn load_data_points(path: &Path) -> Result<Vec<MetricDataPoint>, OverridesError> {
    let content = std::fs::read_to_string(path)?;
    let data: Vec<MetricDataPoint> = serde_json::from_str(&content)?;
    debug!(path = %path.display(), points = data.len(), "Loaded data points");
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use overrides_types::{Operator, Severity};
    use std::io::Write;

    const SAMPLE: &str = r##"
[variables]
host = "web-01"

[[overrides]]
pattern = "cpu.*"
operator = "max"
unit_format = "percent"
decimals = 1

[[overrides.thresholds]]
value = 90
state = 2
color = "#d44a3a"

[[overrides.thresholds]]
value = 0
state = 0
color = "#299c46"

[[overrides]]
pattern = "mem.*"
decimals = ""
"##;

    #[test]
    fn parse_toml_settings() {
        let settings = Settings::parse(SAMPLE, FileFormat::Toml).unwrap();
        assert_eq!(settings.variables.get("host").map(String::as_str), Some("web-01"));
        assert_eq!(settings.overrides.len(), 2);

        let cpu = &settings.overrides[0];
        assert_eq!(cpu.pattern, "cpu.*");
        assert_eq!(cpu.operator, Operator::Max);
        assert_eq!(cpu.decimals, Some(1));
        let states: Vec<Severity> = cpu.thresholds.iter().map(|t| t.state).collect();
        assert_eq!(states, vec![Severity::Ok, Severity::Critical]);

        let mem = &settings.overrides[1];
        assert_eq!(mem.operator, Operator::Avg);
        assert_eq!(mem.decimals, None);
        assert!(mem.enabled);
        assert!(mem.sanitize_url_enabled);
    }

    #[test]
    fn empty_settings() {
        let settings = Settings::parse("", FileFormat::Toml).unwrap();
        assert!(settings.overrides.is_empty());
        assert!(settings.variables.is_empty());
    }

    #[test]
    fn load_from_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"overrides": [{{"pattern": "/disk/i", "operator": "total"}}]}}"#
        )
        .unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.overrides.len(), 1);
        assert_eq!(settings.overrides[0].pattern, "/disk/i");
        assert_eq!(settings.overrides[0].operator, Operator::Total);
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = Settings::load(Path::new("/nonexistent/overrides.toml")).unwrap_err();
        assert!(matches!(err, OverridesError::Config(_)));
    }

    #[test]
    fn load_data_points_from_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"[{{"name": "cpu", "stats": {{"avg": 1.5}}, "timestamp": 1700000000000}}]"#
        )
        .unwrap();

        let data = load_data_points(file.path()).unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].name, "cpu");
        assert_eq!(data[0].stats.avg, Some(1.5));
        assert_eq!(data[0].timestamp, Some(1_700_000_000_000));
        assert!(data[0].display.is_none());
    }

    #[test]
    fn data_point_errors() {
        let err = load_data_points(Path::new("/nonexistent/metrics.json")).unwrap_err();
        assert!(matches!(err, OverridesError::Io(_)));

        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{{not json").unwrap();
        let err = load_data_points(file.path()).unwrap_err();
        assert!(matches!(err, OverridesError::Json(_)));
    }

    #[test]
    fn invalid_severity_is_rejected() {
        let toml = "[[overrides]]\npattern = \"x\"\n[[overrides.thresholds]]\nstate = 7\n";
        assert!(Settings::parse(toml, FileFormat::Toml).is_err());
    }
}
