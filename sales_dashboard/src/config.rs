//! Dashboard configuration loaded from `dashboard.toml`

use anyhow::{Context, Result};
use chrono::NaiveDate;
use sales_forecast::{ArtifactPaths, SalesChannel, SimulationSettings};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration for the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub artifacts: ArtifactPaths,
    #[serde(default)]
    pub simulation: SimulationSettings,
    #[serde(default)]
    pub defaults: InputDefaults,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Preselected values for the simulation inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputDefaults {
    pub month: u32,
    pub year: i32,
    pub discount: u8,
    pub date: NaiveDate,
    pub channel: SalesChannel,
}

impl Default for InputDefaults {
    fn default() -> Self {
        Self {
            month: 7,
            year: 2025,
            discount: 10,
            date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap_or_default(),
            channel: SalesChannel::Online,
        }
    }
}

/// Where generated files go
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub chart_path: PathBuf,
    pub export_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            chart_path: PathBuf::from("output/sales_chart.svg"),
            export_dir: PathBuf::from("output"),
        }
    }
}

impl DashboardConfig {
    /// Read a config file; relative paths resolve against its directory
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let mut config = Self::from_toml(&text)
            .with_context(|| format!("invalid config {}", path.display()))?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        config.resolve_relative_to(base);
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        let artifacts = &mut self.artifacts;
        for path in [
            &mut artifacts.aggregate,
            &mut artifacts.catalog,
            &mut artifacts.model,
            &mut artifacts.brand_encoder,
            &mut artifacts.channel_encoder,
            &mut self.output.chart_path,
            &mut self.output.export_dir,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const MINIMAL: &str = r#"
        [artifacts]
        aggregate = "data/aggregate.csv"
        catalog = "data/catalog.csv"
        model = "data/model.json"
        brand_encoder = "data/brand_encoder.json"
        channel_encoder = "/abs/channel_encoder.json"
    "#;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = DashboardConfig::from_toml(MINIMAL).unwrap();
        assert_eq!(config.simulation, SimulationSettings::default());
        assert_eq!(config.defaults, InputDefaults::default());
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_sections_override_defaults() {
        let text = format!(
            "{}\n[simulation]\nlocal_brand_type = \"LOCAL\"\nsupported_years = [2025, 2026]\n\
             [defaults]\nmonth = 3\ndate = \"2026-01-31\"\nchannel = \"Offline\"\n",
            MINIMAL
        );
        let config = DashboardConfig::from_toml(&text).unwrap();

        assert_eq!(config.simulation.local_brand_type, "LOCAL");
        assert_eq!(config.simulation.supported_years, vec![2025, 2026]);
        assert_eq!(config.simulation.batch_channel, SalesChannel::Offline);
        assert_eq!(config.defaults.month, 3);
        assert_eq!(config.defaults.discount, 10);
        assert_eq!(
            config.defaults.date,
            NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()
        );
        assert_eq!(config.defaults.channel, SalesChannel::Offline);
    }

    #[test]
    fn test_missing_artifacts_is_an_error() {
        assert!(DashboardConfig::from_toml("[defaults]\nmonth = 1\n").is_err());
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard.toml");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();

        let config = DashboardConfig::load(&path).unwrap();
        assert_eq!(
            config.artifacts.aggregate,
            dir.path().join("data/aggregate.csv")
        );
        assert_eq!(
            config.artifacts.channel_encoder,
            PathBuf::from("/abs/channel_encoder.json")
        );
        assert_eq!(
            config.output.export_dir,
            dir.path().join("output")
        );
    }
}
