//! Configuration management for benchboard rendering

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{BoardError, Result};
use crate::types::{DEFAULT_DATA_DIR, DEFAULT_MOUNT_ID, DEFAULT_SUMMARY_PATH};

/// Sparkline geometry, in SVG user units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SparklineGeometry {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for SparklineGeometry {
    fn default() -> Self {
        Self {
            width: 160.0,
            height: 40.0,
            padding: 3.0,
        }
    }
}

/// Report rendering configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Id of the element the table is rendered into
    pub mount_id: String,
    /// Summary manifest path, relative to the source root
    pub summary_path: String,
    /// Directory of per-benchmark series files, relative to the source root
    pub data_dir: String,
    /// Sparkline size and padding
    pub sparkline: SparklineGeometry,
    /// Separator used when grouping ns/op digits
    pub thousands_separator: String,
    /// Heading of the generated benchmark page
    pub page_title: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            mount_id: DEFAULT_MOUNT_ID.to_string(),
            summary_path: DEFAULT_SUMMARY_PATH.to_string(),
            data_dir: DEFAULT_DATA_DIR.to_string(),
            sparkline: SparklineGeometry::default(),
            thousands_separator: ",".to_string(),
            page_title: "Benchmarks".to_string(),
        }
    }
}

impl ReportConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply `BENCHBOARD_*` environment overrides
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(mount_id) = lookup("BENCHBOARD_MOUNT_ID") {
            self.mount_id = mount_id;
        }
        if let Some(summary_path) = lookup("BENCHBOARD_SUMMARY_PATH") {
            self.summary_path = summary_path;
        }
        if let Some(data_dir) = lookup("BENCHBOARD_DATA_DIR") {
            self.data_dir = data_dir;
        }
        if let Some(separator) = lookup("BENCHBOARD_THOUSANDS_SEPARATOR") {
            self.thousands_separator = separator;
        }
    }

    /// Path of a series file relative to the source root
    pub fn series_path(&self, file: &str) -> String {
        let dir = self.data_dir.trim_end_matches('/');
        if dir.is_empty() {
            file.to_string()
        } else {
            format!("{}/{}", dir, file)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.mount_id.trim().is_empty() {
            return Err(BoardError::Config("mount_id must not be empty".to_string()));
        }
        if self.summary_path.trim().is_empty() {
            return Err(BoardError::Config("summary_path must not be empty".to_string()));
        }
        let geometry = &self.sparkline;
        let finite = [geometry.width, geometry.height, geometry.padding]
            .iter()
            .all(|v| v.is_finite());
        let inner = 2.0 * geometry.padding;
        if !finite || geometry.padding < 0.0 || geometry.width <= inner || geometry.height <= inner {
            return Err(BoardError::Config(format!(
                "sparkline {}x{} cannot hold padding {}",
                geometry.width, geometry.height, geometry.padding
            )));
        }
        Ok(())
    }
}

/// Configuration source for loading report settings
pub enum ConfigSource {
    File(PathBuf),
    Default,
    Environment,
}

/// Load report configuration from various sources
pub fn load_config(source: ConfigSource) -> Result<ReportConfig> {
    match source {
        ConfigSource::File(path) => {
            debug!("Loading report configuration from {}", path.display());
            let mut config = ReportConfig::from_file(&path)?;
            config.apply_env();
            config.validate()?;
            Ok(config)
        }
        ConfigSource::Default => Ok(ReportConfig::default()),
        ConfigSource::Environment => {
            let mut config = ReportConfig::default();
            config.apply_env();
            config.validate()?;
            Ok(config)
        }
    }
}
