//! Dashboard configuration (JSON file, every field optional)

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable pointing at a config file.
pub const CONFIG_ENV_VAR: &str = "NEWS_DASHBOARD_CONFIG";

/// Config file looked up in the working directory when the variable is unset.
pub const DEFAULT_CONFIG_FILE: &str = "news_dashboard.json";

/// Complete dashboard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Dataset opened at startup.
    pub data_path: PathBuf,
    pub columns: ColumnConfig,
    pub top_n: TopNConfig,
    pub cloud: CloudConfig,
    pub colors: ColorConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("news_preprocessed.csv"),
            columns: ColumnConfig::default(),
            top_n: TopNConfig::default(),
            cloud: CloudConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Load and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path`, falling back to defaults (with a warning) if it is unusable.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring config {}: {e:#}", path.display());
                Self::default()
            }
        }
    }

    /// `$NEWS_DASHBOARD_CONFIG`, then `./news_dashboard.json`, then defaults.
    pub fn discover() -> Self {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Self::load_or_default(Path::new(&path));
        }
        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.exists() {
            return Self::load_or_default(local);
        }
        Self::default()
    }

    pub fn validate(&self) -> Result<()> {
        self.top_n.validate()?;
        self.cloud.validate()?;
        if self.columns.text.is_empty() || self.columns.label.is_empty() {
            bail!("column names must not be empty");
        }
        Ok(())
    }
}

/// Names of the two required source columns
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub text: String,
    pub label: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            text: "preprocessed_text".to_string(),
            label: "Label".to_string(),
        }
    }
}

/// Bounds and initial value of the "number of most common words" slider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopNConfig {
    pub min: usize,
    pub max: usize,
    pub default: usize,
}

impl Default for TopNConfig {
    fn default() -> Self {
        Self {
            min: 5,
            max: 50,
            default: 20,
        }
    }
}

impl TopNConfig {
    /// Force `n` into `[min, max]`.
    pub fn clamp(&self, n: usize) -> usize {
        n.max(self.min).min(self.max)
    }

    fn validate(&self) -> Result<()> {
        if self.min == 0 {
            bail!("top_n.min must be at least 1");
        }
        if self.min > self.max {
            bail!("top_n.min ({}) exceeds top_n.max ({})", self.min, self.max);
        }
        if self.default < self.min || self.default > self.max {
            bail!(
                "top_n.default ({}) outside [{}, {}]",
                self.default,
                self.min,
                self.max
            );
        }
        Ok(())
    }
}

/// Word-cloud layout parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    pub max_words: usize,
    /// 0.0 ranks words only by order, 1.0 scales font linearly with frequency.
    pub relative_scaling: f32,
    pub min_font: f32,
    pub max_font: f32,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            max_words: 200,
            relative_scaling: 0.5,
            min_font: 8.0,
            max_font: 64.0,
        }
    }
}

impl CloudConfig {
    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.relative_scaling) {
            bail!("cloud.relative_scaling must be within [0, 1]");
        }
        if self.min_font <= 0.0 || self.min_font > self.max_font {
            bail!(
                "cloud font range [{}, {}] is invalid",
                self.min_font,
                self.max_font
            );
        }
        Ok(())
    }
}

/// Chart colours as `#RRGGBB` strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub pie_fake: String,
    pub pie_real: String,
    pub bar_fake: String,
    pub bar_real: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            pie_fake: "#34D1BF".to_string(),
            pie_real: "#3454D1".to_string(),
            bar_fake: "#6CD4FF".to_string(),
            bar_real: "#C2EFB3".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = DashboardConfig::default();
        config.validate().unwrap();
        assert_eq!(config.columns.text, "preprocessed_text");
        assert_eq!(config.columns.label, "Label");
        assert_eq!(config.top_n.default, 20);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let file = write_config(r#"{"columns": {"text": "body"}, "top_n": {"default": 10}}"#);
        let config = DashboardConfig::load(file.path()).unwrap();

        assert_eq!(config.columns.text, "body");
        assert_eq!(config.columns.label, "Label");
        assert_eq!(config.top_n.default, 10);
        assert_eq!(config.top_n.max, 50);
        assert_eq!(config.cloud, CloudConfig::default());
    }

    #[test]
    fn test_invalid_bounds_rejected() {
        let file = write_config(r#"{"top_n": {"min": 30, "max": 10, "default": 20}}"#);
        assert!(DashboardConfig::load(file.path()).is_err());

        let file = write_config(r#"{"top_n": {"min": 0}}"#);
        assert!(DashboardConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_load_or_default_falls_back_on_garbage() {
        let file = write_config("{not json");
        let config = DashboardConfig::load_or_default(file.path());
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_top_n_clamp() {
        let bounds = TopNConfig::default();
        assert_eq!(bounds.clamp(0), 5);
        assert_eq!(bounds.clamp(17), 17);
        assert_eq!(bounds.clamp(500), 50);
    }
}
