use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekplanConfig {
    /// Directory holding `activities.json` and `goals.json`
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Default tracing filter when RUST_LOG is not set, e.g. "warn" or "weekplan=debug"
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Show the linked goal under each activity
    #[serde(default)]
    pub show_goals: bool,
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("weekplan")
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for WeekplanConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            show_goals: false,
        }
    }
}

impl WeekplanConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join("weekplan")
            .join("config.toml"))
    }

    /// Load config from disk, then apply `WEEKPLAN_*` environment overrides.
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let config = Self::load_from(&Self::config_path()?)?;
        Ok(config.with_overrides(|key| std::env::var(key).ok()))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(path, raw)?;
        Ok(())
    }

    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = lookup("WEEKPLAN_DATA_DIR").filter(|d| !d.is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(level) = lookup("WEEKPLAN_LOG_LEVEL").filter(|l| !l.is_empty()) {
            self.log_level = level;
        }
        if let Some(show) = lookup("WEEKPLAN_SHOW_GOALS") {
            self.show_goals = matches!(show.as_str(), "1" | "true" | "yes");
        }
        self
    }
}
