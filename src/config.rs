//! Application configuration loaded from TOML.
//!
//! Resolution order for the config file:
//! 1. `--config` argument (must exist)
//! 2. `COACHLITE_CONFIG` environment variable (must exist)
//! 3. `<config_dir>/coachlite/config.toml`, if present
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::report::DEFAULT_REPORT_FILE;

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "COACHLITE_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0:?}")]
    NotFound(PathBuf),

    #[error("Failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the check-in log
    pub data_dir: PathBuf,
    /// Log file name inside `data_dir`
    pub checkin_file: String,
    /// Entries shown in the recent-history preview
    pub history_limit: usize,
    /// Slider granularity
    pub slider_step: u32,
    /// Default output path for the PDF report
    pub report_file: PathBuf,
    pub analyzer: AnalyzerConfig,
    pub stage_mapper: StageMapperConfig,
}

/// External analyzer. With no command the local formulas are used.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// `[program, args...]`
    pub command: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StageMapperConfig {
    /// `[program, args...]`; trait values are appended as arguments
    pub command: Option<Vec<String>>,
    /// Replacement for the embedded stage table
    pub table: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            checkin_file: "lite_checkins.json".to_string(),
            history_limit: 7,
            slider_step: 5,
            report_file: PathBuf::from(DEFAULT_REPORT_FILE),
            analyzer: AnalyzerConfig::default(),
            stage_mapper: StageMapperConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parse and validate TOML content.
    pub fn from_toml(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a specific config file.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded config from {:?}", path);
        Self::from_toml(&content, path)
    }

    /// Resolve and load the config, falling back to defaults when no file
    /// is named and none exists in the user config directory.
    pub fn load(cli_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = cli_path {
            return Self::load_file(path);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.is_empty() {
                return Self::load_file(Path::new(&path));
            }
        }

        if let Some(path) = default_config_path().filter(|p| p.exists()) {
            return Self::load_file(&path);
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.checkin_file.trim().is_empty() {
            return Err(ConfigError::Invalid("checkin_file must not be empty".to_string()));
        }
        if self.history_limit == 0 {
            return Err(ConfigError::Invalid("history_limit must be at least 1".to_string()));
        }
        if self.slider_step == 0 || self.slider_step > 100 {
            return Err(ConfigError::Invalid(format!(
                "slider_step must be between 1 and 100, got {}",
                self.slider_step
            )));
        }
        for (name, cmd) in [
            ("analyzer.command", &self.analyzer.command),
            ("stage_mapper.command", &self.stage_mapper.command),
        ] {
            if matches!(cmd, Some(argv) if argv.is_empty()) {
                return Err(ConfigError::Invalid(format!("{} must not be empty", name)));
            }
        }
        Ok(())
    }

    /// Full path of the check-in log.
    pub fn checkin_path(&self) -> PathBuf {
        self.data_dir.join(&self.checkin_file)
    }
}

/// `<config_dir>/coachlite/config.toml` for the current platform.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("coachlite").join("config.toml"))
}
