//! TOML-based configuration for malloy-bridge.
//!
//! Supports a config file (malloy-bridge.toml) with environment variable
//! expansion in path values.
//!
//! Example configuration:
//! ```toml
//! [generate]
//! out_dir = "${WAREHOUSE_ROOT}/malloy"
//!
//! [report]
//! inventory_column = "table_name"
//!
//! [logging]
//! level = "debug"
//! format = "compact"
//! ```

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::mapping::DEFAULT_INVENTORY_COLUMN;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "MALLOY_BRIDGE_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "malloy-bridge.toml";

/// `${VAR}` or `$VAR`.
static ENV_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}|\$([A-Za-z_][A-Za-z0-9_]*)").unwrap()
});

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub generate: GenerateSettings,
    pub report: ReportSettings,
    pub logging: LoggingSettings,
}

/// Scaffold generation settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GenerateSettings {
    /// Output directory used when `--out` is not given (supports ${ENV_VAR}).
    pub out_dir: Option<String>,
}

impl GenerateSettings {
    /// The output directory with environment variables expanded.
    pub fn resolved_out_dir(&self) -> Result<Option<PathBuf>, SettingsError> {
        self.out_dir
            .as_deref()
            .map(|dir| expand_env_vars(dir).map(PathBuf::from))
            .transpose()
    }
}

/// Readiness report settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Inventory CSV column holding table names.
    pub inventory_column: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            inventory_column: DEFAULT_INVENTORY_COLUMN.to_string(),
        }
    }
}

/// Logging settings. CLI flags take precedence.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// error, warn, info, debug or trace.
    pub level: String,

    /// pretty, compact or json.
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `MALLOY_BRIDGE_CONFIG`
    /// 2. `./malloy-bridge.toml`
    /// 3. `~/.config/malloy-bridge/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var(CONFIG_ENV_VAR) {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("malloy-bridge").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.report.inventory_column.trim().is_empty() {
            return Err(SettingsError::InvalidConfig(
                "report.inventory_column must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax. A `$` not followed by a variable
/// name is kept as-is.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut missing = None;
    let expanded = ENV_REFERENCE.replace_all(s, |caps: &Captures| {
        let name = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map_or("", |m| m.as_str());
        env::var(name).unwrap_or_else(|_| {
            missing.get_or_insert_with(|| name.to_string());
            String::new()
        })
    });

    match missing {
        Some(name) => Err(SettingsError::MissingEnvVar(name)),
        None => Ok(expanded.into_owned()),
    }
}
