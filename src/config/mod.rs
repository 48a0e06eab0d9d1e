//! Configuration module for malloy-bridge.
//!
//! Handles the optional TOML settings file and environment variable expansion.

mod settings;

pub use settings::{
    expand_env_vars, GenerateSettings, LoggingSettings, ReportSettings, Settings, SettingsError,
    CONFIG_ENV_VAR, LOCAL_CONFIG_FILE,
};
