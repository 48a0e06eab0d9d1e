//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! # Log Levels
//!
//! - `error`: Failed runs
//! - `warn`: Name collisions, missing inventory
//! - `info`: Artifact and report summaries
//! - `debug`: Per-definition rendering, file writes

use std::io;
use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LoggingSettings, SettingsError};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format with colors.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON format for machine parsing.
    Json,
}

impl FromStr for LogFormat {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(SettingsError::InvalidConfig(format!(
                "unknown log format '{}'",
                other
            ))),
        }
    }
}

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    pub format: LogFormat,
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::default(),
            with_ansi: true,
        }
    }
}

impl LogConfig {
    /// Build from the `[logging]` section of the settings file.
    pub fn from_settings(settings: &LoggingSettings) -> Result<Self, SettingsError> {
        let level = Level::from_str(&settings.level).map_err(|_| {
            SettingsError::InvalidConfig(format!("unknown log level '{}'", settings.level))
        })?;
        Ok(Self {
            level,
            format: settings.format.parse()?,
            ..Default::default()
        })
    }

    /// Raise the level by CLI verbosity count.
    ///
    /// - 0 (no `-v`): configured level
    /// - 1 (`-v`): at least debug
    /// - 2+ (`-vv`): trace
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.level = match verbosity {
            0 => self.level,
            1 => self.level.max(Level::DEBUG),
            _ => Level::TRACE,
        };
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }
}

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` overrides the configured level when set.
pub fn init_logging(config: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str().to_lowercase()));

    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .without_time();

    match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .init(),
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(layer.compact().with_ansi(config.with_ansi))
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(layer.with_ansi(config.with_ansi))
            .init(),
    }
}
