//! Configuration types and validation.

use crate::error::{DiffError, DiffResult};
use serde::{Deserialize, Serialize};
use tracing::Level;

/// Accepted `log_level` values.
pub const LOG_LEVELS: &[&str] = &["debug", "info", "warn", "error", "fatal"];

/// Accepted `log_format` values.
pub const LOG_FORMATS: &[&str] = &["json", "text"];

/// Contents of the default config file written by `config init`.
pub const DEFAULT_CONFIG_YAML: &str = "\
# data-diff configuration file
log_level: info
log_format: json
debug: false
format: json
";

/// Effective application configuration.
///
/// Built once at startup and passed by reference; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Minimum log level: debug, info, warn, error or fatal.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log line encoding: json or text.
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Force debug logging regardless of `log_level`.
    #[serde(default)]
    pub debug: bool,

    /// Default report format for `compare`.
    #[serde(default = "default_format")]
    pub format: String,

    /// Reserved; shown by `config show`.
    #[serde(default)]
    pub input_file: String,

    /// Default report destination when `--output` is not given.
    #[serde(default)]
    pub output_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
            debug: false,
            format: default_format(),
            input_file: String::new(),
            output_file: String::new(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_format() -> String {
    "json".to_string()
}

/// How log lines are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Text,
}

impl Config {
    /// Check the logging fields against their accepted values.
    pub fn validate(&self) -> DiffResult<()> {
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(DiffError::invalid_config(format!(
                "invalid log level: {}",
                self.log_level
            )));
        }

        if !LOG_FORMATS.contains(&self.log_format.as_str()) {
            return Err(DiffError::invalid_config(format!(
                "invalid log format: {}",
                self.log_format
            )));
        }

        Ok(())
    }

    /// Effective tracing level. `debug: true` wins over `log_level`.
    pub fn tracing_level(&self) -> Level {
        if self.debug {
            return Level::DEBUG;
        }
        match self.log_level.as_str() {
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" | "fatal" => Level::ERROR,
            _ => Level::INFO,
        }
    }

    pub fn log_format(&self) -> LogFormat {
        match self.log_format.as_str() {
            "text" => LogFormat::Text,
            _ => LogFormat::Json,
        }
    }

    /// Configured output file, if one is set.
    pub fn output_file(&self) -> Option<&str> {
        Some(self.output_file.trim()).filter(|p| !p.is_empty())
    }
}

/// Parse a boolean from an environment-style string.
pub fn parse_bool(key: &str, raw: &str) -> DiffResult<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        _ => Err(DiffError::invalid_config(format!(
            "invalid boolean for {}: {}",
            key, raw
        ))),
    }
}
