//! Configuration loader with tier-based merging.
//!
//! Tiers, lowest to highest: built-in defaults, system file, user file,
//! project file, `DATA_DIFF_*` environment variables, CLI flags.

use super::merge::deep_merge_all;
use super::types::{Config, DEFAULT_CONFIG_YAML, parse_bool};
use crate::error::{DiffError, DiffResult};
use serde_json::Value;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name looked up in every config directory.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "DATA_DIFF_";

/// Explicit config file, replacing the file tiers.
pub const CONFIG_PATH_ENV: &str = "DATA_DIFF_CONFIG_PATH";

/// Override for the user config directory.
pub const USER_DIR_ENV: &str = "DATA_DIFF_USER_DIR";

/// File-backed configuration tiers, lowest to highest priority.
///
/// Environment variables and CLI flags are applied on top of the merged files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigTier {
    /// /etc/data-diff/config.yaml
    System = 0,
    /// ~/.data-diff/config.yaml
    User = 1,
    /// ./config.yaml
    Project = 2,
    /// A file named with --config or DATA_DIFF_CONFIG_PATH
    Explicit = 3,
}

impl std::fmt::Display for ConfigTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigTier::System => write!(f, "system"),
            ConfigTier::User => write!(f, "user"),
            ConfigTier::Project => write!(f, "project"),
            ConfigTier::Explicit => write!(f, "explicit"),
        }
    }
}

/// Directories searched for config files.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    pub system_dir: Option<PathBuf>,
    pub user_dir: Option<PathBuf>,
    pub project_dir: Option<PathBuf>,
    /// When set, the only file consulted
    pub explicit_file: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover configuration paths from environment and defaults.
    pub fn discover() -> Self {
        let user_dir = std::env::var(USER_DIR_ENV)
            .ok()
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".data-diff")));

        let system_dir = if cfg!(unix) {
            Some(PathBuf::from("/etc/data-diff"))
        } else {
            None
        };

        Self {
            system_dir,
            user_dir,
            project_dir: Some(PathBuf::from(".")),
            explicit_file: std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from),
        }
    }

    /// Create paths with explicit directories.
    pub fn with_dirs(
        project_dir: Option<PathBuf>,
        user_dir: Option<PathBuf>,
        system_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            system_dir,
            user_dir,
            project_dir,
            explicit_file: None,
        }
    }

    /// Use `path` instead of the directory search.
    pub fn with_explicit_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit_file = Some(path.into());
        self
    }

    /// Candidate files in ascending priority.
    pub fn candidate_files(&self) -> Vec<(ConfigTier, PathBuf)> {
        if let Some(ref explicit) = self.explicit_file {
            return vec![(ConfigTier::Explicit, explicit.clone())];
        }

        [
            (ConfigTier::System, &self.system_dir),
            (ConfigTier::User, &self.user_dir),
            (ConfigTier::Project, &self.project_dir),
        ]
        .into_iter()
        .filter_map(|(tier, dir)| dir.as_ref().map(|d| (tier, d.join(CONFIG_FILE_NAME))))
        .collect()
    }

    /// Where `config init` writes by default.
    pub fn user_config_file(&self) -> Option<PathBuf> {
        self.user_dir.as_ref().map(|d| d.join(CONFIG_FILE_NAME))
    }
}

/// Values given on the command line; `None` leaves the lower tiers alone.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub log_level: Option<String>,
    pub log_format: Option<String>,
    pub debug: Option<bool>,
}

/// Configuration loader that handles tier-based merging.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    pub paths: ConfigPaths,
    config: Config,
    /// Highest-priority file that contributed, if any
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Load configuration with explicit paths and the process environment.
    pub fn load_with_paths(paths: ConfigPaths) -> DiffResult<Self> {
        Self::load_with_env(paths, |key| std::env::var(key).ok())
    }

    /// Load configuration with explicit paths and an environment lookup.
    pub fn load_with_env<F>(paths: ConfigPaths, env: F) -> DiffResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut tiers: Vec<Value> = Vec::new();
        let mut config_path = None;

        let defaults = serde_json::to_value(Config::default())
            .map_err(|e| DiffError::invalid_config(e.to_string()))?;
        tiers.push(defaults);

        for (tier, file) in paths.candidate_files() {
            let required = tier == ConfigTier::Explicit;
            if let Some(value) = read_tier_file(&file, required)? {
                debug!(%tier, path = %file.display(), "loaded config file");
                tiers.push(value);
                config_path = Some(file);
            }
        }

        let merged = deep_merge_all(tiers);
        let mut config: Config = serde_json::from_value(merged).map_err(|e| DiffError::ConfigParse {
            path: config_path.clone().unwrap_or_default(),
            message: e.to_string(),
        })?;

        apply_env_overrides(&mut config, env)?;

        Ok(Self {
            paths,
            config,
            config_path,
        })
    }

    /// Apply the CLI tier.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(ref level) = overrides.log_level {
            self.config.log_level = level.clone();
        }
        if let Some(ref format) = overrides.log_format {
            self.config.log_format = format.clone();
        }
        if let Some(debug) = overrides.debug {
            self.config.debug = debug;
        }
    }

    /// Validate the merged configuration.
    pub fn validate(&self) -> DiffResult<()> {
        self.config.validate()
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Consume the loader and return the configuration.
    pub fn into_config(self) -> Config {
        self.config
    }

    /// Get the config file path that was used.
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}

/// Environment variable name for a config key (`log.level` → `DATA_DIFF_LOG_LEVEL`).
pub fn env_key(key: &str) -> String {
    format!("{}{}", ENV_PREFIX, key.replace('.', "_").to_uppercase())
}

fn apply_env_overrides<F>(config: &mut Config, env: F) -> DiffResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(level) = env(&env_key("log_level")) {
        config.log_level = level;
    }
    if let Some(format) = env(&env_key("log_format")) {
        config.log_format = format;
    }
    let debug_key = env_key("debug");
    if let Some(raw) = env(&debug_key) {
        config.debug = parse_bool(&debug_key, &raw)?;
    }
    if let Some(format) = env(&env_key("format")) {
        config.format = format;
    }
    if let Some(input) = env(&env_key("input_file")) {
        config.input_file = input;
    }
    if let Some(output) = env(&env_key("output_file")) {
        config.output_file = output;
    }
    Ok(())
}

/// Read one tier. Missing optional files are skipped.
fn read_tier_file(path: &Path, required: bool) -> DiffResult<Option<Value>> {
    if !required && !path.is_file() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        DiffError::io(format!("failed to read config file '{}'", path.display()), e)
    })?;

    serde_yaml::from_str::<Value>(&content)
        .map(Some)
        .map_err(|e| DiffError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Write the default config file at `path`, creating parent directories.
///
/// Fails with [`DiffError::ConfigAlreadyExists`] if the file is already there.
pub fn init_config_file(path: &Path) -> DiffResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            DiffError::io(
                format!("failed to create config directory '{}'", parent.display()),
                e,
            )
        })?;
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => DiffError::ConfigAlreadyExists(path.to_path_buf()),
            _ => DiffError::io(format!("failed to create config file '{}'", path.display()), e),
        })?;

    file.write_all(DEFAULT_CONFIG_YAML.as_bytes())
        .map_err(|e| DiffError::io(format!("failed to write config file '{}'", path.display()), e))
}
