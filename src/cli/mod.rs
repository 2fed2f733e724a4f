//! CLI command definitions for data-diff
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

pub mod compare;
pub mod config;
pub mod version;

use crate::config::{ConfigOverrides, ConfigPaths};
use clap::{Parser, Subcommand};
use compare::CompareArgs;
use config::ConfigCommand;
use std::path::PathBuf;

/// Compare structured data files and report differences
#[derive(Parser, Debug)]
#[command(name = "data-diff", author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (replaces the system, user and project files)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level: debug, info, warn, error or fatal (overrides config)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Log format: json or text (overrides config)
    #[arg(long, global = true, value_name = "FORMAT")]
    pub log_format: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compare two data files
    Compare(CompareArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Show version information
    Version,
}

impl Cli {
    /// Flags that form the CLI configuration tier.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            log_level: self.log_level.clone(),
            log_format: self.log_format.clone(),
            debug: self.debug.then_some(true),
        }
    }

    /// Config file locations, honoring `--config`.
    pub fn config_paths(&self) -> ConfigPaths {
        let paths = ConfigPaths::discover();
        match &self.config {
            Some(path) => paths.with_explicit_file(path),
            None => paths,
        }
    }
}
