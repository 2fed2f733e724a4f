//! Config subcommands: show the effective configuration, write a default file.

use crate::config::{ConfigLoader, ConfigPaths, init_config_file};
use crate::error::{DiffError, DiffResult};
use clap::{Args, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

/// Configuration management
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize configuration file
    Init(InitArgs),
}

/// Arguments for `config init`
#[derive(Args, Debug, Default)]
pub struct InitArgs {
    /// Where to write the file (default: ~/.data-diff/config.yaml)
    #[arg(long, value_name = "FILE")]
    pub path: Option<PathBuf>,
}

/// Print the effective configuration.
pub fn show_config<W: Write>(loader: &ConfigLoader, out: &mut W) -> io::Result<()> {
    let config = loader.config();
    writeln!(out, "Current configuration:")?;
    writeln!(out, "  Log Level: {}", config.log_level)?;
    writeln!(out, "  Log Format: {}", config.log_format)?;
    writeln!(out, "  Debug: {}", config.debug)?;
    writeln!(out, "  Input File: {}", config.input_file)?;
    writeln!(out, "  Output File: {}", config.output_file)?;
    writeln!(out, "  Format: {}", config.format)?;

    match loader.config_path() {
        Some(path) => writeln!(out, "  Config File: {}", path.display()),
        None => writeln!(
            out,
            "  Config File: none (using defaults and environment variables)"
        ),
    }
}

/// Write the default config file and report where it went.
pub fn run_init<W: Write>(paths: &ConfigPaths, args: &InitArgs, out: &mut W) -> DiffResult<PathBuf> {
    let path = args
        .path
        .clone()
        .or_else(|| paths.user_config_file())
        .ok_or_else(|| DiffError::invalid_config("cannot determine user config directory"))?;

    init_config_file(&path)?;
    info!(path = %path.display(), "configuration file created");

    writeln!(out, "Configuration file created: {}", path.display())
        .map_err(|e| DiffError::io("failed to write to stdout", e))?;
    Ok(path)
}
