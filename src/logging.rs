//! Logging setup.
//!
//! One `tracing` subscriber is installed at startup from the effective
//! configuration. Reports go to stdout, so logs default to stderr.

use crate::config::{Config, LogFormat};
use anyhow::Result;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Where log lines are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    Off,
    Stdout,
    Stderr,
    /// Append to a file
    File(String),
}

impl LogDestination {
    /// Parse the `--log` option: 0/off, 1/stdout, 2/stderr, or a filename.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "0" | "off" => LogDestination::Off,
            "1" | "stdout" => LogDestination::Stdout,
            "2" | "stderr" => LogDestination::Stderr,
            filename => LogDestination::File(filename.to_string()),
        }
    }
}

/// Build the level filter. Directives in `RUST_LOG` take precedence.
pub fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy()
}

/// Install the global subscriber.
pub fn init(config: &Config, destination: &LogDestination) -> Result<()> {
    let (writer, ansi) = match destination {
        LogDestination::Off => return Ok(()),
        LogDestination::Stdout => (BoxMakeWriter::new(std::io::stdout), true),
        LogDestination::Stderr => (BoxMakeWriter::new(std::io::stderr), true),
        LogDestination::File(filename) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(filename)?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config.tracing_level()))
        .with_writer(writer);

    match config.log_format() {
        LogFormat::Json => {
            let subscriber = builder.json().finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        LogFormat::Text => {
            let subscriber = builder.with_ansi(ansi).finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    Ok(())
}
