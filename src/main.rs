//! data-diff
//!
//! Compares JSON, YAML and text sources and reports the differences.

use anyhow::Result;
use clap::Parser;
use data_diff::cli::compare::run_compare;
use data_diff::cli::config::{ConfigCommand, run_init, show_config};
use data_diff::cli::version::write_version;
use data_diff::cli::{Cli, Command};
use data_diff::config::ConfigLoader;
use data_diff::logging::{self, LogDestination};
use tracing::{debug, info};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Tiers up to the environment, then the CLI flags on top
    let mut loader = ConfigLoader::load_with_paths(cli.config_paths())?;
    loader.apply_overrides(&cli.overrides());
    loader.validate()?;

    logging::init(loader.config(), &LogDestination::parse(&cli.log))?;
    info!("starting data-diff");
    debug!(
        config_file = ?loader.config_path(),
        log_level = %loader.config().log_level,
        "configuration loaded"
    );

    let stdout = std::io::stdout();
    match &cli.command {
        Command::Compare(args) => {
            run_compare(loader.config(), args)?;
        }
        Command::Config(ConfigCommand::Show) => {
            show_config(&loader, &mut stdout.lock())?;
        }
        Command::Config(ConfigCommand::Init(args)) => {
            run_init(&loader.paths, args, &mut stdout.lock())?;
        }
        Command::Version => {
            write_version(&mut stdout.lock())?;
        }
    }

    Ok(())
}
