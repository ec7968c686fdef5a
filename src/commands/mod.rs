//! Command implementations for chronicle

pub mod info;
pub mod log_line;
pub mod paths;
pub mod privileges;
pub mod rotate;

// Re-export command functions
pub use info::run as run_info;
pub use log_line::run as run_log;
pub use paths::run as run_paths;
pub use privileges::run as run_privileges;
pub use rotate::run as run_rotate;

use crate::cli::Cli;
use anyhow::{Context, Result};
use chronicle::core::paths::slugify;
use chronicle::{Level, LogPaths, PrivilegeProbe, RotatingFileLogger, Settings};
use std::path::PathBuf;

/// Settings file to read when `--config` is absent
///
/// Always keyed on the slugified name: the settings file cannot pick its own
/// location. Default paths are only resolved when `--base-dir` is missing.
pub fn config_path(cli: &Cli, probe: &PrivilegeProbe) -> Result<PathBuf> {
    if let Some(path) = &cli.config {
        return Ok(path.clone());
    }
    if let Some(dir) = &cli.base_dir {
        return Ok(dir.join("config.toml"));
    }
    let paths = LogPaths::resolve(&slugify(&cli.name), probe, None)
        .context("Failed to resolve default log paths")?;
    Ok(paths.config_toml())
}

/// Build the logger from the global CLI options and the settings file
pub fn open_logger(cli: &Cli) -> Result<RotatingFileLogger> {
    let probe = PrivilegeProbe::new();

    let config_path = config_path(cli, &probe)?;
    let settings = Settings::load(&config_path)?;
    log::debug!("Settings from {}: {:?}", config_path.display(), settings);

    let mut builder = RotatingFileLogger::builder(&cli.name)
        .settings(&settings)
        .probe(probe);
    if let Some(dir) = &cli.log_dir {
        builder = builder.log_dir(dir);
    }
    if let Some(dir) = &cli.base_dir {
        builder = builder.base_dir(dir);
    }

    let mut logger = builder.build().context("Failed to initialize logger")?;

    if logger.is_debug_enabled() {
        let banner = [
            format!(
                "{} v{} with the following:",
                logger.name(),
                env!("CARGO_PKG_VERSION")
            ),
            format!(">> {}", RotatingFileLogger::version()),
            format!(">> {}", PrivilegeProbe::version()),
        ];
        for line in &banner {
            logger.log_message(line, Level::Info, Some("main"));
        }
    }

    Ok(logger)
}
