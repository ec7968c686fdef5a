//! Paths command implementation

use chronicle::RotatingFileLogger;
use colored::Colorize;

/// Show where the logger writes
pub fn run(logger: &RotatingFileLogger) {
    let retention = logger.retention();
    let paths = logger.paths();

    println!("{:<14} {}", "Name:".bold(), paths.name());
    println!("{:<14} {}", "Base dir:".bold(), paths.base_dir().display());
    println!("{:<14} {}", "Log dir:".bold(), paths.log_dir().display());
    println!("{:<14} {}", "Config:".bold(), paths.config_toml().display());
    println!(
        "{:<14} {}",
        "Current file:".bold(),
        logger.current_log_file().display()
    );
    println!(
        "{:<14} archive after {} days, remove after {} days",
        "Retention:".bold(),
        retention.archive_days,
        retention.removal_days
    );
}
