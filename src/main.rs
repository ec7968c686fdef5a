//! chronicle - example app writing through the rotating file logger

mod cli;
mod commands;

use cli::{Cli, Commands};
use colored::Colorize;

fn main() {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Set verbose logging if requested
    if cli.verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }

    // Handle errors
    if let Err(e) = run(&cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    if let Commands::Privileges = cli.command {
        commands::run_privileges();
        return Ok(());
    }

    let mut logger = commands::open_logger(cli)?;

    match &cli.command {
        Commands::Info => commands::run_info(&mut logger),
        Commands::Log {
            message,
            level,
            component,
        } => commands::run_log(&mut logger, message, *level, component.as_deref()),
        Commands::Rotate => commands::run_rotate(&mut logger),
        Commands::Paths => commands::run_paths(&logger),
        // handled above
        Commands::Privileges => {}
    }

    Ok(())
}
