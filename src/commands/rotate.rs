//! Rotate command implementation

use chronicle::RotatingFileLogger;
use colored::Colorize;

/// Run an archive and purge pass immediately
pub fn run(logger: &mut RotatingFileLogger) {
    let report = logger.rotate();

    if report.is_noop() && report.failures.is_empty() {
        println!("{}", "Nothing to archive or remove".yellow());
    } else {
        println!(
            "{} archived, {} removed",
            report.archived.len().to_string().green(),
            report.purged.len().to_string().green()
        );
    }

    if !report.skipped.is_empty() {
        println!(
            "{} file(s) skipped (not named <name>-<YYYYMMDD>.log)",
            report.skipped.len()
        );
    }

    for (path, error) in &report.failures {
        println!("{} {}: {}", "Failed:".red(), path.display(), error);
    }
}
