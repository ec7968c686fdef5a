//! Info command implementation

use chronicle::{Level, RotatingFileLogger};

/// Describe the example app
pub fn run(logger: &mut RotatingFileLogger) {
    if logger.is_debug_enabled() {
        logger.log_message("Running info command", Level::Debug, Some("info"));
    }
    println!("This is an example app");
}
