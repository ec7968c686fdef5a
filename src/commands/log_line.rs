//! Log command implementation

use chronicle::{Level, RotatingFileLogger};

/// Write a single line through the logger
pub fn run(logger: &mut RotatingFileLogger, message: &str, level: Level, component: Option<&str>) {
    logger.log_message(message, level, component);
}
