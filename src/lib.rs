//! chronicle - a self-rotating, privilege-aware daily file logger
//!
//! ```no_run
//! use chronicle::{Level, RotatingFileLogger};
//!
//! let mut logger = RotatingFileLogger::new("MyApp")?;
//! logger.log_message("started", Level::Info, Some("main"));
//! # Ok::<(), chronicle::LoggerError>(())
//! ```

pub mod core;
pub mod error;
pub mod logger;

pub use crate::core::{LogPaths, PrivilegeProbe, Retention, Settings};
pub use error::{LoggerError, Result};
pub use logger::{Level, LoggerBuilder, RotatingFileLogger, RotationReport};
