//! Log levels and line formatting
//!
//! Every line has the shape
//! `[YYYY-MM-DD HH:MM:SS] pid:<pid> [<LEVEL>][ @<component>] :] <message>`.

use chrono::NaiveDateTime;
use std::fmt;
use std::str::FromStr;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Severity of a log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Level {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Critical,
    Fatal,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
            Level::Fatal => "FATAL",
        }
    }

    /// Lines at this level are mirrored to stderr instead of stdout
    pub fn is_error(&self) -> bool {
        matches!(self, Level::Error | Level::Critical | Level::Fatal)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a level name is not recognised
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLevel(pub String);

impl fmt::Display for UnknownLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown level '{}' (expected DEBUG, INFO, WARNING, ERROR, CRITICAL or FATAL)",
            self.0
        )
    }
}

impl std::error::Error for UnknownLevel {}

/// Case-sensitive: only the upper-case names are accepted.
impl FromStr for Level {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DEBUG" => Ok(Level::Debug),
            "INFO" => Ok(Level::Info),
            "WARNING" => Ok(Level::Warning),
            "ERROR" => Ok(Level::Error),
            "CRITICAL" => Ok(Level::Critical),
            "FATAL" => Ok(Level::Fatal),
            other => Err(UnknownLevel(other.to_string())),
        }
    }
}

pub(crate) fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Build one newline-terminated log line
///
/// The message is trimmed; an empty component is the same as none.
pub fn format_line(
    timestamp: &str,
    pid: u32,
    level: Level,
    component: Option<&str>,
    message: &str,
) -> String {
    let component = match component {
        Some(c) if !c.is_empty() => format!(" @{}", c),
        _ => String::new(),
    };
    format!(
        "[{}] pid:{} [{}]{} :] {}\n",
        timestamp,
        pid,
        level,
        component,
        message.trim()
    )
}
