//! Path management for chronicle
//!
//! Default locations depend on whether the process runs as the superuser:
//!
//! ## User-level (not root):
//! - Base directory: ~/.app/<name>/
//! - Log directory: ~/.app/<name>/log/
//!
//! ## System-level (root):
//! - Base directory: /var/<name>/
//! - Log directory: /var/log/<name>/
//!
//! Inside the log directory the active file is `<name>-<YYYYMMDD>.log` and
//! archived days become `<name>-<YYYYMMDD>.tar.gz`.

use crate::core::privilege::PrivilegeProbe;
use crate::error::{LoggerError, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

pub const LOG_SUFFIX: &str = ".log";
pub const ARCHIVE_SUFFIX: &str = ".tar.gz";
const DATE_FORMAT: &str = "%Y%m%d";

/// Turn a camel-case name into a log-file-friendly slug
///
/// A hyphen goes before every ASCII upper-case letter except a leading one,
/// then everything is lower-cased.
///
/// # Examples
/// ```
/// use chronicle::core::paths::slugify;
/// assert_eq!(slugify("MyApp"), "my-app");
/// assert_eq!(slugify("svc"), "svc");
/// ```
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            slug.push('-');
        }
        slug.extend(c.to_lowercase());
    }
    slug
}

/// Reject names that cannot be used as a file name prefix
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(LoggerError::EmptyName);
    }
    if name.contains('/') || name.contains('\\') {
        return Err(LoggerError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// File name of the log for `date`
pub fn log_file_name(name: &str, date: NaiveDate) -> String {
    format!("{}-{}{}", name, date.format(DATE_FORMAT), LOG_SUFFIX)
}

/// Archive path for a log file, next to it
///
/// Only the trailing `.log` is replaced.
pub fn archive_path_for(log_file: &Path) -> PathBuf {
    let file_name = log_file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let stem = file_name.strip_suffix(LOG_SUFFIX).unwrap_or(&file_name);
    log_file.with_file_name(format!("{}{}", stem, ARCHIVE_SUFFIX))
}

/// Extract the date of a `<prefix>-<YYYYMMDD>.log` file name
///
/// The date is the text after the last hyphen, up to the first dot. The
/// prefix may be anything, so files of other streams in the same directory
/// parse too.
pub fn parse_log_date(file_name: &str) -> Result<NaiveDate> {
    let malformed = || LoggerError::MalformedFileName(file_name.to_string());

    let date_str = file_name
        .strip_suffix(LOG_SUFFIX)
        .and_then(|stem| stem.rsplit_once('-'))
        .and_then(|(_, tail)| tail.split('.').next())
        .ok_or_else(malformed)?;

    if date_str.len() != 8 || !date_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }

    NaiveDate::parse_from_str(date_str, DATE_FORMAT).map_err(|_| malformed())
}

/// Resolved directories for one log stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogPaths {
    /// Log stream name (already normalized)
    name: String,
    /// Application root
    base_dir: PathBuf,
    /// Directory holding the log files
    log_dir: PathBuf,
}

impl LogPaths {
    /// Resolve default directories for `name`
    ///
    /// Only the superuser check matters here; being able to sudo does not move
    /// the files to system locations. `home` overrides the detected home
    /// directory, and is only consulted for user-level paths.
    pub fn resolve(name: &str, probe: &PrivilegeProbe, home: Option<&Path>) -> Result<Self> {
        if probe.is_superuser() {
            Ok(Self::new_system(name))
        } else {
            let home = match home {
                Some(home) => home.to_path_buf(),
                None => dirs::home_dir().ok_or(LoggerError::HomeDirUnavailable)?,
            };
            Ok(Self::new_user(name, &home))
        }
    }

    /// User-level paths under `home`
    pub fn new_user(name: &str, home: &Path) -> Self {
        let base_dir = home.join(".app").join(name);
        Self {
            name: name.to_string(),
            log_dir: base_dir.join("log"),
            base_dir,
        }
    }

    /// System-level paths under /var
    pub fn new_system(name: &str) -> Self {
        Self {
            name: name.to_string(),
            base_dir: PathBuf::from("/var").join(name),
            log_dir: PathBuf::from("/var/log").join(name),
        }
    }

    /// Replace the base directory
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Replace the log directory
    pub fn with_log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.log_dir = log_dir.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Full path of the log file for `date`
    pub fn log_file(&self, date: NaiveDate) -> PathBuf {
        self.log_dir.join(log_file_name(&self.name, date))
    }

    /// Default settings file location
    pub fn config_toml(&self) -> PathBuf {
        self.base_dir.join("config.toml")
    }
}
