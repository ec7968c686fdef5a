//! The rotating daily file logger
//!
//! Each write opens `<log_dir>/<name>-<YYYYMMDD>.log` for append, writes one
//! line and closes it again. When the computed file changes (a new day), a
//! rotation pass archives and purges older files before the write.

use crate::core::paths::{slugify, validate_name, LogPaths};
use crate::core::privilege::PrivilegeProbe;
use crate::core::settings::{Retention, Settings};
use crate::error::{LoggerError, Result};
use crate::logger::clock::{Clock, SystemClock};
use crate::logger::console::{Console, StdConsole};
use crate::logger::line::{format_line, format_timestamp, Level};
use crate::logger::rotation::{self, RotationReport};
use chrono::NaiveDate;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

const VERSION: &str = "ChronicleLogger v1.0.20";

/// Check the `DEBUG` / `debug` environment toggles
///
/// Either one set to `show` (any case) enables debug mode.
pub fn debug_from_env() -> bool {
    ["DEBUG", "debug"].iter().any(|key| {
        std::env::var(key)
            .map(|value| value.eq_ignore_ascii_case("show"))
            .unwrap_or(false)
    })
}

/// Builder for [`RotatingFileLogger`]
pub struct LoggerBuilder {
    name: String,
    log_dir: Option<PathBuf>,
    base_dir: Option<PathBuf>,
    home_dir: Option<PathBuf>,
    slugify: bool,
    debug: Option<bool>,
    retention: Retention,
    probe: Option<PrivilegeProbe>,
    clock: Box<dyn Clock>,
    console: Box<dyn Console>,
}

impl LoggerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            log_dir: None,
            base_dir: None,
            home_dir: None,
            slugify: true,
            debug: None,
            retention: Retention::default(),
            probe: None,
            clock: Box::new(SystemClock),
            console: Box::new(StdConsole),
        }
    }

    /// Use this log directory instead of the privilege-based default
    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    /// Use this base directory instead of the privilege-based default
    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Home directory for user-level defaults (detected when unset)
    pub fn home_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.home_dir = Some(dir.into());
        self
    }

    /// Turn camel-case name normalization on or off (on by default)
    pub fn slugify(mut self, enabled: bool) -> Self {
        self.slugify = enabled;
        self
    }

    /// Force debug mode instead of reading the environment
    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug = Some(enabled);
        self
    }

    pub fn retention(mut self, retention: Retention) -> Self {
        self.retention = retention;
        self
    }

    /// Apply everything a settings file specifies
    pub fn settings(mut self, settings: &Settings) -> Self {
        self.slugify = settings.slugify;
        if settings.debug.is_some() {
            self.debug = settings.debug;
        }
        self.retention = settings.retention;
        self
    }

    pub fn probe(mut self, probe: PrivilegeProbe) -> Self {
        self.probe = Some(probe);
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn console(mut self, console: impl Console + 'static) -> Self {
        self.console = Box::new(console);
        self
    }

    /// Resolve paths, create the log directory and prime the first file
    ///
    /// # Errors
    /// Fails if the name is empty or contains a path separator, if the
    /// retention thresholds are inverted, or if a home directory is needed
    /// but cannot be determined.
    pub fn build(self) -> Result<RotatingFileLogger> {
        validate_name(&self.name)?;
        if self.retention.archive_days >= self.retention.removal_days {
            return Err(LoggerError::Settings(format!(
                "archive_days ({}) must be smaller than removal_days ({})",
                self.retention.archive_days, self.retention.removal_days
            )));
        }

        let name = if self.slugify {
            slugify(&self.name)
        } else {
            self.name
        };

        let paths = match (self.log_dir, self.base_dir) {
            (Some(log_dir), Some(base_dir)) => LogPaths::new_system(&name)
                .with_log_dir(log_dir)
                .with_base_dir(base_dir),
            (log_dir, base_dir) => {
                let probe = self.probe.unwrap_or_default();
                let mut paths = LogPaths::resolve(&name, &probe, self.home_dir.as_deref())?;
                if let Some(dir) = log_dir {
                    paths = paths.with_log_dir(dir);
                }
                if let Some(dir) = base_dir {
                    paths = paths.with_base_dir(dir);
                }
                paths
            }
        };

        let today = self.clock.now().date();
        let mut logger = RotatingFileLogger {
            current_log_file: paths.log_file(today),
            paths,
            retention: self.retention,
            debug: self.debug.unwrap_or_else(debug_from_env),
            last_written: None,
            rotations: 0,
            pid: std::process::id(),
            clock: self.clock,
            console: self.console,
        };
        logger.prime(today);

        Ok(logger)
    }
}

/// A daily log file writer that archives and purges its own history
pub struct RotatingFileLogger {
    paths: LogPaths,
    retention: Retention,
    debug: bool,
    current_log_file: PathBuf,
    /// File used by the previous write
    last_written: Option<PathBuf>,
    rotations: usize,
    pid: u32,
    clock: Box<dyn Clock>,
    console: Box<dyn Console>,
}

impl RotatingFileLogger {
    /// Build a logger with all defaults for `name`
    pub fn new(name: impl Into<String>) -> Result<Self> {
        LoggerBuilder::new(name).build()
    }

    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(name)
    }

    pub fn version() -> &'static str {
        VERSION
    }

    pub fn name(&self) -> &str {
        self.paths.name()
    }

    pub fn base_dir(&self) -> &Path {
        self.paths.base_dir()
    }

    pub fn log_dir(&self) -> &Path {
        self.paths.log_dir()
    }

    pub fn paths(&self) -> &LogPaths {
        &self.paths
    }

    /// File the last write went to (or will go to, before any write)
    pub fn current_log_file(&self) -> &Path {
        &self.current_log_file
    }

    pub fn retention(&self) -> Retention {
        self.retention
    }

    pub fn is_debug_enabled(&self) -> bool {
        self.debug
    }

    /// Number of rotation passes run so far, including the one at construction
    pub fn rotation_count(&self) -> usize {
        self.rotations
    }

    /// Write one line, rotating first if the day changed
    ///
    /// Never fails: problems are reported on stderr and the line is dropped.
    pub fn log_message(&mut self, message: &str, level: Level, component: Option<&str>) {
        let now = self.clock.now();
        let timestamp = format_timestamp(now);
        let mut entry = format_line(&timestamp, self.pid, level, component, message);

        let path = self.paths.log_file(now.date());
        if self.last_written.as_deref() != Some(path.as_path()) {
            // Record first: reports raised during rotation must not rotate again.
            self.last_written = Some(path.clone());
            self.current_log_file = path.clone();
            self.ensure_log_dir();
            self.rotate_at(now.date());

            if self.debug {
                let header = format!(
                    "[{}] pid:{} [{}] @logger :] Using {}\n",
                    timestamp,
                    self.pid,
                    level,
                    path.display()
                );
                entry.insert_str(0, &header);
            }
        }

        let Some(mut file) = self.open_for_append(&path) else {
            return;
        };

        let mirrored = entry.trim_end();
        if level.is_error() {
            self.console.err(mirrored);
        } else {
            self.console.out(mirrored);
        }

        if let Err(e) = file.write_all(entry.as_bytes()) {
            self.console.err(&format!(
                "Failed to write to {}: {}",
                path.display(),
                e
            ));
        }
    }

    /// Run a rotation pass now
    pub fn rotate(&mut self) -> RotationReport {
        let today = self.clock.now().date();
        self.rotate_at(today)
    }

    fn rotate_at(&mut self, today: NaiveDate) -> RotationReport {
        self.rotations += 1;
        log::debug!(
            "Rotating logs for {} in {}",
            self.paths.name(),
            self.paths.log_dir().display()
        );
        rotation::rotate(
            self.paths.log_dir(),
            today,
            self.retention,
            self.console.as_mut(),
        )
    }

    /// Create the log directory, write the priming newline and run the first
    /// maintenance pass
    ///
    /// The first `log_message` of the day then goes straight to the file.
    fn prime(&mut self, today: NaiveDate) {
        let path = self.paths.log_file(today);
        self.last_written = Some(path.clone());
        self.current_log_file = path.clone();

        self.ensure_log_dir();

        if let Some(mut file) = self.open_for_append(&path) {
            if let Err(e) = file.write_all(b"\n") {
                self.console.err(&format!(
                    "Failed to write to {}: {}",
                    path.display(),
                    e
                ));
            }
        }

        self.rotate_at(today);
    }

    /// Create the log directory if it is missing
    ///
    /// Failure goes through the logger's own ERROR path.
    fn ensure_log_dir(&mut self) {
        let dir = self.paths.log_dir().to_path_buf();
        if dir.as_os_str().is_empty() || dir.exists() {
            return;
        }

        match fs::create_dir_all(&dir) {
            Ok(()) => {
                log::debug!("Created log directory {}", dir.display());
                self.console
                    .out(&format!("Created directory: {}", dir.display()));
            }
            Err(e) => {
                self.log_message(
                    &format!("Error making directory {}: {}", dir.display(), e),
                    Level::Error,
                    None,
                );
            }
        }
    }

    fn open_for_append(&mut self, path: &Path) -> Option<File> {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Some(file),
            Err(e) => {
                log::debug!("Cannot open {}: {}", path.display(), e);
                self.console.err(&format!(
                    "Permission denied for writing to {}",
                    path.display()
                ));
                None
            }
        }
    }
}
