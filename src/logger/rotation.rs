//! Archive and purge passes over a log directory
//!
//! Every `.log` file whose name ends in `-<YYYYMMDD>.log` takes part, whatever
//! stream wrote it. Anything else in the directory, archives included, is left
//! alone.

use crate::core::paths::{archive_path_for, parse_log_date, LOG_SUFFIX};
use crate::core::settings::Retention;
use crate::error::LoggerError;
use crate::logger::console::Console;
use chrono::NaiveDate;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// What a rotation pass did
#[derive(Debug, Default)]
pub struct RotationReport {
    /// Archives written (the originals are gone)
    pub archived: Vec<PathBuf>,
    /// Log files deleted outright
    pub purged: Vec<PathBuf>,
    /// `.log` files with no parseable `-<YYYYMMDD>` date
    pub skipped: Vec<PathBuf>,
    /// Files that could not be archived or removed
    pub failures: Vec<(PathBuf, LoggerError)>,
}

impl RotationReport {
    /// True when nothing was changed on disk
    pub fn is_noop(&self) -> bool {
        self.archived.is_empty() && self.purged.is_empty()
    }
}

/// Archive, then purge, the dated logs in `log_dir`
///
/// Ages are whole days between the file's date and `today`. A file past the
/// removal threshold is not archived first, so it disappears completely in the
/// purge pass.
pub fn rotate(
    log_dir: &Path,
    today: NaiveDate,
    retention: Retention,
    console: &mut dyn Console,
) -> RotationReport {
    let mut report = RotationReport::default();

    if is_missing_or_empty(log_dir) {
        console.err(&format!(
            "No log files to rotate in directory: {}",
            log_dir.display()
        ));
        return report;
    }

    archive_old_logs(log_dir, today, retention, console, &mut report);
    remove_old_logs(log_dir, today, retention, console, &mut report);

    log::debug!(
        "Rotation in {}: {} archived, {} purged, {} skipped, {} failed",
        log_dir.display(),
        report.archived.len(),
        report.purged.len(),
        report.skipped.len(),
        report.failures.len()
    );

    report
}

fn is_missing_or_empty(dir: &Path) -> bool {
    match fs::read_dir(dir) {
        Ok(mut entries) => entries.next().is_none(),
        Err(_) => true,
    }
}

fn archive_old_logs(
    log_dir: &Path,
    today: NaiveDate,
    retention: Retention,
    console: &mut dyn Console,
    report: &mut RotationReport,
) {
    let logs = match dated_logs(log_dir, report) {
        Ok(logs) => logs,
        Err(e) => {
            console.err(&format!("Error accessing log files for archiving: {}", e));
            return;
        }
    };

    for (path, date) in logs {
        let age = (today - date).num_days();
        if age <= i64::from(retention.archive_days) || age > i64::from(retention.removal_days) {
            continue;
        }

        match archive_log(&path) {
            Ok(archive) => {
                console.out(&format!("Archived log file: {}", archive.display()));
                report.archived.push(archive);
            }
            Err(e) => {
                console.err(&format!(
                    "Error archiving log file {}: {}",
                    file_name_of(&path),
                    e
                ));
                report.failures.push((path, e));
            }
        }
    }
}

fn remove_old_logs(
    log_dir: &Path,
    today: NaiveDate,
    retention: Retention,
    console: &mut dyn Console,
    report: &mut RotationReport,
) {
    // Skipped files were already recorded by the archive pass.
    let mut scratch = RotationReport::default();
    let logs = match dated_logs(log_dir, &mut scratch) {
        Ok(logs) => logs,
        Err(e) => {
            console.err(&format!("Error accessing log files for removal: {}", e));
            return;
        }
    };

    for (path, date) in logs {
        if (today - date).num_days() <= i64::from(retention.removal_days) {
            continue;
        }

        match fs::remove_file(&path) {
            Ok(()) => {
                console.out(&format!("Removed old log file: {}", file_name_of(&path)));
                report.purged.push(path);
            }
            Err(e) => {
                console.err(&format!(
                    "Error removing log file {}: {}",
                    file_name_of(&path),
                    e
                ));
                report.failures.push((path.clone(), LoggerError::io(path, e)));
            }
        }
    }
}

/// List `.log` files with their embedded dates
///
/// Malformed names are recorded in `report.skipped`.
fn dated_logs(
    log_dir: &Path,
    report: &mut RotationReport,
) -> Result<Vec<(PathBuf, NaiveDate)>, LoggerError> {
    let mut logs = Vec::new();

    for entry in fs::read_dir(log_dir).map_err(|e| LoggerError::io(log_dir, e))? {
        let entry = entry.map_err(|e| LoggerError::io(log_dir, e))?;
        let path = entry.path();

        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !file_name.ends_with(LOG_SUFFIX) || !path.is_file() {
            continue;
        }

        match parse_log_date(file_name) {
            Ok(date) => logs.push((path, date)),
            Err(e) => {
                log::debug!("Skipping {}: {}", path.display(), e);
                report.skipped.push(path);
            }
        }
    }

    logs.sort();
    Ok(logs)
}

/// Compress `log_file` into a single-entry `.tar.gz` beside it, then delete it
///
/// On failure the partial archive is removed and the original is kept.
pub fn archive_log(log_file: &Path) -> Result<PathBuf, LoggerError> {
    let archive = archive_path_for(log_file);

    if let Err(e) = write_archive(log_file, &archive) {
        let _ = fs::remove_file(&archive);
        return Err(LoggerError::io(&archive, e));
    }

    fs::remove_file(log_file).map_err(|e| LoggerError::io(log_file, e))?;
    Ok(archive)
}

fn write_archive(log_file: &Path, archive: &Path) -> std::io::Result<()> {
    let entry_name = file_name_of(log_file);

    let file = File::create(archive)?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = tar::Builder::new(encoder);
    builder.append_path_with_name(log_file, &entry_name)?;

    let encoder = builder.into_inner()?;
    encoder.finish()?.sync_all()
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::paths::log_file_name;
    use crate::logger::console::MemoryConsole;
    use chrono::Duration;
    use flate2::read::GzDecoder;
    use std::io::Read;
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()
    }

    fn write_log(dir: &Path, name: &str, days_ago: i64, content: &str) -> PathBuf {
        let path = dir.join(log_file_name(name, today() - Duration::days(days_ago)));
        fs::write(&path, content).unwrap();
        path
    }

    fn read_single_entry(archive: &Path) -> (String, Vec<u8>) {
        let file = File::open(archive).unwrap();
        let mut tar = tar::Archive::new(GzDecoder::new(file));
        let mut entries = tar.entries().unwrap();
        let mut entry = entries.next().unwrap().unwrap();
        let name = entry.path().unwrap().to_string_lossy().to_string();
        let mut content = Vec::new();
        entry.read_to_end(&mut content).unwrap();
        assert!(entries.next().is_none(), "archive must hold one entry");
        (name, content)
    }

    #[test]
    fn test_rotate_missing_dir_reports() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");
        let mut console = MemoryConsole::new();

        let report = rotate(&missing, today(), Retention::default(), &mut console);

        assert!(report.is_noop());
        assert_eq!(console.stderr().len(), 1);
        assert!(console.stderr()[0].starts_with("No log files to rotate in directory:"));
    }

    #[test]
    fn test_rotate_empty_dir_reports() {
        let temp_dir = TempDir::new().unwrap();
        let mut console = MemoryConsole::new();

        let report = rotate(temp_dir.path(), today(), Retention::default(), &mut console);

        assert!(report.is_noop());
        assert!(console.stderr()[0].contains(&temp_dir.path().display().to_string()));
    }

    #[test]
    fn test_archives_week_old_log() {
        let temp_dir = TempDir::new().unwrap();
        let content = "[2024-03-23 10:00:00] pid:1 [INFO] :] old line\n";
        let old = write_log(temp_dir.path(), "svc", 8, content);
        let mut console = MemoryConsole::new();

        let report = rotate(temp_dir.path(), today(), Retention::default(), &mut console);

        let archive = temp_dir.path().join("svc-20240323.tar.gz");
        assert_eq!(report.archived, vec![archive.clone()]);
        assert!(!old.exists());
        assert!(archive.exists());

        let (entry_name, bytes) = read_single_entry(&archive);
        assert_eq!(entry_name, "svc-20240323.log");
        assert_eq!(bytes, content.as_bytes());
        assert_eq!(
            console.stdout(),
            vec![format!("Archived log file: {}", archive.display())]
        );
    }

    #[test]
    fn test_keeps_recent_logs() {
        let temp_dir = TempDir::new().unwrap();
        let today_log = write_log(temp_dir.path(), "svc", 0, "today\n");
        let boundary = write_log(temp_dir.path(), "svc", 7, "exactly a week\n");
        let mut console = MemoryConsole::new();

        let report = rotate(temp_dir.path(), today(), Retention::default(), &mut console);

        assert!(report.is_noop());
        assert!(today_log.exists());
        assert!(boundary.exists());
    }

    #[test]
    fn test_purges_month_old_log_without_archiving() {
        let temp_dir = TempDir::new().unwrap();
        let ancient = write_log(temp_dir.path(), "svc", 31, "ancient\n");
        let mut console = MemoryConsole::new();

        let report = rotate(temp_dir.path(), today(), Retention::default(), &mut console);

        assert!(report.archived.is_empty());
        assert_eq!(report.purged, vec![ancient.clone()]);
        assert!(!ancient.exists());
        assert!(!temp_dir.path().join("svc-20240229.tar.gz").exists());
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_leaves_undated_files() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        let malformed = dir.join("svc-notes.log");
        fs::write(&malformed, "notes\n").unwrap();
        let bad_date = dir.join("svc-20241399.log");
        fs::write(&bad_date, "bad\n").unwrap();
        let no_hyphen = dir.join("20200101.log");
        fs::write(&no_hyphen, "bare\n").unwrap();
        let text = dir.join("svc-20200101.txt");
        fs::write(&text, "text\n").unwrap();
        let mut console = MemoryConsole::new();

        let report = rotate(dir, today(), Retention::default(), &mut console);

        assert!(report.is_noop());
        assert_eq!(report.skipped.len(), 3);
        for path in [&malformed, &bad_date, &no_hyphen, &text] {
            assert!(path.exists(), "{} should be untouched", path.display());
        }
        assert!(console.stderr().is_empty());
    }

    #[test]
    fn test_other_streams_are_maintained_too() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        let other = write_log(dir, "other", 59, "other stream\n");
        let extra = write_log(dir, "svc-extra", 11, "multi hyphen\n");
        let mut console = MemoryConsole::new();

        let report = rotate(dir, today(), Retention::default(), &mut console);

        assert_eq!(report.purged, vec![other.clone()]);
        assert_eq!(
            report.archived,
            vec![dir.join("svc-extra-20240320.tar.gz")]
        );
        assert!(!other.exists());
        assert!(!extra.exists());
        assert!(report.skipped.is_empty());

        let (entry_name, bytes) = read_single_entry(&dir.join("svc-extra-20240320.tar.gz"));
        assert_eq!(entry_name, "svc-extra-20240320.log");
        assert_eq!(bytes, b"multi hyphen\n");
    }

    #[test]
    fn test_custom_retention() {
        let temp_dir = TempDir::new().unwrap();
        let archived = write_log(temp_dir.path(), "svc", 2, "a\n");
        let purged = write_log(temp_dir.path(), "svc", 6, "b\n");
        let retention = Retention {
            archive_days: 1,
            removal_days: 5,
        };
        let mut console = MemoryConsole::new();

        let report = rotate(temp_dir.path(), today(), retention, &mut console);

        assert_eq!(report.archived.len(), 1);
        assert_eq!(report.purged, vec![purged.clone()]);
        assert!(!archived.exists());
        assert!(!purged.exists());
    }

    #[test]
    #[cfg(unix)]
    fn test_archive_failure_keeps_original_and_continues() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let unreadable = write_log(temp_dir.path(), "svc", 9, "secret\n");
        let readable = write_log(temp_dir.path(), "svc", 10, "fine\n");
        fs::set_permissions(&unreadable, fs::Permissions::from_mode(0o000)).unwrap();

        // root can read anything; nothing to test then
        if File::open(&unreadable).is_ok() {
            return;
        }

        let mut console = MemoryConsole::new();
        let report = rotate(temp_dir.path(), today(), Retention::default(), &mut console);

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, unreadable);
        assert!(unreadable.exists());
        assert!(!temp_dir.path().join("svc-20240322.tar.gz").exists());
        assert!(!readable.exists());
        assert_eq!(report.archived.len(), 1);
        assert!(console.stderr()[0].starts_with("Error archiving log file svc-20240322.log"));
    }
}
