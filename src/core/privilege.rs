//! Privilege detection for chronicle
//!
//! This module answers two questions about the current process:
//! whether it already runs as the superuser (root on Unix, Administrator on
//! Windows), and whether it could elevate through `sudo`. Both answers are
//! computed lazily and cached on the probe for its whole lifetime.

use std::process::{Command, Stdio};
use std::sync::OnceLock;

const VERSION: &str = "PrivilegeProbe v1.1.8";

/// Default command used to test for sudo access without doing anything.
const DEFAULT_ELEVATION_COMMAND: [&str; 3] = ["/bin/sh", "-c", "sudo true"];

const ELEVATION_NOTICE: &str = "The program is trying to use sudo command. \
It may or may not prompt you to enter password. We don't collect password here. \
Please verify source code to prevent password leak. \
If you are not sure, please press Ctrl-C to exit.";

/// Cached privilege information for the current process
#[derive(Debug)]
pub struct PrivilegeProbe {
    is_superuser: OnceLock<bool>,
    can_elevate: OnceLock<bool>,
    elevation_command: Vec<String>,
    interrupt_hook: bool,
}

impl Default for PrivilegeProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl PrivilegeProbe {
    /// Create a probe that inspects the real process on first use
    pub fn new() -> Self {
        Self {
            is_superuser: OnceLock::new(),
            can_elevate: OnceLock::new(),
            elevation_command: DEFAULT_ELEVATION_COMMAND
                .iter()
                .map(|s| s.to_string())
                .collect(),
            interrupt_hook: true,
        }
    }

    /// Create a probe with both answers already known.
    ///
    /// Nothing is executed and no interrupt handler is installed.
    pub fn fixed(is_superuser: bool, can_elevate: bool) -> Self {
        let probe = Self {
            interrupt_hook: false,
            ..Self::new()
        };
        let _ = probe.is_superuser.set(is_superuser);
        let _ = probe.can_elevate.set(can_elevate);
        probe
    }

    /// Replace the command run by [`has_elevation_access`](Self::has_elevation_access).
    ///
    /// The first element is the program, the rest its arguments.
    pub fn with_elevation_command<I, S>(mut self, command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.elevation_command = command.into_iter().map(Into::into).collect();
        self
    }

    /// Control whether the Ctrl-C handler is installed before probing
    pub fn with_interrupt_hook(mut self, enabled: bool) -> Self {
        self.interrupt_hook = enabled;
        self
    }

    pub fn version() -> &'static str {
        VERSION
    }

    /// Check if the effective user is the superuser.
    ///
    /// On Unix: euid == 0
    /// On Windows: running as Administrator
    pub fn is_superuser(&self) -> bool {
        *self.is_superuser.get_or_init(|| {
            #[cfg(unix)]
            {
                unsafe { libc::geteuid() == 0 }
            }

            #[cfg(windows)]
            {
                is_elevated::is_elevated()
            }

            #[cfg(not(any(unix, windows)))]
            {
                false
            }
        })
    }

    /// Check if the user can run commands through sudo.
    ///
    /// May prompt for a password on the terminal. The password goes straight to
    /// sudo; only the outcome is observed here. Spawn failures count as "no".
    pub fn has_elevation_access(&self) -> bool {
        *self.can_elevate.get_or_init(|| {
            if self.interrupt_hook {
                install_interrupt_hook();
            }
            println!("{}", ELEVATION_NOTICE);
            run_elevation_probe(&self.elevation_command)
        })
    }

    /// Superuser, or able to become one
    pub fn is_privileged(&self) -> bool {
        self.is_superuser() || self.has_elevation_access()
    }

    /// Command prefix needed to run something with privileges
    pub fn elevation_prefix(&self) -> Vec<&'static str> {
        if self.is_privileged() {
            vec!["sudo"]
        } else {
            Vec::new()
        }
    }
}

fn run_elevation_probe(command: &[String]) -> bool {
    let Some((program, args)) = command.split_first() else {
        return false;
    };

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output();

    match output {
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            log::debug!("Elevation probe stderr: {:?}", stderr.trim());
            stderr.trim().is_empty()
        }
        Err(e) => {
            log::debug!("Elevation probe could not start {}: {}", program, e);
            false
        }
    }
}

/// Install the Ctrl-C handler used while a sudo prompt may be waiting.
///
/// The OS handler is process-wide, so this happens at most once no matter how
/// many probes exist.
fn install_interrupt_hook() -> bool {
    static INSTALLED: OnceLock<bool> = OnceLock::new();
    *INSTALLED.get_or_init(|| {
        let result = ctrlc::set_handler(|| {
            println!("\nYou pressed Ctrl + c!\n");
            std::process::exit(130);
        });
        if let Err(e) = &result {
            log::warn!("Failed to install interrupt handler: {}", e);
        }
        result.is_ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_superuser_is_cached() {
        let probe = PrivilegeProbe::new();
        let results: Vec<bool> = (0..10).map(|_| probe.is_superuser()).collect();
        assert!(
            results.iter().all(|&r| r == results[0]),
            "is_superuser should return consistent results"
        );
    }

    #[test]
    fn test_fixed_probe() {
        let probe = PrivilegeProbe::fixed(false, true);
        assert!(!probe.is_superuser());
        assert!(probe.has_elevation_access());
        assert!(probe.is_privileged());
        assert_eq!(probe.elevation_prefix(), vec!["sudo"]);

        let probe = PrivilegeProbe::fixed(false, false);
        assert!(!probe.is_privileged());
        assert!(probe.elevation_prefix().is_empty());
    }

    #[test]
    fn test_superuser_skips_elevation_probe() {
        let probe = PrivilegeProbe::new()
            .with_interrupt_hook(false)
            .with_elevation_command(["/nonexistent/elevate"]);
        let _ = probe.is_superuser.set(true);
        assert!(probe.is_privileged());
        assert!(probe.can_elevate.get().is_none());
    }

    #[test]
    fn test_spawn_failure_means_no_access() {
        let probe = PrivilegeProbe::new()
            .with_interrupt_hook(false)
            .with_elevation_command(["/nonexistent/elevate"]);
        assert!(!probe.has_elevation_access());
    }

    #[test]
    fn test_empty_command_means_no_access() {
        let probe = PrivilegeProbe::new()
            .with_interrupt_hook(false)
            .with_elevation_command(Vec::<String>::new());
        assert!(!probe.has_elevation_access());
    }

    #[test]
    #[cfg(unix)]
    fn test_stderr_output_means_no_access() {
        let probe = PrivilegeProbe::new()
            .with_interrupt_hook(false)
            .with_elevation_command(["/bin/sh", "-c", "echo 'not allowed' >&2"]);
        assert!(!probe.has_elevation_access());
    }

    #[test]
    #[cfg(unix)]
    fn test_silent_success_means_access_and_is_cached() {
        let dir = tempfile::TempDir::new().unwrap();
        let marker = dir.path().join("ran");
        let script = format!("echo x >> '{}'", marker.display());
        let probe = PrivilegeProbe::new()
            .with_interrupt_hook(false)
            .with_elevation_command(["/bin/sh".to_string(), "-c".to_string(), script]);

        assert!(probe.has_elevation_access());
        assert!(probe.has_elevation_access());
        let runs = std::fs::read_to_string(&marker).unwrap();
        assert_eq!(runs.lines().count(), 1, "probe must run only once");
    }
}
