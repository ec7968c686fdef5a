//! Console mirroring for log lines and logger reports

use std::sync::{Arc, Mutex};

/// Where the logger echoes lines and reports problems
pub trait Console: Send {
    /// Write one line to standard output
    fn out(&mut self, line: &str);
    /// Write one line to standard error
    fn err(&mut self, line: &str);
}

/// The process's real stdout and stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn out(&mut self, line: &str) {
        println!("{}", line);
    }

    fn err(&mut self, line: &str) {
        eprintln!("{}", line);
    }
}

/// Lines captured by a [`MemoryConsole`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captured {
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
}

/// An in-memory console. Clones share the same buffers.
#[derive(Debug, Clone, Default)]
pub struct MemoryConsole {
    captured: Arc<Mutex<Captured>>,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything written so far
    pub fn captured(&self) -> Captured {
        self.captured
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }

    pub fn stdout(&self) -> Vec<String> {
        self.captured().stdout
    }

    pub fn stderr(&self) -> Vec<String> {
        self.captured().stderr
    }

    pub fn clear(&self) {
        if let Ok(mut c) = self.captured.lock() {
            *c = Captured::default();
        }
    }
}

impl Console for MemoryConsole {
    fn out(&mut self, line: &str) {
        if let Ok(mut c) = self.captured.lock() {
            c.stdout.push(line.to_string());
        }
    }

    fn err(&mut self, line: &str) {
        if let Ok(mut c) = self.captured.lock() {
            c.stderr.push(line.to_string());
        }
    }
}
