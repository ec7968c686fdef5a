//! Core modules for chronicle

pub mod paths;
pub mod privilege;
pub mod settings;

// Re-export commonly used items
pub use paths::LogPaths;
pub use privilege::PrivilegeProbe;
pub use settings::{Retention, Settings};
