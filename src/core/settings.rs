//! Logger settings management
//!
//! This module handles persistent logger configuration stored in config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Days after which a dated log file is archived
pub const DEFAULT_ARCHIVE_DAYS: u32 = 7;

/// Days after which a dated log file is deleted
pub const DEFAULT_REMOVAL_DAYS: u32 = 30;

/// Age thresholds applied during rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Retention {
    /// Files strictly older than this many days are compressed
    pub archive_days: u32,
    /// Files strictly older than this many days are removed
    pub removal_days: u32,
}

impl Default for Retention {
    fn default() -> Self {
        Self {
            archive_days: DEFAULT_ARCHIVE_DAYS,
            removal_days: DEFAULT_REMOVAL_DAYS,
        }
    }
}

/// Settings stored in config.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Normalize camel-case log names into hyphenated lower-case slugs
    pub slugify: bool,

    /// Force debug headers on or off
    ///
    /// When unset, the `DEBUG` / `debug` environment variables decide.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,

    pub retention: Retention,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            slugify: true,
            debug: None,
            retention: Retention::default(),
        }
    }
}

impl Settings {
    /// Load settings from config.toml
    ///
    /// Returns default settings if the file doesn't exist.
    pub fn load(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let settings: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to config.toml
    pub fn save(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content =
            toml::to_string_pretty(self).context("Failed to serialize settings to TOML")?;

        fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))
    }

    /// Validate settings
    ///
    /// Archiving must kick in before removal, otherwise nothing is ever archived.
    pub fn validate(&self) -> Result<()> {
        let Retention {
            archive_days,
            removal_days,
        } = self.retention;

        if archive_days >= removal_days {
            anyhow::bail!(
                "archive_days ({}) must be smaller than removal_days ({})",
                archive_days,
                removal_days
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.slugify);
        assert!(settings.debug.is_none());
        assert_eq!(settings.retention.archive_days, 7);
        assert_eq!(settings.retention.removal_days, 30);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let settings = Settings {
            slugify: false,
            debug: Some(true),
            retention: Retention {
                archive_days: 3,
                removal_days: 10,
            },
        };

        settings.save(&config_path).unwrap();
        let loaded = Settings::load(&config_path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.toml");

        let settings = Settings::load(&config_path).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[retention]\narchive_days = 2\n").unwrap();

        let settings = Settings::load(&config_path).unwrap();
        assert!(settings.slugify);
        assert_eq!(settings.retention.archive_days, 2);
        assert_eq!(settings.retention.removal_days, DEFAULT_REMOVAL_DAYS);
    }

    #[test]
    fn test_load_rejects_inverted_thresholds() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(
            &config_path,
            "[retention]\narchive_days = 30\nremoval_days = 7\n",
        )
        .unwrap();

        assert!(Settings::load(&config_path).is_err());
    }

    #[test]
    fn test_load_rejects_garbage() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "slugify = \"maybe\"").unwrap();

        assert!(Settings::load(&config_path).is_err());
    }
}
