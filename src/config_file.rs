//! Configuration file management
//!
//! This module handles loading and saving the application configuration file,
//! which holds the break timings, an optional quote file override and the
//! notification preference.

use crate::config::{is_valid_break_interval, is_valid_dismiss_delay};
use crate::constants::{
    BREAK_INTERVAL_DEFAULT_SECONDS, BREAK_INTERVAL_MAX_SECONDS, BREAK_INTERVAL_MIN_SECONDS,
    DISMISS_DELAY_DEFAULT_SECONDS, DISMISS_DELAY_MAX_SECONDS, DISMISS_DELAY_MIN_SECONDS,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn default_break_interval() -> u64 {
    BREAK_INTERVAL_DEFAULT_SECONDS
}

fn default_dismiss_delay() -> u64 {
    DISMISS_DELAY_DEFAULT_SECONDS
}

fn default_notifications() -> bool {
    true
}

/// Application configuration stored in config.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Time between breaks in seconds (default: 1200)
    #[serde(default = "default_break_interval")]
    pub break_interval_secs: u64,
    /// Seconds before a break can be dismissed (default: 30)
    #[serde(default = "default_dismiss_delay")]
    pub dismiss_delay_secs: u64,
    /// Quote file to use instead of the bundled quotes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quotes_path: Option<PathBuf>,
    /// Show desktop notifications for breaks (default: true)
    #[serde(default = "default_notifications")]
    pub notifications: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            break_interval_secs: default_break_interval(),
            dismiss_delay_secs: default_dismiss_delay(),
            quotes_path: None,
            notifications: default_notifications(),
        }
    }
}

impl Config {
    /// Get the standard config file path
    ///
    /// - macOS: `~/Library/Application Support/hindsight/config.toml`
    /// - Linux: `~/.config/hindsight/config.toml`
    /// - Windows: `%APPDATA%\hindsight\config.toml`
    ///
    /// Returns None if the platform has no config directory.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("hindsight").join("config.toml"))
    }

    /// Load config from standard location, using defaults if there is none
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from_path(&path),
            None => {
                log::warn!("No config directory on this platform. Using defaults.");
                Ok(Self::default())
            }
        }
    }

    /// Load config from a specific path
    ///
    /// A missing file is not an error and yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Failed to read file
    /// - TOML parsing fails
    /// - A timing value is out of range
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!(
                "No configuration file at {}. Using defaults.",
                path.display()
            );
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;
        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        log::info!("Configuration loaded from: {}", path.display());
        Ok(config)
    }

    /// Check that timing values are within the supported ranges
    pub fn validate(&self) -> Result<()> {
        if !is_valid_break_interval(self.break_interval_secs) {
            anyhow::bail!(
                "break_interval_secs = {} is out of range (must be {}-{} seconds)",
                self.break_interval_secs,
                BREAK_INTERVAL_MIN_SECONDS,
                BREAK_INTERVAL_MAX_SECONDS
            );
        }
        if !is_valid_dismiss_delay(self.dismiss_delay_secs) {
            anyhow::bail!(
                "dismiss_delay_secs = {} is out of range (must be {}-{} seconds)",
                self.dismiss_delay_secs,
                DISMISS_DELAY_MIN_SECONDS,
                DISMISS_DELAY_MAX_SECONDS
            );
        }
        Ok(())
    }

    /// Save config to standard location
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path().context("Failed to determine config directory")?;
        self.save_to_path(&path)?;
        Ok(path)
    }

    /// Save config to a specific path, creating parent directories
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        log::info!("Configuration saved to: {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config_path() -> PathBuf {
        // Unique per-test directory: timestamp + thread ID, so tests running
        // in parallel never share a file.
        use std::thread;
        use std::time::{SystemTime, UNIX_EPOCH};

        let mut base = std::env::temp_dir();
        base.push("hindsight_tests");
        base.push("config_file");

        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let tid = format!("{:?}", thread::current().id());
        base.push(format!("t_{nanos}_{tid}"));

        let _ = fs::create_dir_all(&base);

        base.join("config.toml")
    }

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let missing_path = Path::new("/tmp/hindsight_missing_config_test_config.toml");
        let _ = fs::remove_file(missing_path);

        let config = Config::load_from_path(missing_path).expect("Missing file should be fine");
        assert_eq!(config, Config::default());
        assert_eq!(config.break_interval_secs, 1200);
        assert_eq!(config.dismiss_delay_secs, 30);
        assert!(config.notifications);
    }

    #[test]
    fn test_config_save_load_roundtrip() {
        let temp_path = temp_config_path();
        let _ = fs::remove_file(&temp_path);

        let original_config = Config {
            break_interval_secs: 900,
            dismiss_delay_secs: 20,
            quotes_path: Some(PathBuf::from("/tmp/my_quotes.json")),
            notifications: false,
        };
        original_config
            .save_to_path(&temp_path)
            .expect("Failed to save temp config");

        let loaded_config = Config::load_from_path(&temp_path).expect("Failed to load temp config");
        assert_eq!(original_config, loaded_config);

        fs::remove_file(temp_path).ok();
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let temp_path = temp_config_path();
        fs::write(&temp_path, "dismiss_delay_secs = 45\n").expect("Failed to write temp config");

        let config = Config::load_from_path(&temp_path).expect("Failed to load temp config");
        assert_eq!(config.dismiss_delay_secs, 45);
        assert_eq!(config.break_interval_secs, 1200);
        assert!(config.quotes_path.is_none());
        assert!(config.notifications);

        fs::remove_file(temp_path).ok();
    }

    #[test]
    fn test_out_of_range_values_in_loaded_config() {
        let temp_path = temp_config_path();
        fs::write(&temp_path, "break_interval_secs = 5\n").expect("Failed to write temp config");

        let result = Config::load_from_path(&temp_path);
        assert!(result.is_err(), "Should reject a 5 second interval");
        if let Err(e) = result {
            let error_msg = format!("{:#}", e);
            assert!(
                error_msg.contains("break_interval_secs"),
                "Error should name the bad setting: {}",
                error_msg
            );
        }

        fs::write(&temp_path, "dismiss_delay_secs = 601\n").expect("Failed to write temp config");
        assert!(Config::load_from_path(&temp_path).is_err());

        fs::remove_file(temp_path).ok();
    }

    #[test]
    fn test_malformed_config_file() {
        let temp_path = temp_config_path();
        fs::write(&temp_path, "break_interval_secs = \"twenty\"\n")
            .expect("Failed to write temp config");

        let result = Config::load_from_path(&temp_path);
        assert!(result.is_err());
        if let Err(e) = result {
            assert!(format!("{}", e).contains("Failed to parse config file"));
        }

        fs::remove_file(temp_path).ok();
    }

    #[test]
    fn test_save_rejects_invalid_config() {
        let temp_path = temp_config_path();
        let config = Config {
            break_interval_secs: 0,
            ..Config::default()
        };

        assert!(config.save_to_path(&temp_path).is_err());
        assert!(!temp_path.exists(), "Nothing should be written");
    }
}
