//! Configuration management for MOTORDASH.
//!
//! Loads the dashboard configuration from `~/.motordash/config.yaml`.
//! A missing file is not an error - every field has a sensible default so
//! the dashboard starts cold out of the box.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DashError, Result};
use crate::logging::motordash_home;

/// Default time an alert toast stays fully visible before auto-dismissal (ms).
pub const DEFAULT_DWELL_MS: u64 = 5000;

/// Default duration of the toast exit-animation phase (ms).
pub const DEFAULT_COLLAPSE_MS: u64 = 300;

/// Default telemetry poll interval (ms).
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 250;

/// Dashboard configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    /// Machine the dashboard monitors
    pub machine_id: String,
    /// Time an alert toast stays fully visible before auto-dismissal (ms)
    pub dwell_ms: u64,
    /// Duration of the toast exit-animation phase (ms)
    pub collapse_ms: u64,
    /// Telemetry poll interval (ms)
    pub poll_interval_ms: u64,
    /// Theme name ("default", "dark", "light")
    pub theme: String,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            machine_id: "MOTOR-001".to_string(),
            dwell_ms: DEFAULT_DWELL_MS,
            collapse_ms: DEFAULT_COLLAPSE_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            theme: "default".to_string(),
        }
    }
}

impl DashConfig {
    /// Default configuration file path: `~/.motordash/config.yaml`.
    pub fn default_path() -> Result<PathBuf> {
        Ok(motordash_home()?.join("config.yaml"))
    }

    /// Load configuration from the default path.
    ///
    /// A missing file yields the default configuration.
    pub fn load_default() -> Result<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    /// Load configuration from a specific file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| DashError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: DashConfig =
            serde_yaml::from_str(&contents).map_err(|e| DashError::ConfigInvalid {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        config.validate()?;
        tracing::info!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.machine_id.trim().is_empty() {
            return Err(DashError::config_validation("machine_id must not be empty"));
        }
        if self.dwell_ms == 0 {
            return Err(DashError::config_validation("dwell_ms must be non-zero"));
        }
        if self.collapse_ms == 0 {
            return Err(DashError::config_validation("collapse_ms must be non-zero"));
        }
        if self.poll_interval_ms == 0 {
            return Err(DashError::config_validation(
                "poll_interval_ms must be non-zero",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = DashConfig::default();
        assert_eq!(config.dwell_ms, 5000);
        assert_eq!(config.collapse_ms, 300);
        assert_eq!(config.machine_id, "MOTOR-001");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "dwell_ms: 2000").unwrap();
        writeln!(file, "theme: dark").unwrap();

        let config = DashConfig::load(&path).unwrap();
        assert_eq!(config.dwell_ms, 2000);
        assert_eq!(config.theme, "dark");
        // Unspecified fields fall back to defaults
        assert_eq!(config.collapse_ms, 300);
        assert_eq!(config.machine_id, "MOTOR-001");
    }

    #[test]
    fn test_load_invalid_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "dwell_ms: [not a number").unwrap();

        let err = DashConfig::load(&path).unwrap_err();
        assert!(matches!(err, DashError::ConfigInvalid { .. }));
    }

    #[test]
    fn test_validate_rejects_zero_durations() {
        let config = DashConfig {
            dwell_ms: 0,
            ..DashConfig::default()
        };
        assert!(config.validate().is_err());

        let config = DashConfig {
            collapse_ms: 0,
            ..DashConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_machine_id() {
        let config = DashConfig {
            machine_id: "  ".to_string(),
            ..DashConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        let err = DashConfig::load(&path).unwrap_err();
        assert!(matches!(err, DashError::ConfigRead { .. }));
    }
}
