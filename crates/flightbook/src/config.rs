//! Configuration management for flightbook.
//!
//! This module provides configuration loading and validation using figment,
//! supporting a TOML config file, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory name used under the platform config and data directories.
const APP_DIR_NAME: &str = "flightbook";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "FLIGHTBOOK_";

/// Shortest booking id that may be configured.
pub const MIN_ID_LENGTH: usize = 4;

/// Longest booking id that may be configured (a full simple UUID).
pub const MAX_ID_LENGTH: usize = 32;

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `FLIGHTBOOK_`, `__` between sections)
/// 2. TOML config file at `~/.config/flightbook/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Booking configuration.
    pub booking: BookingConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding `flights.json` and `bookings.json`.
    /// Defaults to `~/.local/share/flightbook`
    pub data_dir: Option<PathBuf>,
    /// Indent snapshot files for readability.
    pub pretty: bool,
}

/// Booking-related configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    /// Number of hex characters in generated booking ids.
    pub id_length: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None, // Resolved at runtime
            pretty: true,
        }
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self { id_length: 8 }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// A missing config file is not an error; defaults and environment
    /// variables still apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(APP_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let len = self.booking.id_length;
        if !(MIN_ID_LENGTH..=MAX_ID_LENGTH).contains(&len) {
            return Err(Error::ConfigValidation {
                message: format!(
                    "booking.id_length must be between {MIN_ID_LENGTH} and {MAX_ID_LENGTH}, got {len}"
                ),
            });
        }

        if let Some(dir) = &self.storage.data_dir {
            if dir.as_os_str().is_empty() {
                return Err(Error::ConfigValidation {
                    message: "storage.data_dir must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Get the data directory, resolving defaults if not set.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .unwrap_or_else(Self::default_data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.storage.data_dir.is_none());
        assert!(config.storage.pretty);
        assert_eq!(config.booking.id_length, 8);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_id_length_bounds() {
        let mut config = Config::default();

        config.booking.id_length = MIN_ID_LENGTH;
        assert!(config.validate().is_ok());
        config.booking.id_length = MAX_ID_LENGTH;
        assert!(config.validate().is_ok());

        config.booking.id_length = 3;
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("id_length"));

        config.booking.id_length = 33;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_data_dir() {
        let mut config = Config::default();
        config.storage.data_dir = Some(PathBuf::new());

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("data_dir"));
    }

    #[test]
    fn test_data_dir_default() {
        let config = Config::default();
        assert!(config.data_dir().to_string_lossy().contains("flightbook"));
    }

    #[test]
    fn test_data_dir_custom() {
        let mut config = Config::default();
        config.storage.data_dir = Some(PathBuf::from("/srv/flights"));
        assert_eq!(config.data_dir(), PathBuf::from("/srv/flights"));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("flightbook"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let result = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")));
        assert!(result.is_ok());
        assert_eq!(result.unwrap().booking.id_length, 8);
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[storage]\ndata_dir = \"/tmp/fb-data\"\npretty = false\n\n[booking]\nid_length = 12\n",
        )
        .unwrap();

        let config = Config::load_from(Some(path)).unwrap();
        assert_eq!(config.storage.data_dir, Some(PathBuf::from("/tmp/fb-data")));
        assert!(!config.storage.pretty);
        assert_eq!(config.booking.id_length, 12);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[booking]\nid_length = 1\n").unwrap();

        let err = Config::load_from(Some(path)).unwrap_err();
        assert!(matches!(err, Error::ConfigValidation { .. }));
    }

    #[test]
    fn test_load_rejects_wrong_types() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[booking]\nid_length = \"long\"\n").unwrap();

        let err = Config::load_from(Some(path)).unwrap_err();
        assert!(matches!(err, Error::ConfigLoad(_)));
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("id_length"));
        assert!(json.contains("pretty"));
    }

    #[test]
    fn test_storage_config_deserialize_partial() {
        let storage: StorageConfig = serde_json::from_str(r#"{"pretty": false}"#).unwrap();
        assert!(!storage.pretty);
        assert!(storage.data_dir.is_none());
    }
}
