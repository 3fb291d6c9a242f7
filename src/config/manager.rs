//! Configuration manager for loading and saving application configuration
//!
//! This module provides functionality to load and save configuration to
//! `<config dir>/WebMirror/config.json` with atomic writes to prevent corruption.

use crate::config::models::AppConfig;
use crate::error::{Result, StringError, WebMirrorError};
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};

/// Environment variable overriding the application data directory
pub const CONFIG_DIR_ENV: &str = "WEBMIRROR_CONFIG_DIR";

/// Configuration manager
pub struct ConfigManager;

impl ConfigManager {
    /// Get the application data directory
    ///
    /// Returns `$WEBMIRROR_CONFIG_DIR` when set, otherwise `<config dir>/WebMirror`.
    pub fn get_app_dir() -> PathBuf {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return PathBuf::from(dir);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("WebMirror")
    }

    /// Get the path to the configuration file
    pub fn get_config_path() -> PathBuf {
        Self::get_app_dir().join("config.json")
    }

    /// Ensure the configuration directory exists
    pub fn ensure_config_dir() -> Result<PathBuf> {
        let config_path = Self::get_config_path();
        let config_dir = config_path.parent().ok_or_else(|| {
            WebMirrorError::ConfigError(StringError::new("Invalid config path"))
        })?;

        std::fs::create_dir_all(config_dir)?;
        Ok(config_dir.to_path_buf())
    }

    /// Load configuration from disk
    ///
    /// If the configuration file doesn't exist or is corrupt, returns default configuration.
    pub fn load() -> Result<AppConfig> {
        let config_path = Self::get_config_path();

        if !config_path.exists() {
            info!("Configuration file not found, using defaults");
            return Ok(AppConfig::default());
        }

        let bytes = std::fs::read(&config_path)?;

        match serde_json::from_slice::<AppConfig>(&bytes) {
            Ok(mut config) => {
                if config.sanitize() {
                    warn!("Configuration contained invalid values, replaced with defaults");
                }
                info!("Configuration loaded successfully");
                Ok(config)
            }
            Err(e) => {
                warn!("Failed to parse configuration, using defaults: {}", e);
                Ok(AppConfig::default())
            }
        }
    }

    /// Save configuration to disk with atomic write
    ///
    /// Writes a temporary file in the same directory and persists it over the target.
    pub fn save(config: &AppConfig) -> Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = Self::get_config_path();

        let json = serde_json::to_string_pretty(config)?;
        let mut temp_file = tempfile::NamedTempFile::new_in(&config_dir)?;
        temp_file.write_all(json.as_bytes())?;
        temp_file.as_file().sync_all()?;
        temp_file
            .persist(&config_path)
            .map_err(|e| WebMirrorError::IoError(e.error))?;

        info!("Configuration saved successfully");
        Ok(())
    }
}
