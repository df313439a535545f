//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading settings
//! from a YAML file.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::AppConfig;

/// Loads and provides access to application settings.
///
/// # Example
///
/// ```no_run
/// use tip_split::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/tip_split.yaml")?;
/// println!("Snapshots go to {}", loader.config().storage_dir.display());
/// # Ok::<(), tip_split::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Loads settings from the YAML file at `path`.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file is missing or unreadable (`ConfigNotFound`)
    /// - The file is not valid YAML for [`AppConfig`] (`ConfigParseError`)
    /// - A setting is out of range (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config = Self::parse(&path_str, &content)?;
        info!(
            path = %path_str,
            storage_dir = %config.storage_dir.display(),
            notification_delay_ms = config.notification_delay_ms,
            "Loaded configuration"
        );
        Ok(Self { config })
    }

    /// Wraps settings that were built in code.
    pub fn from_config(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the loaded settings.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn parse(path: &str, content: &str) -> EngineResult<AppConfig> {
        let config: AppConfig =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        if config.storage_key.trim().is_empty() {
            return Err(EngineError::ConfigParseError {
                path: path.to_string(),
                message: "storage_key must not be empty".to_string(),
            });
        }
        if config.notification_delay_ms == 0 {
            return Err(EngineError::ConfigParseError {
                path: path.to_string(),
                message: "notification_delay_ms must be greater than 0".to_string(),
            });
        }

        Ok(config)
    }
}
