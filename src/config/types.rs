//! Configuration types for the tip split engine.
//!
//! This module contains the strongly-typed settings deserialized from the
//! YAML configuration file. Every field has a default, so a partial file is
//! valid.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::notification::DEFAULT_NOTIFICATION_DELAY;
use crate::persistence::DEFAULT_STORAGE_KEY;

/// Application settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// How long a status message stays visible, in milliseconds.
    pub notification_delay_ms: u64,
    /// Directory the file-backed store writes snapshots to.
    pub storage_dir: PathBuf,
    /// Key the area snapshot is stored under.
    pub storage_key: String,
}

impl AppConfig {
    /// The notification expiry delay.
    pub fn notification_delay(&self) -> Duration {
        Duration::from_millis(self.notification_delay_ms)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            notification_delay_ms: DEFAULT_NOTIFICATION_DELAY.as_millis() as u64,
            storage_dir: PathBuf::from("data"),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}
