//! Persistence of cursor settings.
//!
//! Settings are stored as JSON strings in eframe's key/value storage, so a
//! native host gets them persisted alongside its other app state. Anything
//! missing or unreadable falls back to defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::config::CursorConfig;

/// Storage key of the cursor configuration.
pub const CURSOR_CONFIG_KEY: &str = "cursor_config";

/// Coordinates loading and saving of cursor settings.
pub struct SettingsCoordinator;

impl SettingsCoordinator {
    /// Reads and deserializes a setting.
    ///
    /// # Returns
    /// `Ok(None)` if the key is absent, an error if the stored JSON is invalid
    pub fn read_setting<T>(storage: &dyn eframe::Storage, key: &str) -> Result<Option<T>>
    where
        T: for<'de> Deserialize<'de>,
    {
        let Some(json_str) = storage.get_string(key) else {
            return Ok(None);
        };
        let value = serde_json::from_str(&json_str)
            .with_context(|| format!("Stored setting '{key}' is not valid JSON for its type"))?;
        Ok(Some(value))
    }

    /// Serializes and saves a setting, flushing the storage.
    pub fn save_setting<T>(storage: &mut dyn eframe::Storage, key: &str, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        let json_str = serde_json::to_string(value)
            .with_context(|| format!("Failed to serialize setting '{key}'"))?;
        storage.set_string(key, json_str);
        storage.flush();
        Ok(())
    }

    /// Loads the cursor configuration.
    ///
    /// Falls back to the default configuration when there is no storage, no
    /// stored value, unreadable JSON or a value that fails validation.
    pub fn load_config(storage: Option<&dyn eframe::Storage>) -> CursorConfig {
        let Some(storage) = storage else {
            return CursorConfig::default();
        };
        match Self::read_setting::<CursorConfig>(storage, CURSOR_CONFIG_KEY) {
            Ok(Some(config)) => match config.validate() {
                Ok(()) => config,
                Err(err) => {
                    tracing::warn!(%err, "ignoring stored cursor configuration");
                    CursorConfig::default()
                }
            },
            Ok(None) => CursorConfig::default(),
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "ignoring stored cursor configuration");
                CursorConfig::default()
            }
        }
    }

    /// Validates and persists the cursor configuration.
    pub fn save_config(storage: &mut dyn eframe::Storage, config: &CursorConfig) -> Result<()> {
        config.validate().context("Refusing to persist cursor configuration")?;
        Self::save_setting(storage, CURSOR_CONFIG_KEY, config)
    }
}
