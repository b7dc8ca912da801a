//! Configuration file support for Hero Exercises.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/hero/config.toml`.
//! Every section is optional.

use crate::store::{JsonFileStore, DEFAULT_STORAGE_KEY};
use crate::{CalendarYear, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub calendar: CalendarConfig,

    #[serde(default)]
    pub share: ShareConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Name of the stored blob (file stem in `data_dir`)
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            storage_key: default_storage_key(),
        }
    }
}

/// Which year the calendar covers
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default = "default_year")]
    pub year: i32,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            year: default_year(),
        }
    }
}

/// Share message configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShareConfig {
    #[serde(default = "default_app_name")]
    pub app_name: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("hero")
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.into()
}

fn default_year() -> i32 {
    2026
}

fn default_app_name() -> String {
    "Evan's Exercises".into()
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("hero").join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let key = &self.data.storage_key;
        if key.trim().is_empty() || key.contains(|c: char| c == '/' || c == '\\') {
            return Err(Error::Config(format!(
                "storage_key {:?} must be a non-empty file name",
                key
            )));
        }
        self.calendar().map(|_| ())
    }

    /// The calendar for the configured year
    pub fn calendar(&self) -> Result<CalendarYear> {
        CalendarYear::new(self.calendar.year)
    }

    /// File store for the ledger, rooted at `data_dir`
    pub fn store(&self, data_dir: &Path) -> JsonFileStore {
        JsonFileStore::new(data_dir, &self.data.storage_key)
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
