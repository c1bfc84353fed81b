//! Application configuration
//!
//! Stored as JSON in the user's config directory:
//! - Linux: ~/.config/social-cropper/config.json
//! - macOS: ~/Library/Application Support/social-cropper/config.json
//! - Windows: %APPDATA%\social-cropper\config.json
//!
//! A missing file is not an error; the defaults are used instead.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{CropperError, Result};
use crate::state::preset::PresetCatalog;

/// Directory name under the platform config dir
const APP_DIR: &str = "social-cropper";

/// Config file name
const CONFIG_FILE: &str = "config.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Log filter used when `RUST_LOG` is not set (e.g. "info", "social_cropper=debug")
    pub log_level: String,
    /// JSON file with a preset array replacing the built-in catalog
    pub presets_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            presets_file: None,
        }
    }
}

impl AppConfig {
    /// Where the config file is expected, if the platform has a config dir
    pub fn config_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push(APP_DIR);
        path.push(CONFIG_FILE);
        Some(path)
    }

    /// Load from the default location, falling back to defaults
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(path),
            None => {
                debug!("No config directory on this platform, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let json = read_to_string(path)?;
        let config = Self::from_json(&json)?;
        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The configured preset catalog, or the built-in one
    pub fn preset_catalog(&self) -> Result<PresetCatalog> {
        let Some(path) = &self.presets_file else {
            return Ok(PresetCatalog::builtin());
        };

        let catalog = PresetCatalog::from_json(&read_to_string(path)?)?;
        info!(path = %path.display(), presets = catalog.len(), "Loaded preset catalog");
        Ok(catalog)
    }
}

fn read_to_string(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| CropperError::Io {
        path: path.to_path_buf(),
        source,
    })
}
