//! User configuration file handling
//!
//! Manages settings from ~/.config/zona/settings.json

use crate::core::settings::DEFAULT_BACKEND_URL;
use crate::editing::gesture::DEFAULT_HIT_RADIUS;
use anyhow::Context;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// User configuration from ~/.config/zona/settings.json
///
/// These settings override built-in defaults but are overridden by CLI arguments
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ConfigFile {
    /// Backend base URL (e.g., "http://localhost:8000")
    pub backend_url: Option<String>,
    /// Editor opened on start-up ("live", "mask", "perspective", "grid")
    pub default_mode: Option<String>,
    /// Handle hit radius in normalized units
    pub handle_radius: Option<f64>,
    /// Allow dragging mask vertices after placement
    pub mask_vertex_drag: Option<bool>,
}

impl ConfigFile {
    /// Get the path to the zona config directory
    pub fn config_dir() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")));
        config_dir.join("zona")
    }

    /// Get the path to the user config file
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("settings.json")
    }

    /// Get the path to the grid attribute store
    pub fn attributes_path() -> PathBuf {
        Self::config_dir().join("attributes.json")
    }

    /// Load configuration from the user config file
    pub fn load() -> Option<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    debug!("Loaded user settings from {:?}", path);
                    Some(config)
                }
                Err(e) => {
                    warn!("Failed to parse settings.json: {}", e);
                    None
                }
            },
            Err(e) => {
                warn!("Failed to read settings.json: {}", e);
                None
            }
        }
    }

    /// Save configuration to the given path
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;

        debug!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Settings file written by `--new-config`, spelling out every default
    pub fn example() -> Self {
        Self {
            backend_url: Some(DEFAULT_BACKEND_URL.to_string()),
            default_mode: Some("live".to_string()),
            handle_radius: Some(DEFAULT_HIT_RADIUS),
            mask_vertex_drag: Some(false),
        }
    }

    /// Initialize the complete user configuration directory
    ///
    /// This creates:
    /// 1. The ~/.config/zona directory structure
    /// 2. A settings.json file with default values
    /// 3. A logs/ directory for application logs
    pub fn initialize_config_directory() -> anyhow::Result<()> {
        Self::initialize_in(&Self::config_dir())
    }

    fn initialize_in(config_dir: &Path) -> anyhow::Result<()> {
        fs::create_dir_all(config_dir)
            .with_context(|| format!("Failed to create {}", config_dir.display()))?;
        println!("Created config directory: {:?}", config_dir);

        let logs_dir = config_dir.join("logs");
        fs::create_dir_all(&logs_dir)?;
        println!("Created logs directory: {:?}", logs_dir);

        let settings_path = config_dir.join("settings.json");
        if !settings_path.exists() {
            Self::example().save_to(&settings_path)?;
            println!("Created settings file: {:?}", settings_path);
        } else {
            println!("Settings file already exists: {:?}", settings_path);
        }

        println!("\nConfiguration initialized successfully!");
        println!("You can now:");
        println!("  - Edit settings at: {:?}", settings_path);
        println!("  - View application logs in: {:?}", logs_dir);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_writes_example_settings_once() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join("zona");
        ConfigFile::initialize_in(&config_dir).unwrap();

        let path = config_dir.join("settings.json");
        assert_eq!(ConfigFile::load_from(&path), Some(ConfigFile::example()));
        assert!(config_dir.join("logs").is_dir());

        let custom = ConfigFile {
            default_mode: Some("grid".to_string()),
            ..Default::default()
        };
        custom.save_to(&path).unwrap();
        ConfigFile::initialize_in(&config_dir).unwrap();
        assert_eq!(ConfigFile::load_from(&path), Some(custom));
    }

    #[test]
    fn partial_and_broken_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        fs::write(&path, r#"{"handle_radius": 4.0}"#).unwrap();
        let config = ConfigFile::load_from(&path).unwrap();
        assert_eq!(config.handle_radius, Some(4.0));
        assert_eq!(config.backend_url, None);

        fs::write(&path, "{ nope").unwrap();
        assert_eq!(ConfigFile::load_from(&path), None);
        assert_eq!(ConfigFile::load_from(&dir.path().join("missing.json")), None);
    }
}
