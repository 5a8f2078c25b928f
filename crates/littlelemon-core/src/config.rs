//! Application configuration management.
//!
//! Configuration is stored at `~/.config/little-lemon/config.json`. Every
//! field is optional; accessors fall back to the built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Application name used for config/data directory paths
const APP_NAME: &str = "little-lemon";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Menu database file name inside the data directory
const MENU_DB_FILE: &str = "menu.db";

/// Directory for key-value records inside the data directory
const KV_DIR: &str = "storage";

pub const DEFAULT_MENU_URL: &str =
    "https://raw.githubusercontent.com/Meta-Mobile-Developer-PC/Working-With-Data-API/main/capstone.json";

pub const DEFAULT_IMAGE_URL_TEMPLATE: &str =
    "https://github.com/Meta-Mobile-Developer-PC/Working-With-Data-API/blob/main/images/{image}?raw=true";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub menu_url: Option<String>,
    /// `{image}` is replaced by the menu item's image file name.
    pub image_url_template: Option<String>,
    pub data_dir: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn menu_url(&self) -> &str {
        self.menu_url.as_deref().unwrap_or(DEFAULT_MENU_URL)
    }

    pub fn image_url_template(&self) -> &str {
        self.image_url_template
            .as_deref()
            .unwrap_or(DEFAULT_IMAGE_URL_TEMPLATE)
    }

    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.data_dir {
            return Ok(dir.clone());
        }
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }

    pub fn menu_db_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(MENU_DB_FILE))
    }

    pub fn storage_dir(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(KV_DIR))
    }
}
