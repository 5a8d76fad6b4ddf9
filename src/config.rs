use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_deck_dir")]
    pub deck_dir: String,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_shuffle")]
    pub shuffle: bool,
}

fn default_deck_dir() -> String {
    ".".to_string()
}
fn default_theme() -> String {
    "dark".to_string()
}
fn default_shuffle() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            deck_dir: default_deck_dir(),
            theme: default_theme(),
            shuffle: default_shuffle(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cardr")
            .join("config.toml")
    }
}
