//! Application configuration management.
//!
//! This module handles loading and saving the application configuration,
//! which identifies whose catalog to synchronize and where from.
//!
//! Configuration is stored at `~/.config/worldcards/config.json`.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "worldcards";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Default catalog endpoint; `{id}` is replaced with the player id.
pub const DEFAULT_URL_TEMPLATE: &str = "https://example.com/{id}.json";

/// Default HTTP request timeout in seconds.
/// 30s allows for slow responses while failing fast enough for good UX.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub player_id: Option<String>,
    #[serde(default = "default_url_template")]
    pub url_template: String,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_url_template() -> String {
    DEFAULT_URL_TEMPLATE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            player_id: None,
            url_template: default_url_template(),
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir =
            dirs::cache_dir().ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Let env vars override the config file (useful with a .env file)
    pub fn apply_env_overrides(&mut self) {
        if let Ok(id) = std::env::var("WORLDCARDS_PLAYER_ID") {
            if !id.is_empty() {
                self.player_id = Some(id);
            }
        }
        if let Ok(template) = std::env::var("WORLDCARDS_URL_TEMPLATE") {
            if !template.is_empty() {
                self.url_template = template;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.player_id.is_none());
        assert_eq!(config.url_template, DEFAULT_URL_TEMPLATE);
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"player_id":"usr_1"}"#).unwrap();
        assert_eq!(config.player_id.as_deref(), Some("usr_1"));
        assert_eq!(config.url_template, DEFAULT_URL_TEMPLATE);
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
    }
}
