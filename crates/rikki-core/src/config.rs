use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::client::{DEFAULT_API_BASE, DEFAULT_CHAT_URL};
use crate::error::{Error, Result};
use crate::session::ReplyMode;

pub const CHAT_URL_ENV: &str = "RIKKI_CHAT_URL";
pub const API_BASE_ENV: &str = "RIKKI_API_BASE";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub reply_mode: ReplyMode,
    pub chat_url: String,
    pub api_base: String,
    pub min_reply_delay_ms: u64,
    pub max_reply_delay_ms: u64,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            reply_mode: ReplyMode::Scripted,
            chat_url: DEFAULT_CHAT_URL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            min_reply_delay_ms: 1500,
            max_reply_delay_ms: 2500,
            seed: None,
        }
    }

    /// Load from the user config file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        let mut config = Self::load_from(&config_path)?;
        config.apply_env();
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_content)?;
        config.validate().map_err(|message| Error::ConfigInvalid {
            path: path.to_path_buf(),
            message,
        })?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(path, config_content)?;
        Ok(())
    }

    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(CHAT_URL_ENV) {
            self.chat_url = url;
        }
        if let Ok(base) = std::env::var(API_BASE_ENV) {
            self.api_base = base;
        }
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.min_reply_delay_ms > self.max_reply_delay_ms {
            return Err(format!(
                "min_reply_delay_ms ({}) is greater than max_reply_delay_ms ({})",
                self.min_reply_delay_ms, self.max_reply_delay_ms
            ));
        }
        if self.chat_url.trim().is_empty() {
            return Err("chat_url is empty".to_string());
        }
        if self.api_base.trim().is_empty() {
            return Err("api_base is empty".to_string());
        }
        Ok(())
    }

    pub fn min_delay(&self) -> Duration {
        Duration::from_millis(self.min_reply_delay_ms)
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_reply_delay_ms)
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| Error::config("Could not determine config directory"))?;

        Ok(config_dir.join("rikki").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::new());
        assert_eq!(config.reply_mode, ReplyMode::Scripted);
        assert_eq!(config.min_delay(), Duration::from_millis(1500));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            reply_mode: ReplyMode::Remote,
            seed: Some(99),
            ..Config::new()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"reply_mode\": \"remote\""));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "seed": 7 }"#).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.seed, Some(7));
        assert_eq!(loaded.chat_url, DEFAULT_CHAT_URL);
    }

    #[test]
    fn test_inverted_delay_range_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{ "min_reply_delay_ms": 3000, "max_reply_delay_ms": 1000 }"#,
        )
        .unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::ConfigInvalid { .. }));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Config::load_from(&path), Err(Error::Json(_))));
    }
}
