//! Application configuration.
//!
//! JSON config under `~/.vibefy/config.json`. Credentials can come from the
//! config file or be overridden through environment variables so they never
//! have to live on disk.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

use crate::capture::CaptureConfig;
use crate::emotion::{DetectorOptions, DEFAULT_CONFIDENCE_FLOOR, DEFAULT_TEXT_API_URL};

/// Environment override for the text classification credential.
pub const TEXT_TOKEN_ENV: &str = "VIBEFY_HF_TOKEN";
/// Environment override for the chat companion API key.
pub const CHAT_KEY_ENV: &str = "VIBEFY_CHAT_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub schema_version: u32,

    pub text_api_url: String,
    pub text_api_token: Option<String>,

    pub chat_api_url: String,
    pub chat_api_key: Option<String>,
    pub chat_model: String,

    /// Minimum score for a detector reading to count as a real signal.
    pub confidence_floor: f32,

    pub capture_window_ms: u32,
    pub sample_interval_ms: u32,
    pub max_samples: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: 1,
            text_api_url: DEFAULT_TEXT_API_URL.to_string(),
            text_api_token: None,
            chat_api_url: "https://api.openai.com".to_string(),
            chat_api_key: None,
            chat_model: "gpt-4o-mini".to_string(),
            confidence_floor: DEFAULT_CONFIDENCE_FLOOR,
            capture_window_ms: 5000,
            sample_interval_ms: 1000,
            max_samples: 5,
        }
    }
}

impl Config {
    /// Get the default config directory
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Failed to get home directory")?;
        Ok(home.join(".vibefy"))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from file or return default
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                debug!("Failed to load config, using default: {}", e);
                Self::default()
            }
        }
    }

    /// Load config from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Text classification credential: environment override wins over the
    /// config file; blank values count as absent.
    pub fn text_token(&self) -> Option<String> {
        std::env::var(TEXT_TOKEN_ENV)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| {
                self.text_api_token
                    .clone()
                    .filter(|t| !t.trim().is_empty())
            })
    }

    /// Chat companion API key, same override rules as [`Self::text_token`].
    pub fn chat_key(&self) -> Option<String> {
        std::env::var(CHAT_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.chat_api_key.clone().filter(|k| !k.trim().is_empty()))
    }

    pub fn detector_options(&self) -> DetectorOptions {
        DetectorOptions {
            confidence_floor: self.confidence_floor,
        }
    }

    pub fn capture_config(&self) -> CaptureConfig {
        CaptureConfig {
            window: Duration::from_millis(u64::from(self.capture_window_ms)),
            sample_interval: Duration::from_millis(u64::from(self.sample_interval_ms)),
            max_samples: self.max_samples,
            ..CaptureConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.schema_version, 1);
        assert_eq!(config.confidence_floor, DEFAULT_CONFIDENCE_FLOOR);
        assert_eq!(config.capture_window_ms, 5000);
        assert_eq!(config.sample_interval_ms, 1000);
        assert_eq!(config.max_samples, 5);
        assert!(config.text_api_token.is_none());
        assert!(config.chat_api_key.is_none());
    }

    #[test]
    fn config_dir_and_path() {
        let dir = Config::config_dir().unwrap();
        assert!(dir.to_string_lossy().contains(".vibefy"));
        let path = Config::config_path().unwrap();
        assert!(path.to_string_lossy().ends_with("config.json"));
    }

    #[test]
    fn json_roundtrip() {
        let mut config = Config::default();
        config.text_api_token = Some("abc".to_string());
        config.confidence_floor = 0.25;

        let json = serde_json::to_string(&config).unwrap();
        let decoded: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.text_api_token, Some("abc".to_string()));
        assert_eq!(decoded.confidence_floor, 0.25);
    }

    #[test]
    fn capture_config_reflects_settings() {
        let mut config = Config::default();
        config.capture_window_ms = 3000;
        config.sample_interval_ms = 500;
        config.max_samples = 3;

        let capture = config.capture_config();
        assert_eq!(capture.window, Duration::from_secs(3));
        assert_eq!(capture.sample_interval, Duration::from_millis(500));
        assert_eq!(capture.max_samples, 3);
    }

    #[test]
    fn detector_options_carry_the_floor() {
        let mut config = Config::default();
        config.confidence_floor = 0.3;
        assert_eq!(config.detector_options().confidence_floor, 0.3);
    }

    #[test]
    #[serial]
    fn env_token_overrides_config() {
        std::env::set_var(TEXT_TOKEN_ENV, "from-env");
        let mut config = Config::default();
        config.text_api_token = Some("from-file".to_string());
        assert_eq!(config.text_token(), Some("from-env".to_string()));
        std::env::remove_var(TEXT_TOKEN_ENV);
    }

    #[test]
    #[serial]
    fn blank_env_token_falls_back_to_config() {
        std::env::set_var(TEXT_TOKEN_ENV, "  ");
        let mut config = Config::default();
        config.text_api_token = Some("from-file".to_string());
        assert_eq!(config.text_token(), Some("from-file".to_string()));
        std::env::remove_var(TEXT_TOKEN_ENV);
    }

    #[test]
    #[serial]
    fn absent_token_everywhere_is_none() {
        std::env::remove_var(TEXT_TOKEN_ENV);
        let config = Config::default();
        assert_eq!(config.text_token(), None);
    }
}
