use crate::constants;
use crate::error::{GeoError, Result};
use serde::Deserialize;
use std::fs;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub kakao: KakaoConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KakaoConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_base_url() -> String {
    constants::KAKAO_BASE_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_port() -> u16 {
    3000
}

impl Default for KakaoConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: default_port() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kakao: KakaoConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    /// Reads config.toml from the working directory; a missing file falls
    /// back to defaults, a malformed one is an error.
    pub fn load() -> Result<Self> {
        let config_path = "config.toml";
        match fs::read_to_string(config_path) {
            Ok(content) => {
                let config: Config = toml::from_str(&content)?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Config::default()),
            Err(e) => Err(GeoError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path, e
            ))),
        }
    }

    /// The Kakao REST credential. Server-held only; its absence is a fatal
    /// configuration error surfaced with the localized message.
    pub fn api_key() -> Result<String> {
        std::env::var(constants::KAKAO_API_KEY_ENV)
            .map_err(|_| GeoError::Config(constants::MSG_API_KEY_MISSING.to_string()))
    }
}
