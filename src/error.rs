use crate::types::GeolocationFailure;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeoError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    Env(#[from] std::env::VarError),

    #[error("{0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{message}")]
    Upstream {
        /// Provider HTTP status when the upstream responded at all.
        status: Option<u16>,
        message: String,
    },

    #[error("{0}")]
    NotFound(String),

    #[error("{}", .0.message())]
    Location(GeolocationFailure),
}

pub type Result<T> = std::result::Result<T, GeoError>;
