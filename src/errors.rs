// src/errors.rs

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MurmurError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("HTTP error! Status: {0}")]
    Http(reqwest::StatusCode),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Speech recognition error: {0}")]
    Speech(String),

    #[error("Relay error: {0}")]
    Relay(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Request(#[from] reqwest::Error),
}

pub type MurmurResult<T> = Result<T, MurmurError>;

impl MurmurError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn api_error(msg: impl Into<String>) -> Self {
        Self::Api(msg.into())
    }

    pub fn clipboard_error(msg: impl Into<String>) -> Self {
        Self::Clipboard(msg.into())
    }

    pub fn speech_error(msg: impl Into<String>) -> Self {
        Self::Speech(msg.into())
    }

    pub fn relay_error(msg: impl Into<String>) -> Self {
        Self::Relay(msg.into())
    }
}
