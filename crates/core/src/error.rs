//! Error types shared across Cinefeed crates

use thiserror::Error;

/// Errors raised while loading configuration or setting up logging
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Configuration error: {message}")]
    ConfigurationError {
        message: String,
        /// Environment variable the problem was found in, if any
        key: Option<String>,
    },

    #[error("Observability error: {0}")]
    Observability(String),
}

impl CoreError {
    pub fn config(message: impl Into<String>, key: &str) -> Self {
        Self::ConfigurationError {
            message: message.into(),
            key: Some(key.to_string()),
        }
    }

    /// Environment variable associated with a configuration error
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::ConfigurationError { key, .. } => key.as_deref(),
            Self::Observability(_) => None,
        }
    }
}
