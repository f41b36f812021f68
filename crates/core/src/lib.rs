//! # Cinefeed Core
//!
//! Shared building blocks for the Cinefeed crates.
//!
//! ## Modules
//!
//! - `config`: Configuration loading and validation
//! - `error`: Error types for configuration and logging setup
//! - `observability`: Logging initialisation and span helpers

pub mod config;
pub mod error;
pub mod observability;

pub use config::{
    load_dotenv, ConfigLoader, LogConfig, LogFormat, TmdbConfig, DEFAULT_TMDB_BASE_URL,
    DEFAULT_TMDB_IMAGE_BASE_URL,
};
pub use error::CoreError;
pub use observability::{external_api_span, init_logging, redact_url};

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
