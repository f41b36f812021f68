//! Configuration loading for Cinefeed
//!
//! Configuration is read from environment variables prefixed with `CINEFEED_`,
//! optionally seeded from a `.env` file, and validated before any client is
//! built from it. A missing or blank API credential is reported here rather
//! than surfacing later as an unauthorized upstream response.
//!
//! # Example
//!
//! ```no_run
//! use cinefeed_core::config::{load_dotenv, ConfigLoader, TmdbConfig};
//!
//! # fn example() -> Result<(), cinefeed_core::CoreError> {
//! load_dotenv();
//!
//! let tmdb = TmdbConfig::from_env()?;
//! tmdb.validate()?;
//! # Ok(())
//! # }
//! ```

use crate::error::CoreError;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use url::Url;

pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_TMDB_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const API_KEY_VARS: [&str; 3] = [
    "CINEFEED_TMDB_API_KEY",
    "TMDB_API_KEY",
    "NEXT_PUBLIC_TMB_API_KEY",
];

/// Configuration loader trait
///
/// Implementors read their values from the environment and check them
/// separately, so a config built by hand goes through the same validation.
pub trait ConfigLoader: Sized {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if a required variable is missing or a
    /// value cannot be parsed.
    fn from_env() -> Result<Self, CoreError>;

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` naming the offending variable.
    fn validate(&self) -> Result<(), CoreError>;
}

/// TMDb upstream configuration
///
/// # Environment Variables
///
/// - `CINEFEED_TMDB_API_KEY` (required, falls back to `TMDB_API_KEY` and
///   `NEXT_PUBLIC_TMB_API_KEY`): v3 API key sent with every request
/// - `CINEFEED_TMDB_BASE_URL` (optional): API origin (default: `https://api.themoviedb.org/3`)
/// - `CINEFEED_TMDB_IMAGE_BASE_URL` (optional): image CDN origin (default: `https://image.tmdb.org/t/p`)
/// - `CINEFEED_TMDB_LANGUAGE` (optional): `language` parameter added to every request
/// - `CINEFEED_TMDB_TIMEOUT` (optional): transport timeout in seconds (default: 30)
#[derive(Clone)]
pub struct TmdbConfig {
    /// API credential
    pub api_key: String,
    /// API origin including the version segment
    pub base_url: String,
    /// Image CDN origin
    pub image_base_url: String,
    /// Default response language, e.g. `en-US`
    pub language: Option<String>,
    /// Transport-level request timeout
    pub timeout: Duration,
}

impl TmdbConfig {
    /// Build a validated configuration with default endpoints
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if `api_key` is blank.
    pub fn new(api_key: impl Into<String>) -> Result<Self, CoreError> {
        let config = Self {
            api_key: api_key.into(),
            base_url: DEFAULT_TMDB_BASE_URL.to_string(),
            image_base_url: DEFAULT_TMDB_IMAGE_BASE_URL.to_string(),
            language: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_image_base_url(mut self, image_base_url: impl Into<String>) -> Self {
        self.image_base_url = image_base_url.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// The credential never appears in debug output.
impl std::fmt::Debug for TmdbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbConfig")
            .field("api_key", &"[redacted]")
            .field("base_url", &self.base_url)
            .field("image_base_url", &self.image_base_url)
            .field("language", &self.language)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ConfigLoader for TmdbConfig {
    fn from_env() -> Result<Self, CoreError> {
        let api_key = API_KEY_VARS
            .iter()
            .find_map(|key| std::env::var(key).ok().filter(|v| !v.trim().is_empty()))
            .ok_or_else(|| {
                CoreError::config(
                    "CINEFEED_TMDB_API_KEY or TMDB_API_KEY must be set",
                    "CINEFEED_TMDB_API_KEY",
                )
            })?;

        let base_url = std::env::var("CINEFEED_TMDB_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_TMDB_BASE_URL.to_string());

        let image_base_url = std::env::var("CINEFEED_TMDB_IMAGE_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_TMDB_IMAGE_BASE_URL.to_string());

        let language = std::env::var("CINEFEED_TMDB_LANGUAGE")
            .ok()
            .filter(|l| !l.trim().is_empty());

        let timeout_secs = parse_env_var("CINEFEED_TMDB_TIMEOUT", DEFAULT_TIMEOUT_SECS)?;

        Ok(Self {
            api_key,
            base_url,
            image_base_url,
            language,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    fn validate(&self) -> Result<(), CoreError> {
        if self.api_key.trim().is_empty() {
            return Err(CoreError::config(
                "TMDb API key cannot be empty",
                "CINEFEED_TMDB_API_KEY",
            ));
        }

        validate_http_url(&self.base_url, "CINEFEED_TMDB_BASE_URL")?;
        validate_http_url(&self.image_base_url, "CINEFEED_TMDB_IMAGE_BASE_URL")?;

        if self.timeout.is_zero() {
            return Err(CoreError::config(
                "timeout must be greater than 0 seconds",
                "CINEFEED_TMDB_TIMEOUT",
            ));
        }

        Ok(())
    }
}

fn validate_http_url(value: &str, key: &str) -> Result<(), CoreError> {
    let url = Url::parse(value)
        .map_err(|e| CoreError::config(format!("Invalid {}: {}", key, e), key))?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(CoreError::config(
            format!("{} must be an absolute http(s) URL, got '{}'", key, value),
            key,
        ));
    }

    Ok(())
}

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "unknown log format '{}' (expected pretty, compact or json)",
                other
            )),
        }
    }
}

/// Logging configuration
///
/// # Environment Variables
///
/// - `CINEFEED_LOG_LEVEL` (optional): default filter directive (default: `info`);
///   `RUST_LOG` overrides it when set
/// - `CINEFEED_LOG_FORMAT` (optional): `pretty`, `compact` or `json` (default: `pretty`)
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl ConfigLoader for LogConfig {
    fn from_env() -> Result<Self, CoreError> {
        let level = std::env::var("CINEFEED_LOG_LEVEL")
            .ok()
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| LogConfig::default().level);
        let format = parse_env_var("CINEFEED_LOG_FORMAT", LogFormat::default())?;

        Ok(Self { level, format })
    }

    /// Accepts anything `init_logging` accepts: a bare level or a full
    /// `EnvFilter` directive list such as `cinefeed_tmdb=debug,info`
    fn validate(&self) -> Result<(), CoreError> {
        EnvFilter::try_new(&self.level).map_err(|e| {
            CoreError::config(
                format!("Invalid log filter '{}': {}", self.level, e),
                "CINEFEED_LOG_LEVEL",
            )
        })?;

        Ok(())
    }
}

/// Parse an environment variable, falling back to `default` when unset
///
/// # Errors
///
/// Returns a `ConfigurationError` if the variable is set but fails to parse.
pub(crate) fn parse_env_var<T>(key: &str, default: T) -> Result<T, CoreError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    std::env::var(key)
        .ok()
        .map(|v| {
            v.parse::<T>()
                .map_err(|e| CoreError::config(format!("Failed to parse {}: {}", key, e), key))
        })
        .unwrap_or(Ok(default))
}

/// Load `.env` file if present
///
/// A missing file is not an error; any other failure is printed to stderr
/// because logging is usually not initialised yet.
pub fn load_dotenv() {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }
}
