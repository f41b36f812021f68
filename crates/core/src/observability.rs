//! Logging initialisation and span helpers
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and a single
//! fmt layer. `RUST_LOG` wins over the configured level when it is set.

use crate::config::{LogConfig, LogFormat};
use crate::error::CoreError;
use tracing::{span, Level, Span};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use url::Url;

/// Initialize the global tracing subscriber
///
/// Must be called once at application startup.
///
/// # Errors
///
/// Returns `CoreError::Observability` if the level directive is invalid or a
/// global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> Result<(), CoreError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| CoreError::Observability(format!("invalid log level: {}", e)))?,
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match config.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init(),
        LogFormat::Compact => registry
            .with(tracing_subscriber::fmt::layer().compact().with_target(false))
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_line_number(true),
            )
            .try_init(),
    };

    result.map_err(|e| CoreError::Observability(e.to_string()))?;

    tracing::debug!(level = %config.level, format = ?config.format, "Logging initialized");

    Ok(())
}

/// Create an external API call span
///
/// The URL is recorded as given; callers redact credentials first with
/// [`redact_url`].
pub fn external_api_span(method: &str, url: &str, service: &str) -> Span {
    span!(
        Level::INFO,
        "http.client",
        http.method = %method,
        http.url = %url,
        peer.service = %service,
        otel.kind = "client"
    )
}

/// Render `url` with the values of the named query parameters masked
pub fn redact_url(url: &Url, secret_params: &[&str]) -> String {
    if url.query().is_none() {
        return url.to_string();
    }

    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            if secret_params.contains(&k.as_ref()) {
                (k.into_owned(), "***".to_string())
            } else {
                (k.into_owned(), v.into_owned())
            }
        })
        .collect();

    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}
