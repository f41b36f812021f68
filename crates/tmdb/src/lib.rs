//! Cinefeed TMDb client
//!
//! Typed access to The Movie Database v3 API for a movie-browsing front end:
//! an endpoint catalog, the featured-movie aggregator behind the hero banner,
//! and the banner's view-model.
//!
//! ```no_run
//! use cinefeed_core::TmdbConfig;
//! use cinefeed_tmdb::TmdbClient;
//!
//! # async fn example() -> cinefeed_tmdb::Result<()> {
//! let client = TmdbClient::new(TmdbConfig::new("my-api-key")?)?;
//! let featured = client.featured_movie().await?;
//! if let Some(trailer) = featured.trailer() {
//!     let title = featured.movie.display_title().unwrap_or("Untitled");
//!     println!("{} has a trailer: {}", title, trailer.key);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod featured;
pub mod hero;
pub mod models;
pub mod query;
pub mod response;
pub mod testing;
pub mod transport;

pub use client::TmdbClient;
pub use featured::{select_trailer, FeaturedMovie};
pub use hero::{HeroBanner, HeroState, ImageUrls, FEATURED_LOAD_FAILED};
pub use models::{
    CastMember, Credits, CrewMember, Genre, GenreList, MovieDetails, MovieSummary, Page,
    TimeWindow, VideoEntry, VideoList,
};
pub use query::{build_url, ParamValue, QueryParams, API_KEY_PARAM};
pub use response::normalize;
pub use transport::{HttpTransport, Transport, TransportResponse};

use cinefeed_core::CoreError;

/// Error type for every catalog and aggregator operation
#[derive(Debug, thiserror::Error)]
pub enum TmdbError {
    /// The request never produced a response (DNS, connect, timeout)
    #[error("Transport failure: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The upstream answered with a non-2xx status
    #[error("API Error: {status}{}", phrase_suffix(.status_text))]
    UpstreamStatus { status: u16, status_text: String },

    /// A 2xx body that does not match the expected schema
    #[error("Malformed response body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("Empty result set: {0}")]
    EmptyResult(String),

    #[error(transparent)]
    Config(#[from] CoreError),
}

/// Fieldless discriminant of [`TmdbError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    UpstreamStatus,
    MalformedBody,
    EmptyResult,
    Config,
}

impl TmdbError {
    pub fn transport(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Transport(err.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) => ErrorKind::Transport,
            Self::UpstreamStatus { .. } => ErrorKind::UpstreamStatus,
            Self::MalformedBody(_) => ErrorKind::MalformedBody,
            Self::EmptyResult(_) => ErrorKind::EmptyResult,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// Upstream status code, for `UpstreamStatus` failures
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UpstreamStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn phrase_suffix(status_text: &str) -> String {
    if status_text.is_empty() {
        String::new()
    } else {
        format!(" - {}", status_text)
    }
}

// reqwest puts the request URL, credential included, in its Display output.
impl From<reqwest::Error> for TmdbError {
    fn from(mut err: reqwest::Error) -> Self {
        if let Some(url) = err.url_mut() {
            query::redact_credential(url);
        }
        Self::Transport(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, TmdbError>;
pub type Error = TmdbError;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_status_message() {
        let err = TmdbError::UpstreamStatus {
            status: 401,
            status_text: "Unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "API Error: 401 - Unauthorized");
        assert_eq!(err.kind(), ErrorKind::UpstreamStatus);
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_upstream_status_without_phrase() {
        let err = TmdbError::UpstreamStatus {
            status: 599,
            status_text: String::new(),
        };
        assert_eq!(err.to_string(), "API Error: 599");
    }

    #[test]
    fn test_transport_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = TmdbError::transport(io);
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.status().is_none());
    }

    #[test]
    fn test_config_error_is_transparent() {
        let err: TmdbError = CoreError::config("TMDb API key cannot be empty", "KEY").into();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert_eq!(
            err.to_string(),
            "Configuration error: TMDb API key cannot be empty"
        );
    }
}
