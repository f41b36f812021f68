//! TMDb endpoint catalog
//!
//! One method per endpoint the front end uses. Each call builds the URL,
//! performs exactly one request and normalizes the answer into its schema.
//! Nothing is cached and nothing is retried.

use crate::hero::ImageUrls;
use crate::models::{
    Credits, GenreList, MovieDetails, MovieSummary, Page, TimeWindow, VideoList,
};
use crate::query::{build_url, QueryParams, API_KEY_PARAM};
use crate::response::normalize;
use crate::transport::{HttpTransport, Transport};
use crate::Result;
use cinefeed_core::{external_api_span, redact_url, ConfigLoader, TmdbConfig};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, Instrument};
use url::Url;

/// TMDb API client
///
/// Cheap to clone; clones share the underlying transport.
pub struct TmdbClient<T = HttpTransport> {
    transport: Arc<T>,
    base_url: Url,
    api_key: Arc<str>,
    language: Option<String>,
    images: ImageUrls,
}

impl<T> Clone for TmdbClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            base_url: self.base_url.clone(),
            api_key: Arc::clone(&self.api_key),
            language: self.language.clone(),
            images: self.images.clone(),
        }
    }
}

impl<T> std::fmt::Debug for TmdbClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbClient")
            .field("base_url", &self.base_url.as_str())
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

impl TmdbClient<HttpTransport> {
    /// Create a client backed by `reqwest`
    ///
    /// # Errors
    ///
    /// Returns `TmdbError::Config` if the configuration fails validation and
    /// `TmdbError::Transport` if the HTTP client cannot be built.
    pub fn new(config: TmdbConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.timeout)?;
        Self::with_transport(config, transport)
    }

    /// Load configuration from the environment and build a client
    pub fn from_env() -> Result<Self> {
        Self::new(TmdbConfig::from_env()?)
    }
}

impl<T: Transport> TmdbClient<T> {
    /// Create a client over an arbitrary transport
    pub fn with_transport(config: TmdbConfig, transport: T) -> Result<Self> {
        config.validate()?;

        // validate() already proved the URL parses.
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            cinefeed_core::CoreError::config(
                format!("Invalid CINEFEED_TMDB_BASE_URL: {}", e),
                "CINEFEED_TMDB_BASE_URL",
            )
        })?;

        Ok(Self {
            transport: Arc::new(transport),
            base_url,
            api_key: Arc::from(config.api_key.as_str()),
            language: config.language.clone(),
            images: ImageUrls::new(&config.image_base_url),
        })
    }

    pub fn images(&self) -> &ImageUrls {
        &self.images
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Full request URL for `endpoint`, credential included
    pub fn request_url(&self, endpoint: &str, params: &QueryParams) -> Url {
        let mut params = params.clone();
        if let Some(language) = &self.language {
            params.insert_default("language", language.as_str());
        }
        build_url(&self.base_url, endpoint, &params, &self.api_key)
    }

    async fn request<R: DeserializeOwned>(&self, endpoint: &str, params: QueryParams) -> Result<R> {
        let url = self.request_url(endpoint, &params);
        let redacted = redact_url(&url, &[API_KEY_PARAM]);
        let span = external_api_span("GET", &redacted, "tmdb");

        async move {
            debug!(endpoint = %endpoint, "Requesting TMDb endpoint");
            let response = self.transport.get(&url).await?;
            debug!(status = response.status.as_u16(), "TMDb responded");
            normalize(response)
        }
        .instrument(span)
        .await
    }

    /// Untyped access to any endpoint, normalized the same way
    pub async fn get_json(&self, endpoint: &str, params: QueryParams) -> Result<Value> {
        self.request(endpoint, params).await
    }

    /// Trending movies for the given window
    pub async fn trending(&self, window: TimeWindow) -> Result<Page<MovieSummary>> {
        self.request(&format!("/trending/movie/{}", window), QueryParams::new())
            .await
    }

    pub async fn popular(&self) -> Result<Page<MovieSummary>> {
        self.request("/movie/popular", QueryParams::new()).await
    }

    pub async fn top_rated(&self) -> Result<Page<MovieSummary>> {
        self.request("/movie/top_rated", QueryParams::new()).await
    }

    pub async fn upcoming(&self) -> Result<Page<MovieSummary>> {
        self.request("/movie/upcoming", QueryParams::new()).await
    }

    pub async fn movie_details(&self, id: i64) -> Result<MovieDetails> {
        self.request(&format!("/movie/{}", id), QueryParams::new())
            .await
    }

    /// Videos (trailers, teasers, clips) attached to a movie
    pub async fn movie_videos(&self, id: i64) -> Result<VideoList> {
        self.request(&format!("/movie/{}/videos", id), QueryParams::new())
            .await
    }

    /// Search movies by title; `page` defaults to 1
    pub async fn search_movies(&self, query: &str, page: Option<u32>) -> Result<Page<MovieSummary>> {
        let params = QueryParams::new()
            .with("query", query)
            .with("page", page.unwrap_or(1));
        self.request("/search/movie", params).await
    }

    pub async fn movie_genres(&self) -> Result<GenreList> {
        self.request("/genre/movie/list", QueryParams::new()).await
    }

    /// Discover movies tagged with `genre_id`; `page` defaults to 1
    pub async fn movies_by_genre(
        &self,
        genre_id: i64,
        page: Option<u32>,
    ) -> Result<Page<MovieSummary>> {
        let params = QueryParams::new()
            .with("with_genres", genre_id)
            .with("page", page.unwrap_or(1));
        self.request("/discover/movie", params).await
    }

    pub async fn similar_movies(&self, id: i64) -> Result<Page<MovieSummary>> {
        self.request(&format!("/movie/{}/similar", id), QueryParams::new())
            .await
    }

    pub async fn movie_credits(&self, id: i64) -> Result<Credits> {
        self.request(&format!("/movie/{}/credits", id), QueryParams::new())
            .await
    }
}
