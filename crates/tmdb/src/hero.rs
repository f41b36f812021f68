//! Hero banner view-model
//!
//! Holds everything the banner needs to render: loading and error states,
//! the featured movie, whether a trailer plays or the backdrop shows, and
//! the play and mute toggles. Rendering itself belongs to the UI layer.

use crate::client::TmdbClient;
use crate::featured::FeaturedMovie;
use crate::models::MovieSummary;
use crate::transport::Transport;
use crate::Result;
use tracing::warn;

/// Message shown when the featured movie cannot be loaded
pub const FEATURED_LOAD_FAILED: &str = "Failed to load featured content";

const FALLBACK_TITLE: &str = "Featured Movie";
const YOUTUBE_EMBED_BASE: &str = "https://www.youtube.com/embed";

/// Image CDN URL builder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrls {
    base: String,
}

impl ImageUrls {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// URL for `path` at `size` (`original`, `w500`, `w1280`, ...)
    pub fn url(&self, size: &str, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}/{}{}", self.base, size, path)
        } else {
            format!("{}/{}/{}", self.base, size, path)
        }
    }

    pub fn backdrop(&self, movie: &MovieSummary, size: &str) -> Option<String> {
        movie.backdrop_path.as_deref().map(|p| self.url(size, p))
    }

    pub fn poster(&self, movie: &MovieSummary, size: &str) -> Option<String> {
        movie.poster_path.as_deref().map(|p| self.url(size, p))
    }
}

/// State of the hero banner
#[derive(Debug, Clone, PartialEq, Default)]
pub enum HeroState {
    #[default]
    Loading,
    Failed(String),
    Ready(HeroBanner),
}

impl HeroState {
    /// Fetch the featured movie and build the banner state from the outcome
    pub async fn load<T: Transport>(client: &TmdbClient<T>) -> Self {
        Self::from_result(client.featured_movie().await, client.images())
    }

    pub fn from_result(result: Result<FeaturedMovie>, images: &ImageUrls) -> Self {
        match result {
            Ok(featured) => HeroState::Ready(HeroBanner::new(featured, images)),
            Err(e) => {
                warn!(error = %e, "Error loading featured movie");
                HeroState::Failed(FEATURED_LOAD_FAILED.to_string())
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, HeroState::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            HeroState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn banner(&self) -> Option<&HeroBanner> {
        match self {
            HeroState::Ready(banner) => Some(banner),
            _ => None,
        }
    }

    pub fn banner_mut(&mut self) -> Option<&mut HeroBanner> {
        match self {
            HeroState::Ready(banner) => Some(banner),
            _ => None,
        }
    }
}

/// Featured movie ready for display
///
/// Starts playing and muted, the way autoplaying background video has to.
#[derive(Debug, Clone, PartialEq)]
pub struct HeroBanner {
    movie: MovieSummary,
    trailer_key: Option<String>,
    backdrop_url: Option<String>,
    playing: bool,
    muted: bool,
}

impl HeroBanner {
    pub fn new(featured: FeaturedMovie, images: &ImageUrls) -> Self {
        let trailer_key = featured.trailer().map(|t| t.key.clone());
        let backdrop_url = images.backdrop(&featured.movie, "original");

        Self {
            movie: featured.movie,
            trailer_key,
            backdrop_url,
            playing: true,
            muted: true,
        }
    }

    pub fn movie(&self) -> &MovieSummary {
        &self.movie
    }

    pub fn title(&self) -> &str {
        self.movie.display_title().unwrap_or(FALLBACK_TITLE)
    }

    pub fn overview(&self) -> &str {
        &self.movie.overview
    }

    pub fn trailer_key(&self) -> Option<&str> {
        self.trailer_key.as_deref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn toggle_playing(&mut self) {
        self.playing = !self.playing;
    }

    pub fn toggle_muted(&mut self) {
        self.muted = !self.muted;
    }

    /// Playback controls only make sense with a trailer
    pub fn shows_controls(&self) -> bool {
        self.trailer_key.is_some()
    }

    /// Background embed URL while a trailer exists and is playing
    pub fn embed_url(&self) -> Option<String> {
        let key = self.trailer_key.as_deref().filter(|_| self.playing)?;
        Some(format!(
            "{}/{key}?autoplay=1&mute={}&controls=0&loop=1&playlist={key}",
            YOUTUBE_EMBED_BASE,
            u8::from(self.muted),
        ))
    }

    /// Backdrop image, shown only when there is no trailer
    pub fn backdrop_url(&self) -> Option<&str> {
        if self.trailer_key.is_some() {
            return None;
        }
        self.backdrop_url.as_deref()
    }

    pub fn play_button_label(&self) -> &'static str {
        if self.playing {
            "Pause video"
        } else {
            "Play video"
        }
    }

    pub fn mute_button_label(&self) -> &'static str {
        if self.muted {
            "Unmute"
        } else {
            "Mute"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TmdbError;
    use cinefeed_core::DEFAULT_TMDB_IMAGE_BASE_URL;
    use serde_json::json;

    fn images() -> ImageUrls {
        ImageUrls::new(DEFAULT_TMDB_IMAGE_BASE_URL)
    }

    fn featured(videos: serde_json::Value) -> FeaturedMovie {
        serde_json::from_value(json!({
            "movie": {"id": 42, "title": "A", "overview": "Plot.", "backdrop_path": "/bg.jpg"},
            "videos": videos
        }))
        .unwrap()
    }

    #[test]
    fn test_image_urls() {
        let images = ImageUrls::new("https://image.tmdb.org/t/p/");
        assert_eq!(
            images.url("w500", "/poster.jpg"),
            "https://image.tmdb.org/t/p/w500/poster.jpg"
        );
        assert_eq!(
            images.url("original", "bg.jpg"),
            "https://image.tmdb.org/t/p/original/bg.jpg"
        );

        let movie = featured(json!([])).movie;
        assert_eq!(images.poster(&movie, "w500"), None);
        assert_eq!(
            images.backdrop(&movie, "w1280").as_deref(),
            Some("https://image.tmdb.org/t/p/w1280/bg.jpg")
        );
    }

    #[test]
    fn test_banner_with_trailer() {
        let mut banner = HeroBanner::new(
            featured(json!([{"key": "abc123", "type": "Trailer", "site": "YouTube"}])),
            &images(),
        );

        assert_eq!(banner.title(), "A");
        assert_eq!(banner.overview(), "Plot.");
        assert!(banner.shows_controls());
        assert!(banner.backdrop_url().is_none());
        assert_eq!(
            banner.embed_url().as_deref(),
            Some("https://www.youtube.com/embed/abc123?autoplay=1&mute=1&controls=0&loop=1&playlist=abc123")
        );

        banner.toggle_muted();
        assert!(banner.embed_url().unwrap().contains("mute=0"));
        assert_eq!(banner.mute_button_label(), "Mute");

        banner.toggle_playing();
        assert!(banner.embed_url().is_none());
        assert_eq!(banner.play_button_label(), "Play video");
        assert!(banner.backdrop_url().is_none());
    }

    #[test]
    fn test_banner_without_trailer_uses_backdrop() {
        let banner = HeroBanner::new(
            featured(json!([{"key": "t", "type": "Teaser", "site": "YouTube"}])),
            &images(),
        );

        assert!(!banner.shows_controls());
        assert!(banner.embed_url().is_none());
        assert_eq!(
            banner.backdrop_url(),
            Some("https://image.tmdb.org/t/p/original/bg.jpg")
        );
    }

    #[test]
    fn test_banner_title_fallback() {
        let featured: FeaturedMovie =
            serde_json::from_value(json!({"movie": {"id": 1}, "videos": []})).unwrap();
        let banner = HeroBanner::new(featured, &images());
        assert_eq!(banner.title(), "Featured Movie");
        assert!(banner.backdrop_url().is_none());
    }

    #[test]
    fn test_state_from_failure_hides_details() {
        let err = TmdbError::EmptyResult("trending movie list is empty".to_string());
        let state = HeroState::from_result(Err(err), &images());
        assert_eq!(state.error_message(), Some(FEATURED_LOAD_FAILED));
        assert!(state.banner().is_none());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_state_default_is_loading() {
        let mut state = HeroState::default();
        assert!(state.is_loading());
        assert!(state.banner_mut().is_none());
    }

    #[tokio::test]
    async fn test_state_load_through_client() {
        use crate::testing::ScriptedTransport;
        use cinefeed_core::TmdbConfig;

        let transport = ScriptedTransport::new()
            .respond_json(
                "/trending/movie/week",
                200,
                json!({"results": [{"id": 42, "title": "A", "backdrop_path": "/bg.jpg"}]}),
            )
            .respond_json("/movie/42/videos", 200, json!({"id": 42, "results": []}));
        let config = TmdbConfig::new("test_key")
            .unwrap()
            .with_base_url("http://tmdb.test");
        let client = TmdbClient::with_transport(config, transport).unwrap();

        let mut state = HeroState::load(&client).await;
        let banner = state.banner_mut().unwrap();
        banner.toggle_playing();
        assert!(!banner.is_playing());
        assert_eq!(
            banner.backdrop_url(),
            Some("https://image.tmdb.org/t/p/original/bg.jpg")
        );
    }
}
