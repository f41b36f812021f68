//! Featured movie for the hero banner
//!
//! The featured movie is the first entry of this week's trending list,
//! paired with every video TMDb lists for it. The two requests run in
//! sequence since the second needs the id from the first.

use crate::client::TmdbClient;
use crate::models::{MovieSummary, TimeWindow, VideoEntry};
use crate::transport::Transport;
use crate::{Result, TmdbError};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

/// Featured movie and its videos
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturedMovie {
    pub movie: MovieSummary,
    pub videos: Vec<VideoEntry>,
}

impl FeaturedMovie {
    /// The YouTube trailer to embed, if there is one
    pub fn trailer(&self) -> Option<&VideoEntry> {
        select_trailer(&self.videos)
    }
}

/// First video that is a YouTube trailer
///
/// No match is a normal outcome; the banner falls back to the backdrop.
pub fn select_trailer(videos: &[VideoEntry]) -> Option<&VideoEntry> {
    videos.iter().find(|v| v.is_youtube_trailer())
}

impl<T: Transport> TmdbClient<T> {
    /// Fetch the featured movie and its videos
    ///
    /// # Errors
    ///
    /// Any failure of either request is logged and returned unchanged. An
    /// empty trending list fails with `TmdbError::EmptyResult`.
    pub async fn featured_movie(&self) -> Result<FeaturedMovie> {
        let result = self.fetch_featured().await;

        if let Err(e) = &result {
            error!(error = %e, kind = ?e.kind(), "Error getting featured movie");
        }

        result
    }

    async fn fetch_featured(&self) -> Result<FeaturedMovie> {
        let trending = self.trending(TimeWindow::default()).await?;

        let movie = trending.results.into_iter().next().ok_or_else(|| {
            TmdbError::EmptyResult("trending movie list is empty".to_string())
        })?;

        debug!(movie_id = movie.id, "Selected featured movie");

        let videos = self.movie_videos(movie.id).await?;

        Ok(FeaturedMovie {
            movie,
            videos: videos.results,
        })
    }
}
