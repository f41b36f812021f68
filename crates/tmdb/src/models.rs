//! Response schemas for the TMDb endpoints the catalog exposes
//!
//! Unknown upstream fields are ignored. Fields the front end relies on are
//! required and a response missing them fails normalization. Upstream
//! `null`s for strings, lists and flags decode as their empty value.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn parse_release_year(date: Option<&str>) -> Option<i32> {
    date.and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .map(|d| d.year())
}

/// Trending time window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Day,
    #[default]
    Week,
}

impl TimeWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One page of a list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "first_page")]
    pub page: u32,
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

fn first_page() -> u32 {
    1
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Movie as it appears in list results
///
/// Trending and discover lists may carry TV-style entries that use `name`
/// instead of `title`; [`MovieSummary::display_title`] covers both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: String,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genre_ids: Vec<i64>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u64>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub adult: bool,
}

impl MovieSummary {
    /// `title`, else `name`, ignoring blank values
    pub fn display_title(&self) -> Option<&str> {
        self.title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| self.name.as_deref().filter(|n| !n.trim().is_empty()))
    }

    pub fn release_year(&self) -> Option<i32> {
        parse_release_year(self.release_date.as_deref())
    }
}

/// A video attached to a movie (trailer, teaser, clip, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoEntry {
    /// Site-specific video id, e.g. the YouTube video key
    pub key: String,
    /// Classification such as `Trailer` or `Teaser`
    #[serde(rename = "type")]
    pub kind: String,
    /// Hosting site such as `YouTube` or `Vimeo`
    pub site: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub official: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso_639_1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso_3166_1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
}

impl VideoEntry {
    pub fn is_youtube_trailer(&self) -> bool {
        self.kind == "Trailer" && self.site == "YouTube"
    }
}

/// Response of `/movie/{id}/videos`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoList {
    #[serde(default)]
    pub id: Option<i64>,
    pub results: Vec<VideoEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// Response of `/genre/movie/list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreList {
    pub genres: Vec<Genre>,
}

impl GenreList {
    pub fn name_of(&self, id: i64) -> Option<&str> {
        self.genres
            .iter()
            .find(|g| g.id == id)
            .map(|g| g.name.as_str())
    }

    /// Resolve genre ids from a list result, skipping unknown ones
    pub fn names_for(&self, ids: &[i64]) -> Vec<String> {
        ids.iter()
            .filter_map(|id| self.name_of(*id))
            .map(str::to_string)
            .collect()
    }
}

/// Response of `/movie/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u64>,
    #[serde(default)]
    pub budget: Option<u64>,
    #[serde(default)]
    pub revenue: Option<u64>,
}

impl MovieDetails {
    pub fn release_year(&self) -> Option<i32> {
        parse_release_year(self.release_date.as_deref())
    }

    /// Runtime rendered as `2h 16m`
    pub fn formatted_runtime(&self) -> Option<String> {
        match self.runtime? {
            0 => None,
            m if m < 60 => Some(format!("{}m", m)),
            m => Some(format!("{}h {}m", m / 60, m % 60)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastMember {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub order: Option<u32>,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub credit_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewMember {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub job: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub credit_id: Option<String>,
}

/// Response of `/movie/{id}/credits`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credits {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cast: Vec<CastMember>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub crew: Vec<CrewMember>,
}

impl Credits {
    pub fn directors(&self) -> impl Iterator<Item = &CrewMember> {
        self.crew
            .iter()
            .filter(|c| c.job.as_deref() == Some("Director"))
    }

    /// Top-billed cast, ordered by billing
    pub fn top_cast(&self, limit: usize) -> Vec<&CastMember> {
        let mut cast: Vec<&CastMember> = self.cast.iter().collect();
        cast.sort_by_key(|c| c.order.unwrap_or(u32::MAX));
        cast.truncate(limit);
        cast
    }
}
