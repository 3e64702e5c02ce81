//! TMDB (The Movie Database) API client
//!
//! Provides movie search and video listings.
//! API docs: https://developer.themoviedb.org/docs

use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::models::{MovieSummary, SearchPage, Video};

/// Default TMDB v3 endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Shortest request timeout a client accepts
pub const MIN_TIMEOUT: Duration = Duration::from_millis(1);

/// TMDB API error types
#[derive(Error, Debug)]
pub enum TmdbError {
    /// Request could not complete (connection, DNS, timeout)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Provider returned HTTP {status}")]
    Provider { status: u16 },

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Resource not found")]
    NotFound,
}

impl TmdbError {
    /// Short label for log fields
    pub fn kind(&self) -> &'static str {
        match self {
            TmdbError::Network(_) => "network",
            TmdbError::Provider { .. } => "provider",
            TmdbError::Decode(_) => "decode",
            TmdbError::NotFound => "not_found",
        }
    }
}

/// TMDB API client
#[derive(Clone)]
pub struct TmdbClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for TmdbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl TmdbClient {
    /// Create a new TMDB client with the given API key
    pub fn new(api_key: impl Into<String>) -> Result<Self, TmdbError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, TmdbError> {
        Self::with_options(api_key, base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom base URL and request timeout.
    ///
    /// Fails if the HTTP client cannot be built; a zero timeout is raised to
    /// [`MIN_TIMEOUT`].
    pub fn with_options(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TmdbError> {
        let client = reqwest::Client::builder()
            .timeout(timeout.max(MIN_TIMEOUT))
            .build()?;

        Ok(Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make an authenticated GET request. No retries: a failure ends the operation.
    async fn get<T: for<'de> Deserialize<'de>>(&self, endpoint: &str) -> Result<T, TmdbError> {
        let separator = if endpoint.contains('?') { '&' } else { '?' };
        let url = format!(
            "{}{}{}api_key={}",
            self.base_url,
            endpoint,
            separator,
            urlencoding::encode(&self.api_key)
        );

        // The URL carries the key, so only the endpoint is logged
        tracing::debug!(endpoint, "TMDB request");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| TmdbError::Network(e.without_url()))?;

        match response.status() {
            StatusCode::OK => {
                let body = response
                    .text()
                    .await
                    .map_err(|e| TmdbError::Network(e.without_url()))?;
                serde_json::from_str(&body)
                    .map_err(|e| TmdbError::Decode(format!("JSON parse error: {}", e)))
            }
            StatusCode::NOT_FOUND => Err(TmdbError::NotFound),
            status => Err(TmdbError::Provider {
                status: status.as_u16(),
            }),
        }
    }

    /// Search movies by title, one provider page at a time (pages start at 1)
    pub async fn search_movies(&self, query: &str, page: u32) -> Result<SearchPage, TmdbError> {
        let endpoint = format!(
            "/search/movie?query={}&page={}",
            urlencoding::encode(query),
            page
        );

        let response: SearchResponse = self.get(&endpoint).await?;
        Ok(response.into_page(page))
    }

    /// List videos attached to a movie
    pub async fn movie_videos(&self, movie_id: u64) -> Result<Vec<Video>, TmdbError> {
        let endpoint = format!("/movie/{}/videos", movie_id);
        let response: VideosResponse = self.get(&endpoint).await?;
        Ok(response.into_videos())
    }
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct SearchResponse {
    page: Option<u32>,
    results: Vec<MovieRaw>,
    total_pages: u32,
}

impl SearchResponse {
    fn into_page(self, requested: u32) -> SearchPage {
        SearchPage {
            page: self.page.unwrap_or(requested),
            results: self.results.into_iter().map(MovieRaw::into_summary).collect(),
            total_pages: self.total_pages,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MovieRaw {
    id: u64,
    title: Option<String>,
    // Some records only carry the original title
    original_title: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
    vote_average: Option<f32>,
    release_date: Option<String>,
}

impl MovieRaw {
    fn into_summary(self) -> MovieSummary {
        MovieSummary {
            id: self.id,
            title: self.title.or(self.original_title).unwrap_or_default(),
            overview: self.overview.unwrap_or_default(),
            poster_path: self.poster_path.filter(|p| !p.is_empty()),
            vote_average: self.vote_average,
            release_date: self.release_date.filter(|d| !d.is_empty()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct VideosResponse {
    results: Vec<VideoRaw>,
}

impl VideosResponse {
    fn into_videos(self) -> Vec<Video> {
        self.results.into_iter().map(VideoRaw::into_video).collect()
    }
}

#[derive(Debug, Deserialize)]
struct VideoRaw {
    site: String,
    #[serde(rename = "type")]
    kind: String,
    key: String,
    name: Option<String>,
}

impl VideoRaw {
    fn into_video(self) -> Video {
        Video {
            site: self.site,
            kind: self.kind,
            key: self.key,
            name: self.name.unwrap_or_default(),
        }
    }
}
