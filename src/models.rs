//! Data structures and types for Streamify
//!
//! Contains the shared models used across the application organized by domain:
//! - **Search**: TMDB movie summaries and search pages
//! - **Videos**: TMDB video listings and trailer selection
//! - **Watch list**: the user's in-memory list of saved movies
//! - **View**: trailer overlay state, preferences and sort keys

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Base URL for TMDB poster images
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/";

/// Poster size segment used by result cards
pub const POSTER_SIZE: &str = "w500";

/// Shown when a movie has no poster
pub const PLACEHOLDER_POSTER_URL: &str = "https://via.placeholder.com/500x750?text=No+Image";

/// Watch URL template for the video host
pub const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// The only video host trailers are played from
pub const TRAILER_SITE: &str = "YouTube";

// =============================================================================
// Search Models (TMDB)
// =============================================================================

/// Movie summary from TMDB movie search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub vote_average: Option<f32>,
    pub release_date: Option<String>,
}

impl MovieSummary {
    /// Release year, taken from the leading digits of the release date
    pub fn year(&self) -> Option<u16> {
        self.release_date.as_deref().and_then(extract_year)
    }

    /// Full poster URL for the given size segment (e.g. "w500")
    pub fn poster_url(&self, size: &str) -> String {
        match self.poster_path.as_deref() {
            Some(path) if !path.is_empty() => format!("{}{}{}", IMAGE_BASE_URL, size, path),
            _ => PLACEHOLDER_POSTER_URL.to_string(),
        }
    }

    /// Rating label for cards; zero ratings are unrated on TMDB
    pub fn rating_label(&self) -> String {
        match self.vote_average {
            Some(r) if r > 0.0 => format!("{:.1}", r),
            _ => "N/A".to_string(),
        }
    }

    /// Overview text or a fallback line
    pub fn overview_or_default(&self) -> &str {
        if self.overview.trim().is_empty() {
            "No description available."
        } else {
            &self.overview
        }
    }
}

impl fmt::Display for MovieSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year_str = self.year().map(|y| format!(" ({})", y)).unwrap_or_default();
        write!(f, "{}{} ★ {}", self.title, year_str, self.rating_label())
    }
}

/// One page of search results
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchPage {
    pub page: u32,
    pub results: Vec<MovieSummary>,
    pub total_pages: u32,
}

impl SearchPage {
    /// Whether the provider has pages after this one
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}

// =============================================================================
// Video Models (TMDB)
// =============================================================================

/// Video entry from the TMDB video listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub site: String,
    /// Video category ("Trailer", "Teaser", "Clip", ...)
    pub kind: String,
    pub key: String,
    pub name: String,
}

impl Video {
    /// Canonical watch URL on the video host
    pub fn watch_url(&self) -> String {
        format!("{}{}", YOUTUBE_WATCH_URL, self.key)
    }

    fn is_hosted(&self) -> bool {
        self.site == TRAILER_SITE
    }
}

/// Pick the video to play for a movie.
///
/// The host constraint comes first: only YouTube entries qualify. Among those a
/// "Trailer" wins over a "Teaser"; the first match in provider order is taken.
pub fn select_trailer(videos: &[Video]) -> Option<&Video> {
    let hosted = || videos.iter().filter(|v| v.is_hosted());
    hosted()
        .find(|v| v.kind == "Trailer")
        .or_else(|| hosted().find(|v| v.kind == "Teaser"))
}

// =============================================================================
// Watch List
// =============================================================================

/// User-curated list of movies, unique by id, in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Watchlist {
    items: Vec<MovieSummary>,
}

impl Watchlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a movie; returns false if it was already present
    pub fn add(&mut self, movie: MovieSummary) -> bool {
        if self.contains(movie.id) {
            return false;
        }
        self.items.push(movie);
        true
    }

    /// Remove a movie by id; returns false if it was absent
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|m| m.id != id);
        self.items.len() != before
    }

    pub fn contains(&self, id: u64) -> bool {
        self.items.iter().any(|m| m.id == id)
    }

    pub fn items(&self) -> &[MovieSummary] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// View Models
// =============================================================================

/// Trailer overlay state.
///
/// Fields are private so a visible overlay always carries a URL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrailerState {
    video_url: Option<String>,
    visible: bool,
}

impl TrailerState {
    pub fn hidden() -> Self {
        Self::default()
    }

    pub fn show(url: impl Into<String>) -> Self {
        Self {
            video_url: Some(url.into()),
            visible: true,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn video_url(&self) -> Option<&str> {
        self.video_url.as_deref()
    }
}

/// Process-local UI preferences
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preferences {
    pub dark_mode: bool,
}

/// Display ordering for result lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Provider order
    #[default]
    None,
    /// Highest rating first
    Rating,
    /// Most recent release first
    Latest,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::None, SortKey::Rating, SortKey::Latest];

    /// Next key in the cycle None -> Rating -> Latest -> None
    pub fn next(self) -> Self {
        match self {
            SortKey::None => SortKey::Rating,
            SortKey::Rating => SortKey::Latest,
            SortKey::Latest => SortKey::None,
        }
    }

    /// Stable sort of a snapshot; the input slice is never reordered.
    /// Movies missing the sort field go last.
    pub fn apply<'a>(self, movies: &'a [MovieSummary]) -> Vec<&'a MovieSummary> {
        let mut sorted: Vec<&MovieSummary> = movies.iter().collect();
        match self {
            SortKey::None => {}
            SortKey::Rating => sorted.sort_by(|a, b| desc_some_first(a.vote_average, b.vote_average)),
            SortKey::Latest => sorted.sort_by(|a, b| {
                desc_some_first(a.release_date.as_deref(), b.release_date.as_deref())
            }),
        }
        sorted
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::None => write!(f, "Default"),
            SortKey::Rating => write!(f, "Rating (High → Low)"),
            SortKey::Latest => write!(f, "Latest Release"),
        }
    }
}

fn desc_some_first<T: PartialOrd>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Extract year from a date string like "2022-03-04"
pub fn extract_year(date: &str) -> Option<u16> {
    date.get(..4).and_then(|y| y.parse().ok())
}
