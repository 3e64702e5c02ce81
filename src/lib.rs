//! Streamify - movie discovery in the terminal
//!
//! Search TMDB with a debounced query box, page through results, keep a
//! watch list, and play trailers in a local player.
//!
//! # Modules
//!
//! - `models` - Movies, pages, videos, watch list, sort keys
//! - `api` - TMDB client
//! - `app` - Application state machine and key handling
//! - `runtime` - Runs the effects the app asks for
//! - `debounce` - Trailing-edge debouncer for search input
//! - `player` - Local trailer playback
//! - `ui` - TUI components
//! - `config`, `cli`, `logging` - Startup plumbing

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod debounce;
pub mod logging;
pub mod models;
pub mod player;
pub mod runtime;
pub mod ui;

// Re-export commonly used types
pub use models::{MovieSummary, Preferences, SearchPage, SortKey, TrailerState, Video, Watchlist};

pub use api::{TmdbClient, TmdbError};
pub use app::{App, Completion, Effect};
