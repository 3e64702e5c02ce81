//! API clients for external services
//!
//! - TMDB: movie search and video listings

pub mod tmdb;

pub use tmdb::{TmdbClient, TmdbError};
