//! Integration tests for Streamify
//!
//! Tests are organized by component:
//! - tmdb_test: TMDB API client against a mock server
//! - ui_test: Full-screen rendering into a test backend
//! - e2e_test: Search, pagination, debounced typing and trailers through the
//!   effect runner

// Note: Each test file is a separate integration test crate
// Tests are run individually by cargo, not via mod.rs
