//! App state and core application logic
//!
//! Owns every piece of mutable state: the search/pagination state machine,
//! the watch list, the trailer overlay and view preferences. Operations are
//! plain state transitions that return the side effects to perform, so the
//! whole state machine runs without a terminal or a network.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

use crate::api::TmdbError;
use crate::models::*;
use crate::ui::search::{DraftChange, SearchInput};
use crate::ui::trailer::overlay_area;
use crate::ui::Theme;

/// Cards moved by PageUp/PageDown
const PAGE_JUMP: usize = 10;

// =============================================================================
// Input Mode & Focus
// =============================================================================

/// Current input mode for keyboard handling
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Text input mode (search box focused)
    Editing,
}

/// Which list receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Results,
    Watchlist,
}

// =============================================================================
// Loading State
// =============================================================================

/// Loading state for async operations
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadingState {
    /// Idle - no loading in progress
    #[default]
    Idle,
    /// Loading with optional message
    Loading(Option<String>),
    /// Last operation failed
    Error(String),
}

impl LoadingState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LoadingState::Error(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            LoadingState::Loading(Some(msg)) => Some(msg),
            LoadingState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

// =============================================================================
// Selection State (per-list)
// =============================================================================

/// Selection state for list views
#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// Currently selected index
    pub selected: usize,
    /// Total number of items
    pub len: usize,
}

impl ListState {
    pub fn new(len: usize) -> Self {
        Self { selected: 0, len }
    }

    /// Move selection up
    pub fn up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move selection down
    pub fn down(&mut self) {
        if self.len > 0 && self.selected < self.len - 1 {
            self.selected += 1;
        }
    }

    /// Move selection up by a page
    pub fn page_up(&mut self, page_size: usize) {
        self.selected = self.selected.saturating_sub(page_size);
    }

    /// Move selection down by a page
    pub fn page_down(&mut self, page_size: usize) {
        if self.len > 0 {
            self.selected = (self.selected + page_size).min(self.len - 1);
        }
    }

    /// Jump to first item
    pub fn first(&mut self) {
        self.selected = 0;
    }

    /// Jump to last item
    pub fn last(&mut self) {
        if self.len > 0 {
            self.selected = self.len - 1;
        }
    }

    /// Selection sits on the final item
    pub fn is_at_end(&self) -> bool {
        self.len > 0 && self.selected == self.len - 1
    }

    /// Reset selection
    pub fn reset(&mut self) {
        self.selected = 0;
    }

    /// Update length (e.g., when new results come in)
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        // Clamp selected to valid range
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

// =============================================================================
// Requests, Effects, Completions
// =============================================================================

/// Identifies one page fetch. The ticket is unique per request, so a response
/// is current only if it carries the exact request the app is waiting for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub query: String,
    pub page: u32,
    pub ticket: u64,
}

/// Identifies one video-listing fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailerRequest {
    pub movie_id: u64,
    pub title: String,
    pub ticket: u64,
}

/// Side effect requested by a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// (Re)start the quiet period for a draft query
    ScheduleQuery(String),
    /// Drop any pending debounced query
    CancelScheduledQuery,
    /// Fetch one page of search results
    FetchPage(PageRequest),
    /// Fetch the video listing for a movie
    FetchTrailer(TrailerRequest),
    /// Launch the local player on a URL
    PlayTrailer(String),
    /// Open a URL with the system opener
    OpenInBrowser(String),
}

/// Result of an effect, fed back into the app on the UI thread
#[derive(Debug)]
pub enum Completion {
    /// The debounce quiet period elapsed for this query
    QueryCommitted(String),
    PageLoaded(PageRequest, Result<SearchPage, TmdbError>),
    TrailerLoaded(TrailerRequest, Result<Vec<Video>, TmdbError>),
    /// Player or URL opener could not start
    PlaybackFailed(String),
}

// =============================================================================
// Search State
// =============================================================================

/// Observable phase of the search state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// Blank query, or nothing loaded for the committed query
    Idle,
    /// Fetching page 1
    Loading,
    /// At least page 1 is displayed
    Loaded,
    /// Fetching a page after the first
    LoadingMore,
    /// Last fetch failed; any results already shown are kept
    Error,
}

/// Committed query, pagination bookkeeping and accumulated results
#[derive(Debug, Clone)]
pub struct SearchState {
    /// Committed query (trimmed)
    pub query: String,
    /// Page number last requested (≥ 1)
    pub page: u32,
    /// Results in provider order across pages
    pub results: Vec<MovieSummary>,
    pub has_more: bool,
    pub loading: LoadingState,
    /// Page 1 of the current query has been received
    pub loaded: bool,
    /// The request the app is waiting for, if any
    pending: Option<PageRequest>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: 1,
            results: Vec::new(),
            has_more: false,
            loading: LoadingState::Idle,
            loaded: false,
            pending: None,
        }
    }
}

impl SearchState {
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&PageRequest> {
        self.pending.as_ref()
    }
}

// =============================================================================
// Main Application State
// =============================================================================

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Whether the app is running
    pub running: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// List receiving navigation keys
    pub focus: Focus,
    /// User-visible notice (trailer unavailable, playback failure)
    pub notice: Option<String>,

    pub search_input: SearchInput,
    pub search: SearchState,
    pub results_list: ListState,

    pub watchlist: Watchlist,
    pub watchlist_list: ListState,

    pub trailer: TrailerState,
    /// Title of the movie whose trailer is shown
    pub trailer_title: Option<String>,
    pending_trailer: Option<TrailerRequest>,

    pub preferences: Preferences,
    pub sort: SortKey,

    next_ticket: u64,
}

impl Default for App {
    fn default() -> Self {
        Self {
            running: true,
            input_mode: InputMode::Normal,
            focus: Focus::Results,
            notice: None,

            search_input: SearchInput::new(),
            search: SearchState::default(),
            results_list: ListState::new(0),

            watchlist: Watchlist::new(),
            watchlist_list: ListState::new(0),

            trailer: TrailerState::hidden(),
            trailer_title: None,
            pending_trailer: None,

            preferences: Preferences::default(),
            sort: SortKey::None,

            next_ticket: 0,
        }
    }
}

impl App {
    /// Create a new App instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an App with initial preferences
    pub fn with_preferences(preferences: Preferences) -> Self {
        Self {
            preferences,
            ..Self::default()
        }
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Palette for the current dark-mode preference
    pub fn theme(&self) -> Theme {
        Theme::for_mode(self.preferences.dark_mode)
    }

    fn ticket(&mut self) -> u64 {
        self.next_ticket += 1;
        self.next_ticket
    }

    pub fn phase(&self) -> SearchPhase {
        match &self.search.pending {
            Some(req) if req.page == 1 => SearchPhase::Loading,
            Some(_) => SearchPhase::LoadingMore,
            None if self.search.loading.is_error() => SearchPhase::Error,
            None if self.search.loaded => SearchPhase::Loaded,
            None => SearchPhase::Idle,
        }
    }

    // -------------------------------------------------------------------------
    // Search & Pagination
    // -------------------------------------------------------------------------

    /// Commit a query.
    ///
    /// Blank text clears the results and returns to idle without fetching.
    /// Re-committing the current query is ignored while it is loading or
    /// loaded; after a failed fetch it starts over from page 1.
    pub fn submit_query(&mut self, text: &str) -> Option<Effect> {
        let query = text.trim();

        if query.is_empty() {
            tracing::debug!("query cleared");
            self.search = SearchState::default();
            self.results_list = ListState::new(0);
            return None;
        }

        let retry = self.search.loading.is_error();
        if query == self.search.query && !retry && (self.search.is_loading() || self.search.loaded) {
            tracing::trace!(query, "query unchanged, not refetching");
            return None;
        }

        let request = PageRequest {
            query: query.to_string(),
            page: 1,
            ticket: self.ticket(),
        };

        tracing::info!(query, ticket = request.ticket, "new search");

        self.search = SearchState {
            query: query.to_string(),
            loading: LoadingState::Loading(Some(format!("Searching for \"{}\"...", query))),
            pending: Some(request.clone()),
            ..SearchState::default()
        };
        self.results_list = ListState::new(0);
        self.focus = Focus::Results;

        Some(Effect::FetchPage(request))
    }

    /// Clear the committed query and the draft
    pub fn clear_query(&mut self) {
        self.search_input.clear();
        self.submit_query("");
    }

    /// Ask for the page after the last one loaded
    pub fn request_next_page(&mut self) -> Option<Effect> {
        if !self.search.has_more || self.search.is_loading() || !self.search.loaded {
            return None;
        }

        let request = PageRequest {
            query: self.search.query.clone(),
            page: self.search.page + 1,
            ticket: self.ticket(),
        };

        tracing::debug!(query = %request.query, page = request.page, "loading next page");

        self.search.page = request.page;
        self.search.loading = LoadingState::Loading(Some("Loading more movies...".into()));
        self.search.pending = Some(request.clone());

        Some(Effect::FetchPage(request))
    }

    /// Apply a page response.
    ///
    /// Responses for anything other than the pending request are stale and
    /// dropped without touching state.
    pub fn page_loaded(&mut self, request: PageRequest, result: Result<SearchPage, TmdbError>) {
        if self.search.pending.as_ref() != Some(&request) {
            tracing::debug!(
                query = %request.query,
                page = request.page,
                ticket = request.ticket,
                "discarding stale page response"
            );
            return;
        }
        self.search.pending = None;

        match result {
            Ok(page) => {
                let received = page.results.len();
                if request.page == 1 {
                    self.search.results = page.results;
                } else {
                    self.search.results.extend(page.results);
                }
                self.search.has_more = request.page < page.total_pages;
                self.search.loaded = true;
                self.search.loading = LoadingState::Idle;
                self.results_list.set_len(self.search.results.len());

                tracing::info!(
                    query = %request.query,
                    page = request.page,
                    received,
                    total_pages = page.total_pages,
                    "page loaded"
                );
            }
            Err(e) => {
                tracing::warn!(
                    query = %request.query,
                    page = request.page,
                    kind = e.kind(),
                    error = %e,
                    "page fetch failed"
                );
                self.search.page = request.page.saturating_sub(1).max(1);
                self.search.loading = LoadingState::Error(format!("Search failed: {}", e));
            }
        }
    }

    // -------------------------------------------------------------------------
    // Trailer
    // -------------------------------------------------------------------------

    /// Start a trailer lookup for a movie; supersedes any earlier lookup
    pub fn resolve_trailer(&mut self, movie: &MovieSummary) -> Effect {
        let request = TrailerRequest {
            movie_id: movie.id,
            title: movie.title.clone(),
            ticket: self.ticket(),
        };
        tracing::debug!(movie_id = movie.id, "resolving trailer");
        self.pending_trailer = Some(request.clone());
        Effect::FetchTrailer(request)
    }

    pub fn is_resolving_trailer(&self) -> bool {
        self.pending_trailer.is_some()
    }

    /// Apply a video-listing response
    pub fn trailer_loaded(&mut self, request: TrailerRequest, result: Result<Vec<Video>, TmdbError>) {
        if self.pending_trailer.as_ref() != Some(&request) {
            tracing::debug!(movie_id = request.movie_id, "discarding stale trailer response");
            return;
        }
        self.pending_trailer = None;

        match result {
            Ok(videos) => match select_trailer(&videos) {
                Some(video) => {
                    tracing::info!(movie_id = request.movie_id, kind = %video.kind, "trailer resolved");
                    self.trailer = TrailerState::show(video.watch_url());
                    self.trailer_title = Some(request.title);
                }
                None => {
                    tracing::info!(
                        movie_id = request.movie_id,
                        videos = videos.len(),
                        "no playable trailer"
                    );
                    self.notice = Some("Trailer not available".into());
                }
            },
            Err(TmdbError::NotFound) => {
                tracing::info!(movie_id = request.movie_id, "movie has no video listing");
                self.notice = Some("Trailer not available".into());
            }
            Err(e) => {
                tracing::warn!(
                    movie_id = request.movie_id,
                    kind = e.kind(),
                    error = %e,
                    "trailer fetch failed"
                );
                self.notice = Some(format!("Could not load trailer: {}", e));
            }
        }
    }

    /// Hide the trailer overlay
    pub fn close_trailer(&mut self) {
        self.trailer = TrailerState::hidden();
        self.trailer_title = None;
    }

    // -------------------------------------------------------------------------
    // Watch List & Preferences
    // -------------------------------------------------------------------------

    /// Add a movie; no-op if it is already saved
    pub fn add_to_watchlist(&mut self, movie: MovieSummary) -> bool {
        let id = movie.id;
        let added = self.watchlist.add(movie);
        if added {
            tracing::debug!(movie_id = id, "added to watch list");
            self.watchlist_list.set_len(self.watchlist.len());
        }
        added
    }

    /// Remove a movie by id; no-op if absent
    pub fn remove_from_watchlist(&mut self, id: u64) -> bool {
        let removed = self.watchlist.remove(id);
        if removed {
            tracing::debug!(movie_id = id, "removed from watch list");
            self.watchlist_list.set_len(self.watchlist.len());
            if self.watchlist.is_empty() {
                self.focus = Focus::Results;
            }
        }
        removed
    }

    pub fn toggle_dark_mode(&mut self) {
        self.preferences.dark_mode = !self.preferences.dark_mode;
    }

    /// Change the display order; selection restarts at the top
    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.results_list.reset();
        self.watchlist_list.reset();
    }

    pub fn cycle_sort(&mut self) {
        self.set_sort(self.sort.next());
    }

    /// Results in display order
    pub fn visible_results(&self) -> Vec<&MovieSummary> {
        self.sort.apply(&self.search.results)
    }

    /// Watch list in display order
    pub fn visible_watchlist(&self) -> Vec<&MovieSummary> {
        self.sort.apply(self.watchlist.items())
    }

    /// Movie under the cursor in the focused list
    pub fn selected_movie(&self) -> Option<&MovieSummary> {
        match self.focus {
            Focus::Results => self.visible_results().get(self.results_list.selected).copied(),
            Focus::Watchlist => self
                .visible_watchlist()
                .get(self.watchlist_list.selected)
                .copied(),
        }
    }

    /// Save or unsave the selected movie
    pub fn toggle_selected_in_watchlist(&mut self) {
        if let Some(movie) = self.selected_movie().cloned() {
            if self.watchlist.contains(movie.id) {
                self.remove_from_watchlist(movie.id);
            } else {
                self.add_to_watchlist(movie);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Completions
    // -------------------------------------------------------------------------

    /// Feed an effect result back into the state machine
    pub fn apply(&mut self, completion: Completion) -> Vec<Effect> {
        match completion {
            Completion::QueryCommitted(query) => {
                // A commit queued before Enter or Ctrl+U no longer matches the draft
                if self.search_input.submit().as_deref() != Some(query.as_str()) {
                    tracing::debug!(query = %query, "discarding superseded debounced query");
                    return Vec::new();
                }
                self.submit_query(&query).into_iter().collect()
            }
            Completion::PageLoaded(request, result) => {
                self.page_loaded(request, result);
                Vec::new()
            }
            Completion::TrailerLoaded(request, result) => {
                self.trailer_loaded(request, result);
                Vec::new()
            }
            Completion::PlaybackFailed(msg) => {
                self.notice = Some(msg);
                Vec::new()
            }
        }
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle keyboard event, returns the effects to run
    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        // Clear notice on any keypress
        self.notice = None;

        // Global quit shortcut
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return Vec::new();
        }

        if self.trailer.is_visible() {
            return self.handle_trailer_key(key);
        }

        if self.input_mode == InputMode::Editing {
            self.handle_editing_key(key)
        } else {
            self.handle_normal_key(key)
        }
    }

    /// Handle keys in editing (text input) mode
    fn handle_editing_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        let change = match key.code {
            KeyCode::Esc => {
                self.leave_editing();
                return Vec::new();
            }
            KeyCode::Enter => {
                self.leave_editing();
                let mut effects = vec![Effect::CancelScheduledQuery];
                if let Some(query) = self.search_input.submit() {
                    effects.extend(self.submit_query(&query));
                }
                return effects;
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.clear_query();
                return vec![Effect::CancelScheduledQuery];
            }
            KeyCode::Char(c) => self.search_input.insert(c),
            KeyCode::Backspace => self.search_input.backspace(),
            KeyCode::Delete => self.search_input.delete(),
            KeyCode::Left => {
                self.search_input.cursor_left();
                DraftChange::Unchanged
            }
            KeyCode::Right => {
                self.search_input.cursor_right();
                DraftChange::Unchanged
            }
            KeyCode::Home => {
                self.search_input.cursor_home();
                DraftChange::Unchanged
            }
            KeyCode::End => {
                self.search_input.cursor_end();
                DraftChange::Unchanged
            }
            _ => DraftChange::Unchanged,
        };

        match change {
            DraftChange::Query(query) => vec![Effect::ScheduleQuery(query)],
            DraftChange::Blank => vec![Effect::CancelScheduledQuery],
            DraftChange::Unchanged => Vec::new(),
        }
    }

    /// Focus search input
    pub fn focus_search(&mut self) {
        self.input_mode = InputMode::Editing;
        self.search_input.focused = true;
    }

    fn leave_editing(&mut self) {
        self.input_mode = InputMode::Normal;
        self.search_input.focused = false;
    }

    /// Handle keys in normal navigation mode
    fn handle_normal_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                Vec::new()
            }
            KeyCode::Char('/') | KeyCode::Char('s') => {
                self.focus_search();
                Vec::new()
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Focus::Results if !self.watchlist.is_empty() => Focus::Watchlist,
                    _ => Focus::Results,
                };
                Vec::new()
            }
            KeyCode::Up | KeyCode::Char('k') => self.navigate(ListState::up),
            KeyCode::Down | KeyCode::Char('j') => self.navigate(ListState::down),
            KeyCode::PageUp => self.navigate(|l| l.page_up(PAGE_JUMP)),
            KeyCode::PageDown => self.navigate(|l| l.page_down(PAGE_JUMP)),
            KeyCode::Home | KeyCode::Char('g') => self.navigate(ListState::first),
            KeyCode::End | KeyCode::Char('G') => self.navigate(ListState::last),
            KeyCode::Char('n') => self.request_next_page().into_iter().collect(),
            KeyCode::Char('a') => {
                if let Some(movie) = self.selected_movie().cloned() {
                    self.add_to_watchlist(movie);
                }
                Vec::new()
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = self.selected_movie().map(|m| m.id) {
                    self.remove_from_watchlist(id);
                }
                Vec::new()
            }
            KeyCode::Char('w') | KeyCode::Char(' ') => {
                self.toggle_selected_in_watchlist();
                Vec::new()
            }
            KeyCode::Enter | KeyCode::Char('t') => match self.selected_movie().cloned() {
                Some(movie) => vec![self.resolve_trailer(&movie)],
                None => Vec::new(),
            },
            KeyCode::Char('o') => {
                self.cycle_sort();
                Vec::new()
            }
            KeyCode::Char('m') => {
                self.toggle_dark_mode();
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    /// Move the focused selection; reaching the last result loads the next page
    fn navigate(&mut self, step: impl FnOnce(&mut ListState)) -> Vec<Effect> {
        match self.focus {
            Focus::Results => {
                step(&mut self.results_list);
                if self.results_list.is_at_end() {
                    return self.request_next_page().into_iter().collect();
                }
            }
            Focus::Watchlist => step(&mut self.watchlist_list),
        }
        Vec::new()
    }

    /// Keys while the trailer overlay is open
    fn handle_trailer_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        let url = self.trailer.video_url().map(str::to_string);
        match (key.code, url) {
            (KeyCode::Esc | KeyCode::Char('x') | KeyCode::Char('q'), _) => {
                self.close_trailer();
                Vec::new()
            }
            (KeyCode::Char('p') | KeyCode::Enter, Some(url)) => vec![Effect::PlayTrailer(url)],
            (KeyCode::Char('o'), Some(url)) => vec![Effect::OpenInBrowser(url)],
            _ => Vec::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Mouse Event Handling
    // -------------------------------------------------------------------------

    /// Handle mouse input; `screen` is the full terminal area
    pub fn handle_mouse(&mut self, event: MouseEvent, screen: Rect) -> Vec<Effect> {
        let position = Position::new(event.column, event.row);

        if self.trailer.is_visible() {
            if let MouseEventKind::Down(MouseButton::Left) = event.kind {
                if !overlay_area(screen).contains(position) {
                    self.close_trailer();
                }
            }
            return Vec::new();
        }

        match event.kind {
            MouseEventKind::ScrollDown => self.navigate(ListState::down),
            MouseEventKind::ScrollUp => self.navigate(ListState::up),
            _ => Vec::new(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
