//! End-to-end flow tests for Streamify
//!
//! Drives the app state machine through the effect runner against a mock
//! TMDB server: search, pagination, debounced typing, trailers.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::json;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use streamify::api::TmdbClient;
use streamify::app::{App, Completion, Effect, SearchPhase};
use streamify::player::LocalPlayer;
use streamify::runtime::EffectRunner;

const DEBOUNCE: Duration = Duration::from_millis(50);

// =============================================================================
// Harness
// =============================================================================

fn page_body(page: u32, first_id: u64, count: u64, total_pages: u32) -> String {
    let results: Vec<_> = (first_id..first_id + count)
        .map(|id| {
            json!({
                "id": id,
                "title": format!("Movie {}", id),
                "overview": "",
                "poster_path": format!("/{}.jpg", id),
                "vote_average": 6.5,
                "release_date": "2019-04-24"
            })
        })
        .collect();
    json!({ "page": page, "results": results, "total_pages": total_pages }).to_string()
}

async fn mock_page(
    server: &mut ServerGuard,
    query: &str,
    page: u32,
    first_id: u64,
    count: u64,
    total_pages: u32,
) -> Mock {
    server
        .mock("GET", "/search/movie")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("query".into(), query.into()),
            Matcher::UrlEncoded("page".into(), page.to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(page_body(page, first_id, count, total_pages))
        .create_async()
        .await
}

struct Harness {
    app: App,
    runner: EffectRunner,
    rx: UnboundedReceiver<Completion>,
}

impl Harness {
    fn new(server: &ServerGuard) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let client = TmdbClient::with_base_url("test_key", server.url()).expect("client");
        Self {
            app: App::new(),
            runner: EffectRunner::new(client, LocalPlayer::default(), DEBOUNCE, tx),
            rx,
        }
    }

    fn run(&mut self, effects: impl IntoIterator<Item = Effect>) {
        self.runner.run_all(effects);
    }

    fn key(&mut self, code: KeyCode) {
        self.key_with(code, KeyModifiers::empty());
    }

    fn key_with(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        let effects = self.app.handle_key(KeyEvent::new(code, modifiers));
        self.run(effects);
    }

    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.key(KeyCode::Char(c));
        }
    }

    /// Apply one completion, running any follow-up effects
    async fn step(&mut self) {
        let completion = tokio::time::timeout(Duration::from_secs(5), self.rx.recv())
            .await
            .expect("timed out waiting for completion")
            .expect("channel closed");
        let effects = self.app.apply(completion);
        self.run(effects);
    }

    fn result_ids(&self) -> Vec<u64> {
        self.app.search.results.iter().map(|m| m.id).collect()
    }
}

// =============================================================================
// Search & Pagination
// =============================================================================

#[tokio::test]
async fn test_initial_search_then_pagination() {
    let mut server = Server::new_async().await;
    let _p1 = mock_page(&mut server, "avengers", 1, 0, 20, 3).await;
    let _p2 = mock_page(&mut server, "avengers", 2, 20, 20, 3).await;
    let _p3 = mock_page(&mut server, "avengers", 3, 40, 7, 3).await;

    let mut h = Harness::new(&server);

    let effect = h.app.submit_query("avengers");
    h.run(effect);
    assert_eq!(h.app.phase(), SearchPhase::Loading);
    h.step().await;

    assert_eq!(h.app.phase(), SearchPhase::Loaded);
    assert_eq!(h.app.visible_results().len(), 20);
    assert!(h.app.search.has_more);

    // Scrolling to the last card loads page 2
    h.key(KeyCode::End);
    assert_eq!(h.app.phase(), SearchPhase::LoadingMore);
    h.step().await;
    assert_eq!(h.result_ids(), (0..40).collect::<Vec<_>>());

    h.key(KeyCode::Char('n'));
    h.step().await;
    assert_eq!(h.app.search.results.len(), 47);
    assert!(!h.app.search.has_more);
    assert_eq!(h.app.search.page, 3);

    // Nothing left to load
    h.key(KeyCode::Char('n'));
    assert_eq!(h.app.phase(), SearchPhase::Loaded);
}

#[tokio::test]
async fn test_avengers_scenario() {
    let mut server = Server::new_async().await;
    let _p1 = mock_page(&mut server, "avengers", 1, 0, 20, 5).await;
    let _p2 = mock_page(&mut server, "avengers", 2, 20, 20, 5).await;

    let mut h = Harness::new(&server);
    let effect = h.app.submit_query("avengers");
    h.run(effect);
    h.step().await;

    assert_eq!(h.app.visible_results().len(), 20);
    assert!(h.app.search.has_more);

    let effect = h.app.request_next_page();
    h.run(effect);
    h.step().await;
    assert_eq!(h.result_ids(), (0..40).collect::<Vec<_>>());

    let first = h.app.search.results[0].clone();
    h.app.add_to_watchlist(first.clone());
    h.app.add_to_watchlist(first);
    assert_eq!(h.app.watchlist.len(), 1);
}

#[tokio::test]
async fn test_debounced_typing_fetches_once() {
    let mut server = Server::new_async().await;
    let batman = mock_page(&mut server, "batman", 1, 100, 5, 1).await;

    let mut h = Harness::new(&server);

    h.key(KeyCode::Char('/'));
    h.type_text("batman");
    assert!(h.runner.query_pending());
    assert_eq!(h.app.phase(), SearchPhase::Idle);

    // Debounce fires, then the page arrives
    h.step().await;
    assert_eq!(h.app.phase(), SearchPhase::Loading);
    h.step().await;

    assert_eq!(h.app.search.query, "batman");
    assert_eq!(h.result_ids(), (100..105).collect::<Vec<_>>());

    // Enter after the debounce already committed the same query
    h.key(KeyCode::Enter);
    assert_eq!(h.app.phase(), SearchPhase::Loaded);

    batman.assert_async().await;
}

#[tokio::test]
async fn test_enter_cancels_pending_debounce() {
    let mut server = Server::new_async().await;
    let dune = mock_page(&mut server, "dune", 1, 7, 3, 1).await;

    let mut h = Harness::new(&server);

    h.key(KeyCode::Char('/'));
    h.type_text("dune");
    h.key(KeyCode::Enter);
    assert!(!h.runner.query_pending());

    h.step().await;
    assert_eq!(h.result_ids(), vec![7, 8, 9]);

    // No late debounce completion follows
    tokio::time::sleep(DEBOUNCE * 3).await;
    assert!(h.rx.try_recv().is_err());

    dune.assert_async().await;
}

#[tokio::test]
async fn test_queued_commit_does_not_override_enter() {
    let mut server = Server::new_async().await;
    let dun = server
        .mock("GET", "/search/movie")
        .match_query(Matcher::UrlEncoded("query".into(), "dun".into()))
        .expect(0)
        .create_async()
        .await;
    let dune = mock_page(&mut server, "dune", 1, 7, 3, 1).await;

    let mut h = Harness::new(&server);

    h.key(KeyCode::Char('/'));
    h.type_text("dun");
    // The timer fires while the user is still typing
    tokio::time::sleep(DEBOUNCE * 3).await;
    assert!(!h.runner.query_pending());

    h.type_text("e");
    h.key(KeyCode::Enter);

    // Queued "dun" commit, then the "dune" page
    h.step().await;
    assert_eq!(h.app.search.query, "dune");
    h.step().await;
    assert_eq!(h.result_ids(), vec![7, 8, 9]);

    tokio::time::sleep(DEBOUNCE * 3).await;
    assert!(h.rx.try_recv().is_err());

    dun.assert_async().await;
    dune.assert_async().await;
}

#[tokio::test]
async fn test_queued_commit_does_not_override_clear() {
    let mut server = Server::new_async().await;
    let stale = server
        .mock("GET", "/search/movie")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let mut h = Harness::new(&server);

    h.key(KeyCode::Char('/'));
    h.type_text("avengers x");
    tokio::time::sleep(DEBOUNCE * 3).await;

    h.key_with(KeyCode::Char('u'), KeyModifiers::CONTROL);
    h.step().await;

    assert_eq!(h.app.search_input.draft(), "");
    assert_eq!(h.app.phase(), SearchPhase::Idle);
    assert!(h.rx.try_recv().is_err());

    stale.assert_async().await;
}

#[tokio::test]
async fn test_new_query_discards_stale_page() {
    let mut server = Server::new_async().await;
    let _a1 = mock_page(&mut server, "avengers", 1, 0, 20, 5).await;
    let _a2 = mock_page(&mut server, "avengers", 2, 20, 20, 5).await;
    let _b1 = mock_page(&mut server, "batman", 1, 500, 10, 1).await;

    let mut h = Harness::new(&server);

    let effect = h.app.submit_query("avengers");
    h.run(effect);
    h.step().await;

    // Page 2 of A is in flight when B is committed
    let effect = h.app.request_next_page();
    h.run(effect);
    let effect = h.app.submit_query("batman");
    h.run(effect);

    // Both responses arrive, in either order
    h.step().await;
    h.step().await;

    assert_eq!(h.app.search.query, "batman");
    assert_eq!(h.result_ids(), (500..510).collect::<Vec<_>>());
    assert_eq!(h.app.search.page, 1);
}

#[tokio::test]
async fn test_failed_page_can_be_retried() {
    let mut server = Server::new_async().await;
    let _p1 = mock_page(&mut server, "avengers", 1, 0, 20, 5).await;
    let failing = server
        .mock("GET", "/search/movie")
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_status(500)
        .create_async()
        .await;

    let mut h = Harness::new(&server);
    let effect = h.app.submit_query("avengers");
    h.run(effect);
    h.step().await;

    h.key(KeyCode::Char('n'));
    h.step().await;

    assert!(h.app.search.loading.is_error());
    assert_eq!(h.app.search.results.len(), 20);
    assert_eq!(h.app.search.page, 1);
    failing.assert_async().await;

    failing.remove_async().await;
    let _p2 = mock_page(&mut server, "avengers", 2, 20, 20, 5).await;

    h.key(KeyCode::Char('n'));
    h.step().await;
    assert_eq!(h.app.search.results.len(), 40);
    assert!(!h.app.search.loading.is_error());
}

// =============================================================================
// Trailer & Watch List
// =============================================================================

#[tokio::test]
async fn test_trailer_flow() {
    let mut server = Server::new_async().await;
    let _p1 = mock_page(&mut server, "avengers", 1, 1, 2, 1).await;
    let _videos = server
        .mock("GET", "/movie/2/videos")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            r#"{"id": 2, "results": [
                {"site": "YouTube", "type": "Teaser", "key": "tease"},
                {"site": "YouTube", "type": "Trailer", "key": "full"}
            ]}"#,
        )
        .create_async()
        .await;
    let _empty = server
        .mock("GET", "/movie/1/videos")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"id": 1, "results": []}"#)
        .create_async()
        .await;

    let mut h = Harness::new(&server);
    let effect = h.app.submit_query("avengers");
    h.run(effect);
    h.step().await;

    // First movie has no trailer
    h.key(KeyCode::Char('t'));
    h.step().await;
    assert_eq!(h.app.notice.as_deref(), Some("Trailer not available"));
    assert!(!h.app.trailer.is_visible());

    // Second one does; the notice clears on the next key
    h.key(KeyCode::Down);
    assert!(h.app.notice.is_none());
    h.key(KeyCode::Enter);
    h.step().await;

    assert!(h.app.trailer.is_visible());
    assert_eq!(
        h.app.trailer.video_url(),
        Some("https://www.youtube.com/watch?v=full")
    );
    assert_eq!(h.app.trailer_title.as_deref(), Some("Movie 2"));

    h.key(KeyCode::Esc);
    assert!(!h.app.trailer.is_visible());
}

#[tokio::test]
async fn test_watchlist_survives_new_search() {
    let mut server = Server::new_async().await;
    let _a = mock_page(&mut server, "avengers", 1, 0, 3, 1).await;
    let _b = mock_page(&mut server, "batman", 1, 100, 3, 1).await;

    let mut h = Harness::new(&server);
    let effect = h.app.submit_query("avengers");
    h.run(effect);
    h.step().await;

    h.key(KeyCode::Char('a'));
    h.key(KeyCode::Down);
    h.key(KeyCode::Char('a'));
    assert_eq!(h.app.watchlist.len(), 2);

    let effect = h.app.submit_query("batman");
    h.run(effect);
    h.step().await;

    assert_eq!(h.app.watchlist.len(), 2);
    assert!(h.app.watchlist.contains(0));
    assert!(h.app.watchlist.contains(1));
    assert!(!h.app.watchlist.contains(100));
}
