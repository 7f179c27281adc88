//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers for the live fetch
//! path, and temp-dir snapshot stores for the replay path, exercising the
//! crawl cycle end-to-end.

use tempfile::TempDir;
use wiki_ripple::config::{FetchConfig, UserAgentConfig};
use wiki_ripple::crawler::{CrawlController, CrawlMode, StepOutcome};
use wiki_ripple::fetch::{FetchError, Fetcher, SnapshotStore};
use wiki_ripple::index::{Index, SqliteIndex};
use wiki_ripple::url::LinkFilter;
use wiki_ripple::{RippleError, WikiFetcher};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a fetcher whose snapshot store lives in `dir`
fn create_test_fetcher(dir: &TempDir, record_snapshots: bool) -> WikiFetcher {
    let fetch = FetchConfig {
        snapshot_dir: dir.path().to_str().unwrap().to_string(),
        content_selector: "p".to_string(),
        record_snapshots,
    };
    let user_agent = UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: "https://example.com/contact".to_string(),
        contact_email: "test@example.com".to_string(),
    };
    WikiFetcher::new(&fetch, &user_agent).expect("Failed to build fetcher")
}

/// Creates a SQLite index in `dir`
fn create_test_index(dir: &TempDir) -> SqliteIndex {
    SqliteIndex::new(&dir.path().join("index.db")).expect("Failed to open index")
}

/// Mounts an HTML page at `route`
async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            // set_body_raw sets the mime directly; set_body_string would
            // force content-type to text/plain and override any header.
            ResponseTemplate::new(200).set_body_raw(body, "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_live_crawl_indexes_and_follows_links() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    // The mock server's host:port is the "content domain".
    let marker = url::Url::parse(&base_url)
        .unwrap()
        .host_str()
        .unwrap()
        .to_string();

    mount_page(
        &server,
        "/Start",
        format!(
            r#"<html><body>
            <p>Start page links to <a href="{base_url}/Alpha">alpha</a>
            and <a href="{base_url}/Beta">beta</a>
            and <a href="https://other.example/X">elsewhere</a>.</p>
            </body></html>"#
        ),
    )
    .await;
    mount_page(
        &server,
        "/Alpha",
        "<html><body><p>alpha content here</p></body></html>".to_string(),
    )
    .await;
    mount_page(
        &server,
        "/Beta",
        "<html><body><p>beta content here</p></body></html>".to_string(),
    )
    .await;

    let snapshots = TempDir::new().unwrap();
    let db = TempDir::new().unwrap();
    let mut controller = CrawlController::new(
        format!("{base_url}/Start"),
        create_test_fetcher(&snapshots, false),
        create_test_index(&db),
        LinkFilter::new(marker),
    );

    let mut processed = Vec::new();
    while controller.frontier_size() > 0 {
        match controller.crawl_step(CrawlMode::Live).await.unwrap() {
            StepOutcome::Processed(url) => processed.push(url),
            StepOutcome::Skipped(_) => {}
        }
    }

    // BFS order: seed first, then its links in document order.
    assert_eq!(
        processed,
        vec![
            format!("{base_url}/Start"),
            format!("{base_url}/Alpha"),
            format!("{base_url}/Beta"),
        ]
    );

    // The external link never entered the crawl.
    assert!(!controller
        .index()
        .is_indexed("https://other.example/X")
        .unwrap());

    // The linked pages' text is searchable.
    let counts = controller.index().get_counts("content").unwrap();
    assert_eq!(counts.len(), 2);
    assert_eq!(counts.get(&format!("{base_url}/Alpha")), Some(&1));
    assert_eq!(counts.get(&format!("{base_url}/Beta")), Some(&1));
}

#[tokio::test]
async fn test_live_mode_skips_already_indexed_url() {
    let server = MockServer::start().await;
    let base_url = server.uri();
    let marker = url::Url::parse(&base_url)
        .unwrap()
        .host_str()
        .unwrap()
        .to_string();

    // The page links to itself, so it gets queued a second time.
    Mock::given(method("GET"))
        .and(path("/Start"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(
                format!(r#"<p>loop to <a href="{base_url}/Start">self</a></p>"#),
                "text/html",
            ),
        )
        .expect(1) // The second pop must not fetch
        .mount(&server)
        .await;

    let snapshots = TempDir::new().unwrap();
    let db = TempDir::new().unwrap();
    let mut controller = CrawlController::new(
        format!("{base_url}/Start"),
        create_test_fetcher(&snapshots, false),
        create_test_index(&db),
        LinkFilter::new(marker),
    );

    let first = controller.crawl_step(CrawlMode::Live).await.unwrap();
    assert_eq!(first, StepOutcome::Processed(format!("{base_url}/Start")));
    assert_eq!(controller.frontier_size(), 1);

    let second = controller.crawl_step(CrawlMode::Live).await.unwrap();
    assert_eq!(second, StepOutcome::Skipped(format!("{base_url}/Start")));

    // A skipped URL enqueues nothing.
    assert_eq!(controller.frontier_size(), 0);

    // Wiremock verifies expect(1) when the server drops.
}

#[tokio::test]
async fn test_session_cache_prevents_refetch() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    Mock::given(method("GET"))
        .and(path("/Page"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<p>cached once</p>".to_string(), "text/html"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let snapshots = TempDir::new().unwrap();
    let mut fetcher = create_test_fetcher(&snapshots, false);

    let url = format!("{base_url}/Page");
    let first = fetcher.fetch_live(&url).await.unwrap();
    let second = fetcher.fetch_live(&url).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(fetcher.session_cache_len(), 1);
}

#[tokio::test]
async fn test_recorded_snapshots_enable_replay() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_page(
        &server,
        "/Start",
        "<html><body><p>recorded for replay</p></body></html>".to_string(),
    )
    .await;

    let snapshots = TempDir::new().unwrap();
    let url = format!("{base_url}/Start");

    // Live fetch with recording on.
    {
        let mut fetcher = create_test_fetcher(&snapshots, true);
        fetcher.fetch_live(&url).await.unwrap();
    }

    drop(server);

    // A fresh fetcher replays the page with no server running.
    let mut fetcher = create_test_fetcher(&snapshots, false);
    let paragraphs = fetcher.fetch_cached(&url).await.unwrap();
    assert_eq!(paragraphs.len(), 1);
    assert_eq!(paragraphs[0].text(), "recorded for replay");
}

#[tokio::test]
async fn test_replay_end_to_end_scenario() {
    // Seed page with two internal links and one external link, served
    // entirely from the snapshot store.
    let snapshots = TempDir::new().unwrap();
    let store = SnapshotStore::new(snapshots.path());
    store
        .store(
            "https://wiki.example/Start",
            r#"<html><body>
            <p>See <a href="https://wiki.example/Alpha">Alpha</a>
            and <a href="https://wiki.example/Beta">Beta</a>
            and <a href="https://other.example/X">X</a>.</p>
            </body></html>"#,
        )
        .unwrap();

    let db = TempDir::new().unwrap();
    let mut controller = CrawlController::new(
        "https://wiki.example/Start",
        create_test_fetcher(&snapshots, false),
        create_test_index(&db),
        LinkFilter::new("wiki.example"),
    );

    let outcome = controller.crawl_step(CrawlMode::Replay).await.unwrap();
    assert_eq!(
        outcome,
        StepOutcome::Processed("https://wiki.example/Start".to_string())
    );

    // Exactly one page was indexed.
    assert_eq!(controller.index().page_count().unwrap(), 1);
    assert!(controller
        .index()
        .is_indexed("https://wiki.example/Start")
        .unwrap());

    // The frontier holds exactly the internal links, in document order.
    let queued: Vec<&str> = controller.frontier().iter().collect();
    assert_eq!(
        queued,
        vec!["https://wiki.example/Alpha", "https://wiki.example/Beta"]
    );

    // No trace of the external link anywhere.
    assert!(!queued.contains(&"https://other.example/X"));
    assert!(!controller
        .index()
        .is_indexed("https://other.example/X")
        .unwrap());
}

#[tokio::test]
async fn test_replay_pop_sequence_is_deterministic() {
    // Snapshot graph: Start -> [Alpha, Beta], Alpha -> [Beta], Beta -> [].
    let snapshots = TempDir::new().unwrap();
    let store = SnapshotStore::new(snapshots.path());
    store
        .store(
            "https://wiki.example/Start",
            r#"<p><a href="https://wiki.example/Alpha">A</a>
               <a href="https://wiki.example/Beta">B</a></p>"#,
        )
        .unwrap();
    store
        .store(
            "https://wiki.example/Alpha",
            r#"<p><a href="https://wiki.example/Beta">B</a></p>"#,
        )
        .unwrap();
    store
        .store("https://wiki.example/Beta", "<p>leaf page</p>")
        .unwrap();

    let mut runs = Vec::new();
    for _ in 0..2 {
        let db = TempDir::new().unwrap();
        let mut controller = CrawlController::new(
            "https://wiki.example/Start",
            create_test_fetcher(&snapshots, false),
            create_test_index(&db),
            LinkFilter::new("wiki.example"),
        );

        let mut popped = Vec::new();
        while controller.frontier_size() > 0 {
            match controller.crawl_step(CrawlMode::Replay).await.unwrap() {
                StepOutcome::Processed(url) => popped.push(url),
                StepOutcome::Skipped(url) => popped.push(url),
            }
        }
        runs.push(popped);
    }

    assert_eq!(runs[0], runs[1]);
    assert_eq!(
        runs[0],
        vec![
            "https://wiki.example/Start",
            "https://wiki.example/Alpha",
            "https://wiki.example/Beta",
            // Beta was queued by both Start and Alpha; replay re-processes it.
            "https://wiki.example/Beta",
        ]
    );
}

#[tokio::test]
async fn test_live_fetch_failure_propagates_without_side_effects() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    Mock::given(method("GET"))
        .and(path("/Broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let snapshots = TempDir::new().unwrap();
    let db = TempDir::new().unwrap();
    let mut controller = CrawlController::new(
        format!("{base_url}/Broken"),
        create_test_fetcher(&snapshots, false),
        create_test_index(&db),
        LinkFilter::new("127.0.0.1"),
    );

    let result = controller.crawl_step(CrawlMode::Live).await;
    match result {
        Err(RippleError::Fetch(FetchError::Status { status, .. })) => {
            assert_eq!(status, 500);
        }
        other => panic!("expected status error, got {:?}", other),
    }

    // The URL was popped and lost; nothing was indexed, nothing queued.
    assert_eq!(controller.frontier_size(), 0);
    assert_eq!(controller.index().page_count().unwrap(), 0);
}

#[tokio::test]
async fn test_non_html_content_is_rejected() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    Mock::given(method("GET"))
        .and(path("/document.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(vec![0x25, 0x50, 0x44, 0x46]) // %PDF
                .insert_header("content-type", "application/pdf"),
        )
        .mount(&server)
        .await;

    let snapshots = TempDir::new().unwrap();
    let mut fetcher = create_test_fetcher(&snapshots, false);

    let result = fetcher.fetch_live(&format!("{base_url}/document.pdf")).await;
    assert!(matches!(result, Err(FetchError::ContentMismatch { .. })));
}
