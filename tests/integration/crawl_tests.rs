//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use scoped_crawl::config::{Config, CrawlerConfig, HttpConfig, StorageConfig};
use scoped_crawl::crawler::{run_crawl, run_crawl_with_store, NodeOutcome};
use scoped_crawl::state::NodeState;
use scoped_crawl::storage::{SqliteStore, VisitedStore};
use std::collections::BTreeSet;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with the given seeds and depth budget
fn create_test_config(seeds: Vec<String>, max_depth: u32, db_path: &str) -> Config {
    Config {
        seeds,
        crawler: CrawlerConfig {
            max_depth,
            max_concurrent_fetches: None,
        },
        storage: StorageConfig {
            database_path: db_path.to_string(),
        },
        http: HttpConfig {
            user_agent: Some("TestBot/1.0".to_string()),
        },
    }
}

fn memory_store() -> Arc<SqliteStore> {
    Arc::new(SqliteStore::open_in_memory().expect("Failed to open in-memory store"))
}

/// Mounts an HTML page that must be requested exactly `hits` times
async fn mount_page(server: &MockServer, route: &str, body: String, hits: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .expect(hits)
        .named(route)
        .mount(server)
        .await;
}

async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|requests| requests.len())
        .unwrap_or(0)
}

#[tokio::test]
async fn test_scenario_single_in_domain_child() {
    let site = MockServer::start().await;
    let external = MockServer::start().await;
    let base = site.uri();

    // Same IP, different host name: a different origin
    let external_link = format!("http://localhost:{}/x", external.address().port());
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&external)
        .await;

    mount_page(
        &site,
        "/",
        format!(
            r#"<html><body>
            <a href="/about">About</a>
            <a href="{external_link}">External</a>
            <a href="{base}/about">About again</a>
            </body></html>"#
        ),
        1,
    )
    .await;
    mount_page(&site, "/about", "<html><body>About us</body></html>".to_string(), 1).await;

    let config = create_test_config(vec![format!("{}/", base)], 2, ":memory:");
    let report = run_crawl_with_store(&config, memory_store())
        .await
        .expect("Crawl failed");

    let expected: BTreeSet<String> = [format!("{}/about", base)].into_iter().collect();
    assert_eq!(report.seeds.len(), 1);
    assert_eq!(report.seeds[0].outcome.children(), &expected);
    assert_eq!(report.stats.links_discovered, 3);
    assert_eq!(report.stats.children_accepted, 1);
    assert_eq!(report.stats.fetched, 2);
}

#[tokio::test]
async fn test_duplicate_seeds_fetch_once() {
    let site = MockServer::start().await;
    mount_page(&site, "/", "<html><body>home</body></html>".to_string(), 1).await;

    let seed = format!("{}/", site.uri());
    let config = create_test_config(vec![seed.clone(), seed], 2, ":memory:");
    let report = run_crawl_with_store(&config, memory_store())
        .await
        .expect("Crawl failed");

    let states: Vec<NodeState> = report.seeds.iter().map(|s| s.outcome.state()).collect();
    assert!(states.contains(&NodeState::Completed));
    assert!(states.contains(&NodeState::AlreadyVisited));
    assert_eq!(report.stats.claimed, 1);
}

#[tokio::test]
async fn test_shared_child_of_many_parents_fetched_once() {
    let site = MockServer::start().await;

    mount_page(
        &site,
        "/",
        r#"<a href="/a">A</a><a href="/b">B</a><a href="/c">C</a>"#.to_string(),
        1,
    )
    .await;
    for parent in ["/a", "/b", "/c"] {
        mount_page(
            &site,
            parent,
            r#"<a href="/shared">Shared</a><a href="/">Home</a>"#.to_string(),
            1,
        )
        .await;
    }
    mount_page(&site, "/shared", "<p>shared</p>".to_string(), 1).await;

    let config = create_test_config(vec![format!("{}/", site.uri())], 3, ":memory:");
    let report = run_crawl_with_store(&config, memory_store())
        .await
        .expect("Crawl failed");

    assert_eq!(report.stats.fetched, 5);
    assert_eq!(request_count(&site).await, 5);
}

#[tokio::test]
async fn test_depth_budget_stops_fetching() {
    let site = MockServer::start().await;

    mount_page(&site, "/", r#"<a href="/1">1</a>"#.to_string(), 1).await;
    mount_page(&site, "/1", r#"<a href="/2">2</a>"#.to_string(), 1).await;
    mount_page(&site, "/2", r#"<a href="/3">3</a>"#.to_string(), 0).await;
    mount_page(&site, "/3", "<p>too deep</p>".to_string(), 0).await;

    let store = memory_store();
    let config = create_test_config(vec![format!("{}/", site.uri())], 2, ":memory:");
    run_crawl_with_store(&config, store.clone())
        .await
        .expect("Crawl failed");

    // /2 was reached with budget 0: claimed but never fetched
    assert!(store.contains(&format!("{}/2", site.uri())).unwrap());
    assert!(!store.contains(&format!("{}/3", site.uri())).unwrap());
    assert_eq!(store.count().unwrap(), 3);
}

#[tokio::test]
async fn test_seed_with_zero_depth_is_claimed_not_fetched() {
    let site = MockServer::start().await;
    mount_page(&site, "/", r#"<a href="/child">c</a>"#.to_string(), 0).await;

    let store = memory_store();
    let seed = format!("{}/", site.uri());
    let config = create_test_config(vec![seed.clone()], 0, ":memory:");
    let report = run_crawl_with_store(&config, store.clone())
        .await
        .expect("Crawl failed");

    assert_eq!(report.seeds[0].outcome, NodeOutcome::DepthExhausted);
    assert!(report.seeds[0].outcome.children().is_empty());
    assert!(store.contains(&seed).unwrap());
}

#[tokio::test]
async fn test_failed_fetch_prunes_only_its_branch() {
    let site = MockServer::start().await;

    mount_page(
        &site,
        "/",
        r#"<a href="/broken">Broken</a><a href="/ok">OK</a><a href="/missing">Missing</a>"#
            .to_string(),
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(
            ResponseTemplate::new(500).set_body_string(r#"<a href="/hidden">hidden</a>"#),
        )
        .expect(1)
        .mount(&site)
        .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&site)
        .await;
    mount_page(&site, "/ok", r#"<a href="/deeper">Deeper</a>"#.to_string(), 1).await;
    mount_page(&site, "/deeper", "<p>end</p>".to_string(), 1).await;
    mount_page(&site, "/hidden", "<p>never linked</p>".to_string(), 0).await;

    let config = create_test_config(vec![format!("{}/", site.uri())], 3, ":memory:");
    let report = run_crawl_with_store(&config, memory_store())
        .await
        .expect("Crawl must not fail because of fetch errors");

    assert_eq!(report.seeds[0].outcome.children().len(), 3);
    assert_eq!(report.stats.fetch_failures, 2);
    assert_eq!(report.stats.fetched, 3);
}

#[tokio::test]
async fn test_unreachable_seed_is_not_an_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let config = create_test_config(vec![format!("http://127.0.0.1:{}/", port)], 2, ":memory:");
    let report = run_crawl_with_store(&config, memory_store())
        .await
        .expect("Crawl failed");

    assert_eq!(
        report.seeds[0].outcome,
        NodeOutcome::Completed {
            status_code: None,
            fetch_succeeded: false,
            children: BTreeSet::new(),
        }
    );
}

#[tokio::test]
async fn test_visited_set_persists_across_runs() {
    let site = MockServer::start().await;
    mount_page(&site, "/", r#"<a href="/page1">1</a>"#.to_string(), 1).await;
    mount_page(&site, "/page1", "<p>one</p>".to_string(), 1).await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("db").join("db.sqlite");
    let config = create_test_config(
        vec![format!("{}/", site.uri())],
        2,
        db_path.to_str().unwrap(),
    );

    let first = run_crawl(&config).await.expect("First crawl failed");
    assert_eq!(first.stats.fetched, 2);

    let second = run_crawl(&config).await.expect("Second crawl failed");
    assert_eq!(second.seeds[0].outcome, NodeOutcome::AlreadyVisited);
    assert_eq!(second.stats.fetched, 0);
    assert_eq!(request_count(&site).await, 2);
}

#[tokio::test]
async fn test_concurrency_cap_visits_everything() {
    let site = MockServer::start().await;

    let links: String = (0..10)
        .map(|i| format!(r#"<a href="/p{i}">{i}</a>"#))
        .collect();
    mount_page(&site, "/", links, 1).await;
    for i in 0..10 {
        mount_page(
            &site,
            &format!("/p{}", i),
            r#"<a href="/">home</a><a href="/p0">first</a>"#.to_string(),
            1,
        )
        .await;
    }

    let mut config = create_test_config(vec![format!("{}/", site.uri())], 3, ":memory:");
    config.crawler.max_concurrent_fetches = Some(2);

    let report = run_crawl_with_store(&config, memory_store())
        .await
        .expect("Crawl failed");

    assert_eq!(report.stats.fetched, 11);
    assert_eq!(report.seeds[0].outcome.children().len(), 10);
}

#[tokio::test]
async fn test_missing_and_odd_hrefs_are_ignored() {
    let site = MockServer::start().await;

    mount_page(
        &site,
        "/docs/intro",
        r##"<a>no href</a>
           <a href="">empty</a>
           <a href="javascript:void(0)">js</a>
           <a href="../guide">Guide</a>
           <a href="#top">Top</a>"##
            .to_string(),
        1,
    )
    .await;
    // Children are reached with budget 0: claimed, never fetched
    mount_page(&site, "/guide", "<p>guide</p>".to_string(), 0).await;

    let config = create_test_config(
        vec![format!("{}/docs/intro", site.uri())],
        1,
        ":memory:",
    );
    let report = run_crawl_with_store(&config, memory_store())
        .await
        .expect("Crawl failed");

    // A fragment makes a distinct address
    let expected: BTreeSet<String> = [
        format!("{}/guide", site.uri()),
        format!("{}/docs/intro#top", site.uri()),
    ]
    .into_iter()
    .collect();
    assert_eq!(report.seeds[0].outcome.children(), &expected);
}
