//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end, with the engine on its own task and
//! progress consumed through a channel.

use shop_harvest::config::{parse_config, SelectorRuleset};
use shop_harvest::output::{ChannelObserver, CrawlEvent};
use shop_harvest::{CrawlEngine, CrawlState, RunStats};
use std::time::Duration;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_CONFIG: &str = r#"
[crawler]
jitter-ms = 0
request-timeout-secs = 5

[fetch]
user-agents = ["HarvestTest/1.0"]
"#;

fn product_rules() -> SelectorRuleset {
    SelectorRuleset::from_json(
        r#"{
            "default": {
                "product_name": ["h1.product-title", "h1"],
                "price": [".price", "[itemprop=price]"]
            }
        }"#,
    )
    .unwrap()
}

fn test_engine() -> CrawlEngine {
    let config = parse_config(TEST_CONFIG).unwrap();
    CrawlEngine::new(&config, &product_rules())
        .unwrap()
        .with_rng_seed(7)
}

async fn mount_html(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_body_string(body),
        )
        .mount(server)
        .await;
}

async fn drain(mut rx: UnboundedReceiver<CrawlEvent>) -> Vec<CrawlEvent> {
    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    events
}

fn done_events(events: &[CrawlEvent]) -> Vec<RunStats> {
    events
        .iter()
        .filter_map(|e| match e {
            CrawlEvent::Done(stats) => Some(*stats),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn test_shop_scenario_on_spawned_task() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    // Listing page: two same-host links and one external link
    mount_html(
        &server,
        "/",
        format!(
            r#"<html><body>
            <a href="{}/products/widget">Widget</a>
            <a href="/about">About</a>
            <a href="https://external.test/deal">Deal</a>
            </body></html>"#,
            base_url
        ),
    )
    .await;

    mount_html(
        &server,
        "/products/widget",
        r#"<html><body>
            <h1 class="product-title">Widget</h1>
            <span class="price">$19.99</span>
            </body></html>"#
            .to_string(),
    )
    .await;

    mount_html(
        &server,
        "/about",
        "<html><body><p>We sell things</p></body></html>".to_string(),
    )
    .await;

    let mut engine = test_engine();
    let (tx, rx) = unbounded_channel();
    let seed = format!("{}/", base_url);

    let crawl = tokio::spawn(async move {
        let mut observer = ChannelObserver::new(tx);
        let result = engine
            .start(&seed, 1, Duration::from_millis(10), &mut observer)
            .await;
        (engine, result)
    });

    let events = drain(rx).await;
    let (engine, result) = crawl.await.unwrap();
    let stats = result.unwrap();

    assert_eq!(stats.scanned, 3);
    assert_eq!(stats.found, 1);
    assert_eq!(stats.errors, 0);
    assert_eq!(engine.state(), CrawlState::Stopped);

    // Seed first, then the two depth-1 pages in document order
    let statuses: Vec<&str> = events
        .iter()
        .filter_map(|e| match e {
            CrawlEvent::Status(m) => Some(m.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(statuses.len(), 3);
    assert!(statuses[0].starts_with("Scanning: "));
    assert!(statuses[1].contains("/products/widget"));
    assert!(statuses[2].contains("/about"));

    let data: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            CrawlEvent::Data(r) => Some(r),
            _ => None,
        })
        .collect();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0].get("product_name"), Some("Widget"));
    assert_eq!(data[0].get("price"), Some("$19.99"));

    // Done fires once, last, with the returned stats
    assert_eq!(done_events(&events), vec![stats]);
    assert!(matches!(events.last(), Some(CrawlEvent::Done(_))));

    assert_eq!(engine.results().len(), 1);
    assert_eq!(
        engine.results().records()[0].url(),
        format!("{}/products/widget", base_url)
    );
}

#[tokio::test]
async fn test_denied_links_never_requested() {
    let server = MockServer::start().await;

    mount_html(
        &server,
        "/",
        r#"<a href="/images/hero.png">hero</a>
           <a href="/catalog.PDF">catalog</a>
           <a href="/bundle.js?v=2">js</a>
           <a href="/shop">shop</a>"#
            .to_string(),
    )
    .await;
    mount_html(&server, "/shop", "<p>shop</p>".to_string()).await;

    let mut engine = test_engine();
    let (tx, rx) = unbounded_channel();
    let mut observer = ChannelObserver::new(tx);
    let stats = engine
        .start(&server.uri(), 3, Duration::ZERO, &mut observer)
        .await
        .unwrap();
    drop(observer);
    drain(rx).await;

    assert_eq!(stats.scanned, 2);
    let requested: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect();
    assert_eq!(requested, vec!["/", "/shop"]);
}

#[tokio::test]
async fn test_errors_do_not_abort_crawl() {
    let server = MockServer::start().await;

    mount_html(
        &server,
        "/",
        r#"<a href="/slow">slow</a><a href="/gone">gone</a><a href="/ok">ok</a>"#.to_string(),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_html(
        &server,
        "/ok",
        r#"<h1>Gadget</h1><span itemprop="price">7</span>"#.to_string(),
    )
    .await;

    let config = parse_config(
        r#"
        [crawler]
        jitter-ms = 0
        request-timeout-secs = 1
        "#,
    )
    .unwrap();
    let mut engine = CrawlEngine::new(&config, &product_rules()).unwrap();
    let (tx, rx) = unbounded_channel();
    let mut observer = ChannelObserver::new(tx);

    let stats = engine
        .start(&server.uri(), 1, Duration::ZERO, &mut observer)
        .await
        .unwrap();
    drop(observer);
    let events = drain(rx).await;

    // The timeout counts as an error, the 500 does not
    assert_eq!(stats.scanned, 4);
    assert_eq!(stats.errors, 1);
    assert_eq!(stats.found, 1);
    assert_eq!(done_events(&events).len(), 1);
    assert!(stats.scanned <= engine.dequeued());
    assert!(stats.found <= stats.scanned);
}

#[tokio::test]
async fn test_stop_from_another_task() {
    let server = MockServer::start().await;

    let links: String = (0..20)
        .map(|i| format!(r#"<a href="/p/{}">p{}</a>"#, i, i))
        .collect();
    mount_html(&server, "/", links).await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>page</p>"))
        .mount(&server)
        .await;

    let mut engine = test_engine();
    let stop = engine.stop_handle();
    let (tx, mut rx) = unbounded_channel();
    let seed = server.uri();

    let crawl = tokio::spawn(async move {
        let mut observer = ChannelObserver::new(tx);
        let result = engine
            .start(&seed, 1, Duration::from_millis(300), &mut observer)
            .await;
        (engine, result)
    });

    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        if matches!(event, CrawlEvent::Status(_)) {
            stop.stop();
        }
        events.push(event);
    }

    let (engine, result) = crawl.await.unwrap();
    let stats = result.unwrap();

    assert!(stats.scanned < 21);
    assert_eq!(engine.state(), CrawlState::Stopped);
    assert_eq!(stop.state(), CrawlState::Stopped);
    assert!(engine.pending() > 0);
    assert_eq!(done_events(&events), vec![stats]);
}

#[tokio::test]
async fn test_invalid_seed_emits_nothing() {
    let mut engine = test_engine();
    let (tx, rx) = unbounded_channel();
    let mut observer = ChannelObserver::new(tx);

    let result = engine
        .start("/relative/path", 1, Duration::ZERO, &mut observer)
        .await;
    drop(observer);

    assert!(result.is_err());
    assert!(drain(rx).await.is_empty());
    assert_eq!(engine.state(), CrawlState::Idle);
}
