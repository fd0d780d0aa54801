//! Integration tests for exporting crawl results
//!
//! A small shop is crawled from a mock server and the collected records are
//! written to temporary files in every supported format.

use shop_harvest::config::{parse_config, SelectorRuleset};
use shop_harvest::output::{ProgressObserver, NOT_FOUND};
use shop_harvest::{CrawlEngine, ExportFormat, Record, ResultSink, RunStats};
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Quiet;

impl ProgressObserver for Quiet {
    fn on_status(&mut self, _message: &str) {}
    fn on_data(&mut self, _record: &Record) {}
    fn on_done(&mut self, _stats: RunStats) {}
}

async fn crawl_shop() -> (MockServer, ResultSink) {
    let server = MockServer::start().await;

    for (route, body) in [
        ("/", r#"<a href="/p/1">one</a><a href="/p/2">two</a>"#),
        (
            "/p/1",
            r#"<h1>Widget</h1><span class="price">$9.99</span><span class="sku">W-1</span>"#,
        ),
        ("/p/2", r#"<h1>Gadget, deluxe</h1>"#),
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;
    }

    let config = parse_config("[crawler]\njitter-ms = 0\n").unwrap();
    let rules = SelectorRuleset::new(vec![
        ("product_name", vec!["h1"]),
        ("price", vec![".price"]),
    ]);
    let mut engine = CrawlEngine::new(&config, &rules).unwrap();
    engine
        .start(&server.uri(), 1, Duration::ZERO, &mut Quiet)
        .await
        .unwrap();

    (server, engine.into_results())
}

fn prefix(dir: &TempDir) -> String {
    dir.path().join("products").to_str().unwrap().to_string()
}

#[tokio::test]
async fn test_csv_export_after_crawl() {
    let (server, sink) = crawl_shop().await;
    let dir = TempDir::new().unwrap();

    let path = sink.export(ExportFormat::Csv, &prefix(&dir)).unwrap();
    assert_eq!(path.extension().unwrap(), "csv");

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), vec!["url", "product_name", "price"]);

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][0], format!("{}/p/1", server.uri()));
    assert_eq!(&rows[0][1], "Widget");
    assert_eq!(&rows[0][2], "$9.99");
    assert_eq!(&rows[1][1], "Gadget, deluxe");
    assert_eq!(&rows[1][2], NOT_FOUND);
}

#[tokio::test]
async fn test_json_export_after_crawl() {
    let (_server, sink) = crawl_shop().await;
    let dir = TempDir::new().unwrap();

    let path = sink.export(ExportFormat::Json, &prefix(&dir)).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

    let rows = value.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["product_name"], "Widget");
    assert_eq!(rows[1]["price"], NOT_FOUND);

    let keys: Vec<&String> = rows[0].as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["url", "product_name", "price"]);
}

#[tokio::test]
async fn test_xlsx_export_after_crawl() {
    let (_server, sink) = crawl_shop().await;
    let dir = TempDir::new().unwrap();

    let path = sink.export(ExportFormat::Xlsx, &prefix(&dir)).unwrap();
    let bytes = std::fs::read(&path).unwrap();

    // xlsx files are zip archives
    assert!(bytes.starts_with(b"PK"));
}

#[tokio::test]
async fn test_export_into_missing_directory_fails() {
    let (_server, sink) = crawl_shop().await;
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("no/such/dir/products");

    let result = sink.export(ExportFormat::Csv, missing.to_str().unwrap());
    assert!(result.is_err());
    assert!(!Path::new(&missing).exists());
}
