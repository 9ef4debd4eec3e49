use std::sync::Arc;
use std::time::Duration;

use agmarknet_api::{Crawler, FixedClock, Pacing, ScrapeConfig};
use chrono::NaiveDate;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

fn test_config(base_url: &str) -> ScrapeConfig {
    ScrapeConfig {
        base_url: base_url.to_string(),
        timeout: Duration::from_secs(5),
        retry_attempts: 1,
        retry_delay: Duration::ZERO,
        submit_pacing: Pacing::none(),
        clock: Arc::new(FixedClock(NaiveDate::from_ymd_opt(2026, 8, 7).unwrap())),
    }
}

#[tokio::test]
async fn each_combination_filters_its_own_market() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("form_page.html")))
        .mount(&server)
        .await;
    // Every combination sees the same state-wide table and keeps only the
    // rows for its own market.
    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(load_fixture("results_page.html")))
        .mount(&server)
        .await;

    let crawler = Crawler::with_config(test_config(&server.uri())).with_pacing(Pacing::none());
    let records = crawler.crawl(&["maharashtra"], &["tomato"]).await;

    let pune: Vec<_> = records.iter().filter(|r| r.market == "Pune").collect();
    let mumbai: Vec<_> = records.iter().filter(|r| r.market == "Mumbai").collect();
    let nagpur: Vec<_> = records.iter().filter(|r| r.market == "Nagpur").collect();
    assert_eq!(pune.len(), 1);
    assert_eq!(pune[0].date, "8/2026");
    assert_eq!(mumbai.len(), 1);
    assert_eq!(nagpur.len(), 1);
    assert_eq!(records.len(), 3);
}

#[tokio::test]
async fn unreachable_host_never_aborts_the_crawl() {
    let crawler =
        Crawler::with_config(test_config("http://127.0.0.1:9")).with_pacing(Pacing::none());
    let records = crawler.crawl(&["maharashtra", "karnataka"], &["tomato"]).await;

    // Every combination degraded to its 7-day synthetic series.
    assert_eq!(records.len(), 2 * 3 * 7);
    for market in ["Pune", "Mumbai", "Nagpur", "Bangalore", "Mysore", "Hubli"] {
        assert_eq!(
            records.iter().filter(|r| r.market == market).count(),
            7,
            "missing synthetic series for {market}"
        );
    }
    assert!(records.iter().all(|r| r.commodity == "tomato"));
}

#[tokio::test]
async fn states_without_market_enumeration_are_skipped() {
    let server = MockServer::start().await;

    let crawler = Crawler::with_config(test_config(&server.uri())).with_pacing(Pacing::none());
    let records = crawler.crawl(&["goa", "kerala"], &["tomato"]).await;

    assert!(records.is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}
