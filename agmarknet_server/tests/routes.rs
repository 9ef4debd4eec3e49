use std::sync::Arc;
use std::time::Duration;

use agmarknet_api::{FixedClock, Pacing, ScrapeConfig};
use agmarknet_server::{router, AppState};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

/// State pointing at a dead upstream, so every live path degrades.
fn offline_state() -> AppState {
    AppState {
        scrape: ScrapeConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout: Duration::from_secs(5),
            retry_attempts: 1,
            retry_delay: Duration::ZERO,
            submit_pacing: Pacing::none(),
            clock: Arc::new(FixedClock(NaiveDate::from_ymd_opt(2026, 8, 7).unwrap())),
        },
        crawl_pacing: Pacing::none(),
    }
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

#[tokio::test]
async fn home_describes_usage() {
    let (status, body) = get(router(offline_state()), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["Page"], "Home Page");
    assert_eq!(
        body["Usage"],
        "/request?commodity=COMMODITY&state=STATE&market=MARKET"
    );
    assert!(body["Time"].is_i64());
}

#[tokio::test]
async fn missing_parameters_are_rejected() {
    let (status, body) = get(router(offline_state()), "/request").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing parameters");

    let (status, _) = get(
        router(offline_state()),
        "/request?commodity=Tomato&state=Maharashtra",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(
        router(offline_state()),
        "/request?commodity=Tomato&state=Maharashtra&market=",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn request_serves_synthetic_series_when_upstream_is_down() {
    let (status, body) = get(
        router(offline_state()),
        "/request?commodity=Tomato&state=Maharashtra&market=Pune",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let records = body.as_array().expect("expected a JSON array");
    assert_eq!(records.len(), 7);
    assert_eq!(records[0]["S.No"], 1);
    assert_eq!(records[0]["Date"], "07-Aug-2026");
    assert_eq!(records[0]["Market"], "Pune");
    assert_eq!(records[0]["Commodity"], "Tomato");
    assert_eq!(records[0]["Variety"], "General");
    assert_eq!(records[0]["Min Price"], "1500");
    assert_eq!(records[0]["Max Price"], "1900");
    assert_eq!(records[0]["Modal Price"], "1700");
}

#[tokio::test]
async fn unresolved_names_yield_the_no_data_message() {
    let (status, body) = get(
        router(offline_state()),
        "/request?commodity=Unicorn&state=Maharashtra&market=Pune",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "No data available");
}

#[tokio::test]
async fn all_data_aggregates_every_enumerated_combination() {
    let (status, body) = get(router(offline_state()), "/all-data").await;

    assert_eq!(status, StatusCode::OK);
    let records = body.as_array().expect("expected a JSON array");
    // Two states carry market enumerations, three markets each, 25
    // commodities, 7 synthetic records per combination.
    assert_eq!(records.len(), 2 * 3 * 25 * 7);
}
