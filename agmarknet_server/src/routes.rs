//! Route handlers for the price API.

use agmarknet_api::{Crawler, Pacing, QuerySelector, ScrapeClient, ScrapeConfig};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

/// Configuration shared by all handlers: how to reach and pace the upstream
/// form. Each request still gets its own scrape session from this.
#[derive(Clone)]
pub struct AppState {
    pub scrape: ScrapeConfig,
    pub crawl_pacing: Pacing,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            scrape: ScrapeConfig::default(),
            crawl_pacing: Pacing::crawl(),
        }
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);
    Router::new()
        .route("/", get(home))
        .route("/request", get(request_prices))
        .route("/all-data", get(all_data))
        .layer(cors)
        .with_state(state)
}

async fn home() -> Json<serde_json::Value> {
    Json(json!({
        "Page": "Home Page",
        "Usage": "/request?commodity=COMMODITY&state=STATE&market=MARKET",
        "Example": "/request?commodity=Tomato&state=Maharashtra&market=Pune",
        "Time": Utc::now().timestamp(),
    }))
}

#[derive(Debug, Deserialize)]
struct RequestParams {
    commodity: Option<String>,
    state: Option<String>,
    market: Option<String>,
}

async fn request_prices(
    State(app): State<AppState>,
    Query(params): Query<RequestParams>,
) -> Response {
    let (Some(commodity), Some(state), Some(market)) = (
        params.commodity.filter(|v| !v.is_empty()),
        params.state.filter(|v| !v.is_empty()),
        params.market.filter(|v| !v.is_empty()),
    ) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Missing parameters"})),
        )
            .into_response();
    };

    let client = match ScrapeClient::from_config(&app.scrape) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "failed to build scrape session");
            return Json(json!({"message": "No data available"})).into_response();
        }
    };
    let selector = QuerySelector::new(&state, &commodity).with_market(&market);
    let records = client.fetch_with_fallback(&selector).await;
    if records.is_empty() {
        Json(json!({"message": "No data available"})).into_response()
    } else {
        Json(records).into_response()
    }
}

async fn all_data(State(app): State<AppState>) -> Response {
    let crawler = Crawler::with_config(app.scrape.clone()).with_pacing(app.crawl_pacing);
    let records = crawler.crawl_all().await;
    if records.is_empty() {
        Json(json!({"message": "No data fetched"})).into_response()
    } else {
        Json(records).into_response()
    }
}
