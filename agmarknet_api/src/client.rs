//! Scrape session against the Agmarknet price-trends form.
//!
//! One [`ScrapeClient`] owns one cookie-bearing HTTP session and performs a
//! single GET-then-POST cycle: load the form, lift the view-state tokens out
//! of it, submit the report selection, and parse the resulting table.
//! Sessions are never shared across queries.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Datelike, NaiveDate, Utc};
use rand::Rng;
use tokio::time::sleep;

use crate::codes;
use crate::errors::ScrapeError;
use crate::parser;
use crate::synth;
use crate::tokens;
use crate::types::{PriceRecord, QuerySelector};
use crate::user_agent::get_user_agent;

/// The stateful report form this client drives.
pub const PRICE_TRENDS_URL: &str = "https://agmarknet.gov.in/PriceTrends/SA_Month_PriMV.aspx";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_RETRY_ATTEMPTS: u32 = 3;
const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Source of "today", injected so the current-month form fields and the
/// synthetic series are deterministic under test.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Reads the ambient UTC wall clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Always reports the same day.
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Politeness delay drawn uniformly from a range before each paced step.
///
/// Not a correctness requirement, only load-bounding against the upstream
/// host; [`Pacing::none`] turns it off for tests.
#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    min: Duration,
    max: Duration,
}

impl Pacing {
    pub fn new(min: Duration, max: Duration) -> Self {
        Self { min, max }
    }

    /// No delay at all.
    pub fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// 1.5-3 s pause before submitting the form.
    pub fn form_submit() -> Self {
        Self::new(Duration::from_millis(1500), Duration::from_millis(3000))
    }

    /// 2-4 s pause between crawl combinations.
    pub fn crawl() -> Self {
        Self::new(Duration::from_secs(2), Duration::from_secs(4))
    }

    fn delay(&self) -> Duration {
        if self.max.is_zero() {
            Duration::ZERO
        } else if self.min >= self.max {
            self.min
        } else {
            rand::thread_rng().gen_range(self.min..=self.max)
        }
    }

    /// Sleeps for a freshly drawn delay.
    pub async fn wait(&self) {
        let delay = self.delay();
        if !delay.is_zero() {
            sleep(delay).await;
        }
    }
}

/// Everything a session needs beyond its HTTP client, bundled so callers can
/// stamp out one configured session per query.
///
/// The historical scraper variants differed only in retry bound, accepted
/// table ids, and pacing range; those unions live here as configuration.
#[derive(Clone)]
pub struct ScrapeConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub retry_attempts: u32,
    pub retry_delay: Duration,
    pub submit_pacing: Pacing,
    pub clock: Arc<dyn Clock>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: PRICE_TRENDS_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            retry_delay: DEFAULT_RETRY_DELAY,
            submit_pacing: Pacing::form_submit(),
            clock: Arc::new(SystemClock),
        }
    }
}

/// One fetch+submit cycle against the price-trends form.
pub struct ScrapeClient {
    config: ScrapeConfig,
    http: reqwest::Client,
}

impl ScrapeClient {
    /// Creates a session against the production form with default policy.
    pub fn new() -> Result<Self, ScrapeError> {
        Self::from_config(&ScrapeConfig::default())
    }

    /// Creates a session with a custom form URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Result<Self, ScrapeError> {
        Self::from_config(&ScrapeConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..ScrapeConfig::default()
        })
    }

    pub fn from_config(config: &ScrapeConfig) -> Result<Self, ScrapeError> {
        let http = reqwest::Client::builder()
            .user_agent(get_user_agent())
            .cookie_store(true)
            .build()?;
        Ok(Self {
            config: config.clone(),
            http,
        })
    }

    pub fn with_retry(mut self, attempts: u32, delay: Duration) -> Self {
        self.config.retry_attempts = attempts.max(1);
        self.config.retry_delay = delay;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.config.submit_pacing = pacing;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.config.clock = clock;
        self
    }

    /// Runs the full form cycle for `selector` and returns the parsed rows.
    ///
    /// Unresolved state or commodity names short-circuit to `Ok(empty)`
    /// before any network traffic. Transport failures surface as
    /// [`ScrapeError::FetchFailed`] once retries are exhausted; a page
    /// without tokens surfaces as [`ScrapeError::TokensMissing`] unretried.
    pub async fn fetch_prices(
        &self,
        selector: &QuerySelector,
    ) -> Result<Vec<PriceRecord>, ScrapeError> {
        let (Some(state_code), Some(commodity_code)) = (
            codes::state_code(&selector.state),
            codes::commodity_code(&selector.commodity),
        ) else {
            tracing::warn!(
                state = %selector.state,
                commodity = %selector.commodity,
                "unresolved state or commodity name, skipping scrape"
            );
            return Ok(Vec::new());
        };

        tracing::info!(
            state = %selector.state,
            commodity = %selector.commodity,
            market = selector.market.as_deref().unwrap_or("*"),
            "fetching price trends"
        );

        let page = self.get_form_page().await?;
        let tokens = tokens::extract(&page)?;

        let today = self.config.clock.today();
        let year = today.year().to_string();
        let month = today.month().to_string();
        let form = [
            ("__VIEWSTATE", tokens.view_state.as_str()),
            ("__VIEWSTATEGENERATOR", tokens.view_state_generator.as_str()),
            ("__EVENTVALIDATION", tokens.event_validation.as_str()),
            ("ctl00$cphBody$cboYear", year.as_str()),
            ("ctl00$cphBody$cboMonth", month.as_str()),
            ("ctl00$cphBody$cboState", state_code),
            ("ctl00$cphBody$cboCommodity", commodity_code),
            ("ctl00$cphBody$btnSubmit", "Submit"),
        ];

        self.config.submit_pacing.wait().await;
        let body = self.submit_form(&form).await?;

        let date_label = format!("{}/{}", today.month(), today.year());
        parser::parse_records(
            &body,
            &selector.commodity,
            &date_label,
            selector.market.as_deref(),
        )
    }

    /// Like [`fetch_prices`], but never fails: every failure path and every
    /// empty live result is replaced by the synthetic series, except for
    /// unresolved names, which stay empty because the inputs were invalid.
    /// Live and synthetic records are never mixed in one result.
    ///
    /// [`fetch_prices`]: ScrapeClient::fetch_prices
    pub async fn fetch_with_fallback(&self, selector: &QuerySelector) -> Vec<PriceRecord> {
        if codes::state_code(&selector.state).is_none()
            || codes::commodity_code(&selector.commodity).is_none()
        {
            tracing::warn!(
                state = %selector.state,
                commodity = %selector.commodity,
                "unresolved name, returning empty result"
            );
            return Vec::new();
        }

        let market = selector.market.as_deref().unwrap_or("");
        match self.fetch_prices(selector).await {
            Ok(records) if !records.is_empty() => records,
            Ok(_) => {
                tracing::warn!(
                    state = %selector.state,
                    commodity = %selector.commodity,
                    market,
                    "live scrape returned no rows, substituting synthetic series"
                );
                synth::synthesize(&selector.commodity, market, self.config.clock.today())
            }
            Err(e) => {
                tracing::warn!(
                    state = %selector.state,
                    commodity = %selector.commodity,
                    market,
                    error = %e,
                    "live scrape failed, substituting synthetic series"
                );
                synth::synthesize(&selector.commodity, market, self.config.clock.today())
            }
        }
    }

    async fn get_form_page(&self) -> Result<String, ScrapeError> {
        self.send_with_retry("GET", || {
            self.http
                .get(&self.config.base_url)
                .header("accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
                .header("accept-language", "en-US,en;q=0.9")
                .header("upgrade-insecure-requests", "1")
        })
        .await
    }

    async fn submit_form(&self, form: &[(&str, &str)]) -> Result<String, ScrapeError> {
        self.send_with_retry("POST", || {
            self.http
                .post(&self.config.base_url)
                .header("accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
                .header("accept-language", "en-US,en;q=0.9")
                .header("referer", self.config.base_url.as_str())
                .form(form)
        })
        .await
    }

    /// Sends a request up to the configured number of attempts with a fixed
    /// inter-attempt delay. Timeouts, connection errors, and non-2xx statuses
    /// all count as transport failures.
    async fn send_with_retry<F>(&self, what: &str, build: F) -> Result<String, ScrapeError>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        let attempts = self.config.retry_attempts.max(1);
        for attempt in 1..=attempts {
            match build().timeout(self.config.timeout).send().await {
                Ok(resp) if resp.status().is_success() => match resp.text().await {
                    Ok(body) => return Ok(body),
                    Err(e) => {
                        tracing::warn!(what, attempt, error = %e, "failed to read response body");
                    }
                },
                Ok(resp) => {
                    tracing::warn!(what, attempt, status = %resp.status(), "non-success status");
                }
                Err(e) => {
                    tracing::warn!(what, attempt, error = %e, "transport error");
                }
            }
            if attempt < attempts {
                sleep(self.config.retry_delay).await;
            }
        }
        tracing::error!(what, attempts, url = %self.config.base_url, "retries exhausted");
        Err(ScrapeError::FetchFailed { attempts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pacing_none_never_delays() {
        assert!(Pacing::none().delay().is_zero());
    }

    #[test]
    fn pacing_draws_within_range() {
        let pacing = Pacing::new(Duration::from_millis(10), Duration::from_millis(20));
        for _ in 0..100 {
            let d = pacing.delay();
            assert!(d >= Duration::from_millis(10) && d <= Duration::from_millis(20));
        }
    }

    #[test]
    fn fixed_clock_is_fixed() {
        let day = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        assert_eq!(FixedClock(day).today(), day);
    }
}
