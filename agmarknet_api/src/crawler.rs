//! Batch crawl across the full state x commodity x market enumeration.

use crate::client::{Pacing, ScrapeClient, ScrapeConfig};
use crate::codes;
use crate::types::{PriceRecord, QuerySelector};

/// Drives the scrape pipeline over many combinations with inter-request
/// pacing. Strictly sequential: one in-flight form cycle at a time, so the
/// per-host rate bound is simply the pacing delay.
pub struct Crawler {
    config: ScrapeConfig,
    pacing: Pacing,
}

impl Default for Crawler {
    fn default() -> Self {
        Self::new()
    }
}

impl Crawler {
    pub fn new() -> Self {
        Self::with_config(ScrapeConfig::default())
    }

    pub fn with_config(config: ScrapeConfig) -> Self {
        Self {
            config,
            pacing: Pacing::crawl(),
        }
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Crawls every known state and commodity, using the static market
    /// enumeration; states without one are skipped entirely.
    pub async fn crawl_all(&self) -> Vec<PriceRecord> {
        let states: Vec<&str> = codes::all_states().collect();
        let commodities: Vec<&str> = codes::all_commodities().collect();
        self.crawl(&states, &commodities).await
    }

    /// Crawls the given states and commodities, one fresh session per
    /// combination, pacing between combinations.
    ///
    /// A failing combination is logged and contributes nothing; it never
    /// aborts the crawl. Results concatenate in iteration order, without
    /// deduplication.
    pub async fn crawl(&self, states: &[&str], commodities: &[&str]) -> Vec<PriceRecord> {
        let mut all = Vec::new();
        let mut first = true;
        for &state in states {
            let markets = codes::markets_for(state);
            if markets.is_empty() {
                continue;
            }
            for &commodity in commodities {
                for &market in markets {
                    if !first {
                        self.pacing.wait().await;
                    }
                    first = false;

                    let client = match ScrapeClient::from_config(&self.config) {
                        Ok(client) => client,
                        Err(e) => {
                            tracing::warn!(
                                state,
                                commodity,
                                market,
                                error = %e,
                                "failed to build scrape session, skipping combination"
                            );
                            continue;
                        }
                    };
                    tracing::info!(state, commodity, market, "crawling combination");
                    let selector = QuerySelector::new(state, commodity).with_market(market);
                    all.extend(client.fetch_with_fallback(&selector).await);
                }
            }
        }
        all
    }
}
