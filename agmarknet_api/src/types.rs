//! Data model shared by the parser, generator, and crawler.

use serde::{Deserialize, Serialize};

/// One price row, either scraped from the results table or synthesized.
///
/// Field names on the wire reproduce the upstream report's column headers.
/// Prices stay as display strings: the source data is not numeric-clean, and
/// round-trip fidelity matters more than arithmetic here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRecord {
    #[serde(rename = "S.No")]
    pub sequence_number: u32,

    #[serde(rename = "Date")]
    pub date: String,

    #[serde(rename = "Market")]
    pub market: String,

    #[serde(rename = "Commodity")]
    pub commodity: String,

    #[serde(rename = "Variety")]
    pub variety: String,

    #[serde(rename = "Min Price")]
    pub min_price: String,

    #[serde(rename = "Max Price")]
    pub max_price: String,

    #[serde(rename = "Modal Price")]
    pub modal_price: String,
}

/// Input to a single scrape: state and commodity by human-readable name,
/// plus an optional market filter. `market: None` means all markets, which
/// is how the batch crawler asks for a state-wide sweep.
#[derive(Debug, Clone, Default)]
pub struct QuerySelector {
    pub state: String,
    pub commodity: String,
    pub market: Option<String>,
}

impl QuerySelector {
    pub fn new(state: &str, commodity: &str) -> Self {
        Self {
            state: state.to_string(),
            commodity: commodity.to_string(),
            market: None,
        }
    }

    pub fn with_market(mut self, market: &str) -> Self {
        self.market = Some(market.to_string());
        self
    }
}
