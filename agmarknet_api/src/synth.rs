//! Synthetic fallback series, substituted when the live scrape yields nothing.
//!
//! Deterministic given `today`, so the whole degraded path is exactly
//! reproducible in tests. Shaped like the real rows: same fields, same
//! display-string prices.

use chrono::{Days, NaiveDate};

use crate::types::PriceRecord;

/// Days of history in a fallback series.
pub const FALLBACK_DAYS: u32 = 7;

const FLOOR_PRICE: i64 = 500;
const DAILY_STEP: i64 = 50;
const DEFAULT_BASE_PRICE: i64 = 1000;

/// Rough wholesale base prices per quintal, per commodity.
const BASE_PRICES: &[(&str, i64)] = &[
    ("potato", 1200),
    ("tomato", 1500),
    ("onion", 800),
    ("rice", 2500),
    ("wheat", 1800),
    ("maize", 1400),
];

fn base_price(commodity: &str) -> i64 {
    BASE_PRICES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(commodity.trim()))
        .map(|(_, price)| *price)
        .unwrap_or(DEFAULT_BASE_PRICE)
}

/// Produces a plausible 7-day series for the commodity/market, one record per
/// day, newest first, starting at `today`.
pub fn synthesize(commodity: &str, market: &str, today: NaiveDate) -> Vec<PriceRecord> {
    let base = base_price(commodity);
    (0..FALLBACK_DAYS)
        .map(|offset| {
            let date = today - Days::new(u64::from(offset));
            let min_price = (base - DAILY_STEP * i64::from(offset)).max(FLOOR_PRICE);
            PriceRecord {
                sequence_number: offset + 1,
                date: date.format("%d-%b-%Y").to_string(),
                market: market.to_string(),
                commodity: commodity.to_string(),
                variety: "General".to_string(),
                min_price: min_price.to_string(),
                max_price: (min_price + 400).to_string(),
                modal_price: (min_price + 200).to_string(),
            }
        })
        .collect()
}
