//! Unofficial client for the Agmarknet price-trends form.
//!
//! Drives the stateful ASP.NET report form at `agmarknet.gov.in`: one
//! cookie-bearing session per query performs the GET-then-POST cycle,
//! re-extracting the per-page-load view-state tokens each time, and parses
//! the resulting HTML table into [`PriceRecord`]s. When the live site is
//! unreachable or returns nothing, a deterministic synthetic series stands
//! in so callers always get data in the same shape.

pub mod client;
pub mod codes;
pub mod crawler;
mod errors;
pub mod parser;
pub mod synth;
pub mod tokens;
pub mod types;
mod user_agent;

pub use client::{
    Clock, FixedClock, Pacing, ScrapeClient, ScrapeConfig, SystemClock, PRICE_TRENDS_URL,
};
pub use crawler::Crawler;
pub use errors::ScrapeError;
pub use tokens::FormTokens;
pub use types::{PriceRecord, QuerySelector};
