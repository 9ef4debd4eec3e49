//! Error types for the scraping core.

/// Errors that can occur while driving the price-trends form.
///
/// None of these cross the API boundary: [`ScrapeClient::fetch_with_fallback`]
/// absorbs every variant into an empty or synthetic result.
///
/// [`ScrapeClient::fetch_with_fallback`]: crate::ScrapeClient::fetch_with_fallback
#[derive(thiserror::Error, Debug)]
pub enum ScrapeError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    /// Transport kept failing after the configured number of attempts.
    #[error("transport failed after {attempts} attempts")]
    FetchFailed { attempts: u32 },
    /// One of the hidden form fields was absent from the page. The page
    /// structure changed upstream, so retrying the same cycle is pointless.
    #[error("form token {field} missing from page")]
    TokensMissing { field: &'static str },
    #[error("parse error: {0}")]
    Parse(String),
}
