//! Extraction of the ASP.NET hidden form fields from a served page.
//!
//! The upstream form regenerates `__VIEWSTATE`, `__VIEWSTATEGENERATOR`, and
//! `__EVENTVALIDATION` on every page load, and rejects submissions that do
//! not echo them back. Tokens are valid for one GET-then-POST cycle only and
//! must never be cached across sessions.

use scraper::{Html, Selector};

use crate::errors::ScrapeError;

const VIEW_STATE: &str = "__VIEWSTATE";
const VIEW_STATE_GENERATOR: &str = "__VIEWSTATEGENERATOR";
const EVENT_VALIDATION: &str = "__EVENTVALIDATION";

/// The three opaque session tokens a form submission must carry.
#[derive(Debug, Clone)]
pub struct FormTokens {
    pub view_state: String,
    pub view_state_generator: String,
    pub event_validation: String,
}

/// Pulls the three hidden fields out of a form page.
///
/// A missing field means the page structure changed or the page did not load
/// as expected; that is fatal for the current attempt and not retried.
pub fn extract(html: &str) -> Result<FormTokens, ScrapeError> {
    let document = Html::parse_document(html);
    Ok(FormTokens {
        view_state: hidden_field(&document, VIEW_STATE)?,
        view_state_generator: hidden_field(&document, VIEW_STATE_GENERATOR)?,
        event_validation: hidden_field(&document, EVENT_VALIDATION)?,
    })
}

fn hidden_field(document: &Html, field: &'static str) -> Result<String, ScrapeError> {
    let selector = Selector::parse(&format!("input[name=\"{field}\"]"))
        .map_err(|e| ScrapeError::Parse(format!("invalid CSS selector for {field}: {e}")))?;
    document
        .select(&selector)
        .next()
        .and_then(|input| input.value().attr("value"))
        .map(str::to_string)
        .ok_or(ScrapeError::TokensMissing { field })
}
