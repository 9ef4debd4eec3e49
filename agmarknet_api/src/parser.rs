//! Parsing of the server-rendered results table into price records.

use scraper::{ElementRef, Html, Selector};

use crate::errors::ScrapeError;
use crate::types::PriceRecord;

/// Table ids the upstream site has used for the results grid. Either is
/// accepted; the first one present in the document wins.
pub const TABLE_IDS: &[&str] = &["cphBody_gridRecords", "cphBody_GridPriceData"];

/// Minimum cells in a data row. The upstream column count has flapped
/// between five and six; positions 0-4 have stayed stable.
const MIN_CELLS: usize = 5;

/// Extracts price rows from a results page.
///
/// Returns an empty vec when the table is absent or holds only its header
/// row; that is the normal "no data for this period" case, not an error.
/// Rows whose market cell does not contain `market_filter` (case-insensitive
/// substring) are skipped. Sequence numbers are assigned 1-based over the
/// emitted rows in source order, ignoring any numbering printed upstream.
pub fn parse_records(
    html: &str,
    commodity: &str,
    date_label: &str,
    market_filter: Option<&str>,
) -> Result<Vec<PriceRecord>, ScrapeError> {
    let document = Html::parse_document(html);
    let row_selector = selector("tr")?;
    let cell_selector = selector("td")?;

    let Some(table) = find_table(&document)? else {
        return Ok(Vec::new());
    };

    let filter = market_filter.map(str::to_lowercase);
    let mut records = Vec::new();
    // First row is the header.
    for row in table.select(&row_selector).skip(1) {
        let cells: Vec<String> = row
            .select(&cell_selector)
            .map(|cell| cell.text().collect::<String>().trim().to_string())
            .collect();
        if cells.len() < MIN_CELLS {
            continue;
        }
        let market = &cells[0];
        if let Some(filter) = &filter {
            if !market.to_lowercase().contains(filter) {
                continue;
            }
        }
        records.push(PriceRecord {
            sequence_number: records.len() as u32 + 1,
            date: date_label.to_string(),
            market: market.clone(),
            commodity: commodity.to_string(),
            variety: cells[1].clone(),
            min_price: cells[2].clone(),
            max_price: cells[3].clone(),
            modal_price: cells[4].clone(),
        });
    }
    Ok(records)
}

fn find_table(document: &Html) -> Result<Option<ElementRef<'_>>, ScrapeError> {
    for id in TABLE_IDS {
        let table_selector = selector(&format!("table#{id}"))?;
        if let Some(table) = document.select(&table_selector).next() {
            return Ok(Some(table));
        }
    }
    Ok(None)
}

fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Parse(format!("invalid CSS selector '{css}': {e}")))
}
