// src/extract/mod.rs

pub mod raw_table;

pub use raw_table::{RawRow, RawTable};

use crate::error::ScrapeError;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::trace;

static TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table").expect("valid selector"));
static TR: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("valid selector"));
static TH: Lazy<Selector> = Lazy::new(|| Selector::parse("th").expect("valid selector"));
static TD: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("valid selector"));

/// Row-cleaning rule: trim every cell and drop the ones left empty.
pub fn clean_row<I, S>(cells: I) -> RawRow
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    cells
        .into_iter()
        .map(|c| c.as_ref().trim().to_string())
        .filter(|c| !c.is_empty())
        .collect()
}

/// Visible text of one cell: each text fragment trimmed, empty ones skipped,
/// the rest concatenated.
pub fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

fn clean_cells<'a>(cells: impl Iterator<Item = ElementRef<'a>>) -> RawRow {
    clean_row(cells.map(cell_text))
}

/// First `<table>` carrying `class` in its class list, in document order.
fn find_table<'a>(document: &'a Html, class: &str) -> Option<ElementRef<'a>> {
    document
        .select(&TABLE)
        .find(|t| t.value().classes().any(|c| c == class))
}

/// Locate the results table marked with `class` and return its cleaned rows.
///
/// Header cells (`<th>` anywhere in the table) form the header row. When that
/// row is non-empty the first `<tr>` is treated as the header row and skipped
/// in the data scan; every other `<tr>` yields one `RawRow`, possibly empty.
pub fn extract_table(document: &Html, class: &str) -> Result<RawTable, ScrapeError> {
    let table = find_table(document, class)
        .ok_or_else(|| ScrapeError::Structure(format!("no <table class=\"{}\"> found", class)))?;

    let headers = clean_cells(table.select(&TH));
    let skip = usize::from(!headers.is_empty());

    let rows: Vec<RawRow> = table
        .select(&TR)
        .skip(skip)
        .map(|tr| clean_cells(tr.select(&TD)))
        .collect();

    trace!(headers = ?headers, rows = rows.len(), "extracted table");
    Ok(RawTable { headers, rows })
}

/// Parse `html` and run [`extract_table`] on it.
pub fn extract_table_from_html(html: &str, class: &str) -> Result<RawTable, ScrapeError> {
    let document = Html::parse_document(html);
    extract_table(&document, class)
}
