//! Table location and cell extraction for biznesradar.pl pages
//!
//! Statement pages carry a `report-table` whose header row holds one `thq`
//! cell per period and whose body rows hold a label, one cell per period
//! (the number lives in a nested `value` element) and a trailing sparkline.
//! Price pages carry a `qTableFull` table with one trading day per row.

use scraper::{ElementRef, Html, Selector};

use crate::errors::{Result, ScrapeError};
use crate::models::{MetricRow, PriceTable, RawTable};

pub const STATEMENT_TABLE_CLASS: &str = "report-table";
pub const PRICE_TABLE_CLASS: &str = "qTableFull";

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector {
        css: css.to_string(),
        message: format!("{:?}", e),
    })
}

/// Find the first `<table>` carrying `class_name` and return its outer HTML
pub fn locate(html: &str, class_name: &str) -> Result<Option<RawTable>> {
    let document = Html::parse_document(html);
    let tables = selector("table")?;

    let found = document
        .select(&tables)
        .find(|table| table.value().classes().any(|c| c == class_name))
        .map(|table| RawTable::new(table.html()));

    Ok(found)
}

/// Remove line breaks and tabs, cut unit annotations starting at `(`
pub fn clean_header(text: &str) -> String {
    let flat: String = text.chars().filter(|c| *c != '\n' && *c != '\t').collect();
    let cut = match flat.find('(') {
        Some(pos) => &flat[..pos],
        None => flat.as_str(),
    };
    cut.trim().to_string()
}

/// Trim and drop every space, so "1 234 567" becomes "1234567"
pub fn normalize_value(text: &str) -> String {
    text.trim().replace(' ', "")
}

fn text_of(element: &ElementRef) -> String {
    element.text().collect()
}

fn parse_table(raw: &RawTable) -> Html {
    Html::parse_fragment(raw.as_str())
}

/// Period labels from the statement header row
pub fn extract_headers(raw: &RawTable) -> Result<Vec<String>> {
    let fragment = parse_table(raw);
    let rows = selector("tr")?;
    let period_cells = selector(".thq")?;

    let headers = match fragment.select(&rows).next() {
        Some(header_row) => header_row
            .select(&period_cells)
            .map(|cell| clean_header(&text_of(&cell)))
            .collect(),
        None => Vec::new(),
    };

    Ok(headers)
}

/// Metric rows below the statement header row
pub fn extract_rows(raw: &RawTable) -> Result<Vec<MetricRow>> {
    let fragment = parse_table(raw);
    let rows = selector("tr")?;
    let cells = selector("td")?;
    let value = selector(".value")?;

    let mut metric_rows = Vec::new();
    for row in fragment.select(&rows).skip(1) {
        let row_cells: Vec<ElementRef> = row.select(&cells).collect();
        let Some(label_cell) = row_cells.first() else {
            continue;
        };

        // first cell is the label, last one the sparkline
        let data_cells = if row_cells.len() > 2 {
            &row_cells[1..row_cells.len() - 1]
        } else {
            &[][..]
        };

        let values = data_cells
            .iter()
            .map(|cell| {
                cell.select(&value)
                    .next()
                    .map(|v| normalize_value(&text_of(&v)))
                    .unwrap_or_default()
            })
            .collect();

        metric_rows.push(MetricRow {
            label: text_of(label_cell).trim().to_string(),
            values,
        });
    }

    Ok(metric_rows)
}

/// Headers from the first page, rows from every page in page order
pub fn extract_price_rows(pages: &[RawTable]) -> Result<PriceTable> {
    let first = pages.first().ok_or(ScrapeError::NoPages)?;
    let rows = selector("tr")?;
    let header_cells = selector("th")?;
    let cells = selector("td")?;

    let headers = parse_table(first)
        .select(&rows)
        .next()
        .map(|row| row.select(&header_cells).map(|th| text_of(&th)).collect())
        .unwrap_or_default();

    let mut price_rows = Vec::new();
    for page in pages {
        let fragment = parse_table(page);
        for row in fragment.select(&rows).skip(1) {
            let values: Vec<String> = row
                .select(&cells)
                .map(|td| normalize_value(&text_of(&td)))
                .collect();
            if !values.is_empty() {
                price_rows.push(values);
            }
        }
    }

    Ok(PriceTable {
        headers,
        rows: price_rows,
    })
}
