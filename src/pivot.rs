use tracing::warn;

use crate::errors::{Result, ScrapeError};
use crate::models::{MetricRow, PriceTable, Record, RecordSet, PERIOD_FIELD};
use crate::table::normalize_value;

/// Transpose metric rows x period columns into one record per period.
///
/// Every record starts with the `Rok` field holding the period label,
/// followed by one field per metric row in table order. A metric row
/// labelled `Rok` is dropped so the period field is never overwritten.
pub fn statement(periods: &[String], rows: &[MetricRow]) -> Result<RecordSet> {
    let rows: Vec<&MetricRow> = rows
        .iter()
        .filter(|row| {
            let clash = row.label == PERIOD_FIELD;
            if clash {
                warn!("Dropping metric row labelled '{}', it clashes with the period field", PERIOD_FIELD);
            }
            !clash
        })
        .collect();

    if let Some(short) = rows.iter().find(|row| row.values.len() < periods.len()) {
        return Err(ScrapeError::MalformedRow {
            label: short.label.clone(),
            expected: periods.len(),
            found: short.values.len(),
        });
    }

    let records = periods
        .iter()
        .enumerate()
        .map(|(index, period)| {
            let mut record = Record::new();
            record.insert(PERIOD_FIELD, normalize_value(period));
            for row in &rows {
                record.insert(&row.label, row.values[index].clone());
            }
            record
        })
        .collect();

    let columns = std::iter::once(PERIOD_FIELD).chain(rows.iter().map(|row| row.label.as_str()));
    Ok(RecordSet::new(columns, records))
}

/// One record per trading day, fields named after the first page's headers
pub fn price(table: &PriceTable) -> RecordSet {
    let records = table
        .rows
        .iter()
        .map(|cells| {
            let mut record = Record::new();
            for (header, cell) in table.headers.iter().zip(cells) {
                record.insert(header, cell.clone());
            }
            record
        })
        .collect();

    RecordSet::new(table.headers.iter().map(String::as_str), records)
}
