use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::io;

use crate::errors::{Result, ScrapeError};
use crate::models::{OutputFormat, RecordSet};

const JSON_INDENT: &[u8] = b"   ";

pub fn render(set: &RecordSet, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => render_json(set),
        OutputFormat::Csv => render_csv(set),
    }
}

/// Pretty JSON array, three-space indent, non-ASCII left as is
pub fn render_json(set: &RecordSet) -> Result<String> {
    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(JSON_INDENT));
    set.records.serialize(&mut serializer)?;
    into_utf8(buffer)
}

/// Header row from the set's columns, no index column
pub fn render_csv(set: &RecordSet) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&set.columns)?;
    for record in &set.records {
        writer.write_record(set.columns.iter().map(|column| record.get(column).unwrap_or("")))?;
    }
    let buffer = writer
        .into_inner()
        .map_err(|e| ScrapeError::Io(e.into_error()))?;
    into_utf8(buffer)
}

fn into_utf8(buffer: Vec<u8>) -> Result<String> {
    String::from_utf8(buffer).map_err(|e| ScrapeError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}
