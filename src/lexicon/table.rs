//! Delimited-table (CSV) lexicon backend.

use super::TableSpec;
use crate::batch::decode_latin1;
use crate::error::{Error, Result};
use std::path::Path;

/// Reads `(key, value)` pairs from a CSV file with a header row.
pub fn read_pairs(path: &Path, spec: &TableSpec) -> Result<Vec<(String, String)>> {
    let value_column = spec
        .value_column
        .ok_or_else(|| Error::lexicon(spec.table, "table has no value column"))?;
    let bytes = read_table(path, spec)?;
    parse_pairs(&bytes, spec.table, spec.key_column, value_column)
}

/// Reads single-column terms from a CSV file with a header row.
pub fn read_terms(path: &Path, spec: &TableSpec) -> Result<Vec<String>> {
    let bytes = read_table(path, spec)?;
    parse_terms(&bytes, spec.table, spec.key_column)
}

fn read_table(path: &Path, spec: &TableSpec) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| Error::lexicon(spec.table, format!("{}: {e}", path.display())))
}

fn parse_pairs(
    bytes: &[u8],
    table: &str,
    key_column: &str,
    value_column: &str,
) -> Result<Vec<(String, String)>> {
    let text = decode_latin1(bytes);
    let mut reader = csv::ReaderBuilder::new().from_reader(text.as_bytes());
    let headers = reader
        .headers()
        .map_err(|e| Error::lexicon(table, e))?
        .clone();
    let key_idx = column_index(&headers, table, key_column)?;
    let value_idx = column_index(&headers, table, value_column)?;

    let mut pairs = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| Error::lexicon(table, e))?;
        let key = record.get(key_idx).unwrap_or_default();
        let value = record.get(value_idx).unwrap_or_default();
        if !key.trim().is_empty() && value.trim().is_empty() {
            let line = record.position().map_or(0, |p| p.line());
            return Err(Error::lexicon(
                table,
                format!("empty '{value_column}' for '{}' at line {line}", key.trim()),
            ));
        }
        pairs.push((key.to_string(), value.to_string()));
    }
    Ok(pairs)
}

fn parse_terms(bytes: &[u8], table: &str, column: &str) -> Result<Vec<String>> {
    let text = decode_latin1(bytes);
    let mut reader = csv::ReaderBuilder::new().from_reader(text.as_bytes());
    let headers = reader
        .headers()
        .map_err(|e| Error::lexicon(table, e))?
        .clone();
    let idx = column_index(&headers, table, column)?;

    reader
        .records()
        .map(|record| {
            let record = record.map_err(|e| Error::lexicon(table, e))?;
            Ok(record.get(idx).unwrap_or_default().to_string())
        })
        .collect()
}

// SQL column names are case-insensitive; the CSV loader matches that.
fn column_index(headers: &csv::StringRecord, table: &str, column: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(column))
        .ok_or_else(|| Error::lexicon(table, format!("no such column: {column}")))
}
