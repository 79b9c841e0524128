//! Batch file ingestion: delimited tables of tweets.
//!
//! Uploaded tables are decoded with a fixed single-byte encoding (Latin-1),
//! parsed with a header row, and validated up front: a table without the
//! text column, or with malformed rows, is rejected before any row is
//! cleansed.

use crate::cleanse::{cleanse, CleanseOptions};
use crate::error::{Error, Result};
use crate::lexicon::Lexicon;
use encoding_rs::WINDOWS_1252;
use std::borrow::Cow;
use std::io::Write;

/// Default name of the text column (case-sensitive).
pub const DEFAULT_TEXT_COLUMN: &str = "Tweet";

/// Name of the column added by [`write_cleaned_csv`].
pub const CLEANED_COLUMN: &str = "cleaned_text";

/// Options for parsing batch files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    /// Header name of the column holding the text.
    pub text_column: String,
    /// Field delimiter (default: comma).
    pub delimiter: u8,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            text_column: DEFAULT_TEXT_COLUMN.to_string(),
            delimiter: b',',
        }
    }
}

impl BatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the text column name.
    pub fn with_text_column(mut self, column: impl Into<String>) -> Self {
        self.text_column = column.into();
        self
    }

    /// Sets the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Tab-separated values.
    pub fn tsv(self) -> Self {
        self.with_delimiter(b'\t')
    }
}

/// One validated row of a batch file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TweetRow {
    /// 1-based line number where the record starts.
    pub line: u64,
    /// Content of the text column; an empty cell is an empty string.
    pub text: String,
}

/// Decodes bytes as Latin-1.
///
/// Uses the WHATWG `windows-1252` table, which every byte sequence decodes
/// under. Its 0x80-0x9F mappings differ from ISO-8859-1, but all of those
/// characters are non-ASCII and are stripped by the pipeline either way.
pub fn decode_latin1(bytes: &[u8]) -> Cow<'_, str> {
    WINDOWS_1252.decode_without_bom_handling(bytes).0
}

/// Parses a batch file into rows, in file order.
///
/// # Errors
///
/// - [`Error::MissingColumn`] if the header row has no `text_column`
/// - [`Error::Csv`] if a record is malformed (e.g. wrong field count)
pub fn parse_rows(bytes: &[u8], options: &BatchOptions) -> Result<Vec<TweetRow>> {
    let text = decode_latin1(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .from_reader(text.as_bytes());

    let text_idx = reader
        .headers()?
        .iter()
        .position(|h| h == options.text_column)
        .ok_or_else(|| Error::MissingColumn(options.text_column.clone()))?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        let text = record.get(text_idx).unwrap_or_default().to_string();
        rows.push(TweetRow { line, text });
    }
    Ok(rows)
}

/// Cleanses every row, sequentially and in order.
pub fn cleanse_rows(rows: &[TweetRow], lexicon: &Lexicon, options: &CleanseOptions) -> Vec<String> {
    rows.iter()
        .map(|row| cleanse(&row.text, lexicon, options))
        .collect()
}

/// Parses and cleanses a batch file in one step.
pub fn cleanse_file(
    bytes: &[u8],
    lexicon: &Lexicon,
    batch: &BatchOptions,
    options: &CleanseOptions,
) -> Result<Vec<String>> {
    let rows = parse_rows(bytes, batch)?;
    Ok(cleanse_rows(&rows, lexicon, options))
}

/// Writes rows with their cleansed text as a two-column CSV.
pub fn write_cleaned_csv<W: Write>(
    rows: &[TweetRow],
    cleaned: &[String],
    text_column: &str,
    writer: W,
) -> Result<()> {
    if rows.len() != cleaned.len() {
        return Err(Error::InvalidInput(format!(
            "{} rows but {} cleaned texts",
            rows.len(),
            cleaned.len()
        )));
    }

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([text_column, CLEANED_COLUMN])?;
    for (row, clean) in rows.iter().zip(cleaned) {
        csv_writer.write_record([row.text.as_str(), clean.as_str()])?;
    }
    csv_writer.flush()?;
    Ok(())
}
