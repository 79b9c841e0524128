//! SQLite lexicon backend.
//!
//! Each table lives in its own database file, opened read-only for the
//! duration of the load and closed afterwards.

use super::TableSpec;
use crate::error::{Error, Result};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Connection, SqliteConnection};
use std::path::Path;
use tracing::debug;

async fn open(path: &Path, spec: &TableSpec) -> Result<SqliteConnection> {
    if !path.is_file() {
        return Err(Error::lexicon(
            spec.table,
            format!("database file not found: {}", path.display()),
        ));
    }
    let options = SqliteConnectOptions::new().filename(path).read_only(true);
    SqliteConnection::connect_with(&options)
        .await
        .map_err(|e| Error::lexicon(spec.table, e))
}

/// Reads `(key, value)` pairs from a two-column table.
///
/// Rows with a NULL key are skipped. A NULL canonical form for a present key
/// fails the load, as an empty one does in the CSV backend.
pub async fn read_pairs(path: &Path, spec: &TableSpec) -> Result<Vec<(String, String)>> {
    let value_column = spec
        .value_column
        .ok_or_else(|| Error::lexicon(spec.table, "table has no value column"))?;
    let mut conn = open(path, spec).await?;
    // Identifiers are interpolated unquoted: SQLite treats an unknown
    // double-quoted identifier as a string literal.
    let sql = format!(
        "SELECT {}, {} FROM {}",
        spec.key_column, value_column, spec.table
    );
    let rows = sqlx::query_as::<_, (Option<String>, Option<String>)>(&sql)
        .fetch_all(&mut conn)
        .await
        .map_err(|e| Error::lexicon(spec.table, e))?;
    conn.close().await?;

    let mut pairs = Vec::with_capacity(rows.len());
    let mut skipped = 0usize;
    for (key, value) in rows {
        match (key, value) {
            (None, _) => skipped += 1,
            (Some(key), None) => {
                return Err(Error::lexicon(
                    spec.table,
                    format!("NULL '{value_column}' for '{}'", key.trim()),
                ));
            }
            (Some(key), Some(value)) => pairs.push((key, value)),
        }
    }
    log_skipped(spec, skipped);
    Ok(pairs)
}

/// Reads the term column of a single-column table, skipping NULL cells.
pub async fn read_terms(path: &Path, spec: &TableSpec) -> Result<Vec<String>> {
    let mut conn = open(path, spec).await?;
    let sql = format!("SELECT {} FROM {}", spec.key_column, spec.table);
    let rows = sqlx::query_as::<_, (Option<String>,)>(&sql)
        .fetch_all(&mut conn)
        .await
        .map_err(|e| Error::lexicon(spec.table, e))?;
    conn.close().await?;

    let total = rows.len();
    let terms: Vec<String> = rows.into_iter().filter_map(|(term,)| term).collect();
    log_skipped(spec, total - terms.len());
    Ok(terms)
}

fn log_skipped(spec: &TableSpec, skipped: usize) {
    if skipped > 0 {
        debug!(table = spec.table, skipped, "NULL lexicon keys skipped");
    }
}
