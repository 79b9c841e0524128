//! Lexicon store: slang normalization map, profanity set and stopword set.
//!
//! The three tables are loaded once at startup and never mutated afterwards.
//! Refreshing them requires constructing a new [`Lexicon`] (in practice, a
//! process restart).
//!
//! ## Backends
//!
//! - **SQLite** (`sqlite` feature): one database file per table, using the
//!   table and column names in [`SLANG_TABLE`], [`PROFANITY_TABLE`] and
//!   [`STOPWORD_TABLE`].
//! - **CSV**: any path ending in `.csv`, with a header row carrying the same
//!   column names.

pub mod table;

#[cfg(feature = "sqlite")]
pub mod sqlite;

use crate::error::Result;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Layout of one lexicon table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec {
    /// Table name inside the database file.
    pub table: &'static str,
    /// Column holding the term.
    pub key_column: &'static str,
    /// Column holding the replacement (slang table only).
    pub value_column: Option<&'static str>,
}

/// Slang (alay) normalization table.
pub const SLANG_TABLE: TableSpec = TableSpec {
    table: "kamusalay",
    key_column: "alay",
    value_column: Some("normal"),
};

/// Profanity (abusive) word table.
pub const PROFANITY_TABLE: TableSpec = TableSpec {
    table: "abusive",
    key_column: "ABUSIVE",
    value_column: None,
};

/// Stopword table.
pub const STOPWORD_TABLE: TableSpec = TableSpec {
    table: "stopword",
    key_column: "STOPWORD",
    value_column: None,
};

/// Locations of the three lexicon tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexiconPaths {
    pub slang: PathBuf,
    pub profanity: PathBuf,
    pub stopwords: PathBuf,
}

impl Default for LexiconPaths {
    fn default() -> Self {
        Self::in_dir(".")
    }
}

impl LexiconPaths {
    /// Default database file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            slang: dir.join("kamusalay_database.db"),
            profanity: dir.join("abusive_database.db"),
            stopwords: dir.join("stopword_database.db"),
        }
    }

    pub fn with_slang(mut self, path: impl Into<PathBuf>) -> Self {
        self.slang = path.into();
        self
    }

    pub fn with_profanity(mut self, path: impl Into<PathBuf>) -> Self {
        self.profanity = path.into();
        self
    }

    pub fn with_stopwords(mut self, path: impl Into<PathBuf>) -> Self {
        self.stopwords = path.into();
        self
    }
}

/// Entry counts per table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LexiconStats {
    pub slang: usize,
    pub profanity: usize,
    pub stopwords: usize,
}

/// Immutable in-memory lexicon.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    slang: HashMap<String, String>,
    profanity: HashSet<String>,
    stopwords: HashSet<String>,
}

impl Lexicon {
    /// Starts an in-memory lexicon.
    pub fn builder() -> LexiconBuilder {
        LexiconBuilder::default()
    }

    /// Returns the canonical form of `term`, or `term` itself when it has no
    /// slang mapping.
    pub fn normalize<'a>(&'a self, term: &'a str) -> &'a str {
        self.slang.get(term).map(String::as_str).unwrap_or(term)
    }

    pub fn is_profane(&self, term: &str) -> bool {
        self.profanity.contains(term)
    }

    pub fn is_stopword(&self, term: &str) -> bool {
        self.stopwords.contains(term)
    }

    pub fn stats(&self) -> LexiconStats {
        LexiconStats {
            slang: self.slang.len(),
            profanity: self.profanity.len(),
            stopwords: self.stopwords.len(),
        }
    }

    /// Loads all three tables.
    ///
    /// Paths ending in `.csv` are read as delimited tables; everything else
    /// is opened as a SQLite database. Any missing or malformed table fails
    /// the whole load.
    pub async fn load(paths: &LexiconPaths) -> Result<Self> {
        let slang = load_pairs(&paths.slang, &SLANG_TABLE).await?;
        let profanity = load_terms(&paths.profanity, &PROFANITY_TABLE).await?;
        let stopwords = load_terms(&paths.stopwords, &STOPWORD_TABLE).await?;

        let mut builder = Lexicon::builder();
        for (alay, normal) in slang {
            builder = builder.slang(alay, normal);
        }
        for term in profanity {
            builder = builder.profane(term);
        }
        for term in stopwords {
            builder = builder.stopword(term);
        }

        let lexicon = builder.build();
        let stats = lexicon.stats();
        for (name, count) in [
            (SLANG_TABLE.table, stats.slang),
            (PROFANITY_TABLE.table, stats.profanity),
            (STOPWORD_TABLE.table, stats.stopwords),
        ] {
            if count == 0 {
                warn!(table = name, "lexicon table is empty");
            }
        }
        info!(
            slang = stats.slang,
            profanity = stats.profanity,
            stopwords = stats.stopwords,
            "lexicon loaded"
        );
        Ok(lexicon)
    }
}

/// Builder for [`Lexicon`].
///
/// Keys and set members are trimmed and lowercased, canonical forms are
/// trimmed. Blank keys are ignored. A repeated slang key keeps its last
/// mapping.
#[derive(Debug, Default)]
pub struct LexiconBuilder {
    lexicon: Lexicon,
    overridden: usize,
}

impl LexiconBuilder {
    pub fn slang(mut self, alay: impl AsRef<str>, normal: impl AsRef<str>) -> Self {
        if let Some(key) = normalize_key(alay.as_ref()) {
            let value = normal.as_ref().trim().to_string();
            if self.lexicon.slang.insert(key, value).is_some() {
                self.overridden += 1;
            }
        }
        self
    }

    pub fn profane(mut self, term: impl AsRef<str>) -> Self {
        if let Some(key) = normalize_key(term.as_ref()) {
            self.lexicon.profanity.insert(key);
        }
        self
    }

    pub fn stopword(mut self, term: impl AsRef<str>) -> Self {
        if let Some(key) = normalize_key(term.as_ref()) {
            self.lexicon.stopwords.insert(key);
        }
        self
    }

    pub fn build(self) -> Lexicon {
        if self.overridden > 0 {
            debug!(
                overridden = self.overridden,
                "duplicate slang keys, last mapping kept"
            );
        }
        self.lexicon
    }
}

fn normalize_key(term: &str) -> Option<String> {
    let trimmed = term.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

async fn load_pairs(path: &Path, spec: &TableSpec) -> Result<Vec<(String, String)>> {
    debug!(table = spec.table, path = %path.display(), "loading lexicon table");
    if is_csv(path) {
        return table::read_pairs(path, spec);
    }
    load_pairs_sqlite(path, spec).await
}

async fn load_terms(path: &Path, spec: &TableSpec) -> Result<Vec<String>> {
    debug!(table = spec.table, path = %path.display(), "loading lexicon table");
    if is_csv(path) {
        return table::read_terms(path, spec);
    }
    load_terms_sqlite(path, spec).await
}

#[cfg(feature = "sqlite")]
async fn load_pairs_sqlite(path: &Path, spec: &TableSpec) -> Result<Vec<(String, String)>> {
    sqlite::read_pairs(path, spec).await
}

#[cfg(feature = "sqlite")]
async fn load_terms_sqlite(path: &Path, spec: &TableSpec) -> Result<Vec<String>> {
    sqlite::read_terms(path, spec).await
}

#[cfg(not(feature = "sqlite"))]
async fn load_pairs_sqlite(path: &Path, spec: &TableSpec) -> Result<Vec<(String, String)>> {
    Err(sqlite_disabled(path, spec))
}

#[cfg(not(feature = "sqlite"))]
async fn load_terms_sqlite(path: &Path, spec: &TableSpec) -> Result<Vec<String>> {
    Err(sqlite_disabled(path, spec))
}

#[cfg(not(feature = "sqlite"))]
fn sqlite_disabled(path: &Path, spec: &TableSpec) -> crate::Error {
    crate::Error::lexicon(
        spec.table,
        format!(
            "{} is not a .csv file and SQLite support requires the 'sqlite' feature",
            path.display()
        ),
    )
}
