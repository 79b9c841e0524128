//! # tweetclean
//!
//! Cleansing pipeline and web API for informal Indonesian social-media text.
//!
//! A tweet goes through five fixed stages: lowercasing, noise stripping
//! (punctuation, retweet markers, digits, `user` placeholders, URLs),
//! profanity removal, slang (alay) normalization and stopword removal. The
//! last three stages consult a [`Lexicon`] loaded once at startup.
//!
//! ## Quick Start
//!
//! ```
//! use tweetclean::{Cleanser, Lexicon};
//!
//! let lexicon = Lexicon::builder()
//!     .slang("bgt", "banget")
//!     .profane("kampret")
//!     .stopword("yang")
//!     .build();
//!
//! let cleanser = Cleanser::new(lexicon);
//! assert_eq!(cleanser.cleanse("Yang ini BAGUS bgt, kampret!!"), "ini bagus banget");
//! ```
//!
//! ## Features
//!
//! - `server` (default): axum HTTP adapter ([`server`])
//! - `sqlite` (default): SQLite lexicon tables

pub mod batch;
pub mod cleanse;
pub mod config;
pub mod error;
pub mod lexicon;

#[cfg(feature = "server")]
pub mod server;

// Re-exports
pub use batch::{BatchOptions, TweetRow};
pub use cleanse::{cleanse, cleanse_default, CleanseOptions};
pub use config::ServerConfig;
pub use error::{Error, Result};
pub use lexicon::{Lexicon, LexiconPaths, LexiconStats};

use std::path::Path;
use std::sync::Arc;

/// Loads a lexicon and cleanses one text with default options.
///
/// Convenient for one-off use; long-running callers should load the
/// [`Lexicon`] once and keep a [`Cleanser`].
pub async fn cleanse_text(paths: &LexiconPaths, text: &str) -> Result<String> {
    let lexicon = Lexicon::load(paths).await?;
    Ok(cleanse_default(text, &lexicon))
}

/// Cleanser bundling a shared lexicon with pipeline and batch options.
///
/// # Example
///
/// ```
/// use tweetclean::{BatchOptions, Cleanser, Lexicon};
///
/// let cleanser = Cleanser::new(Lexicon::builder().stopword("di").build())
///     .with_batch_options(BatchOptions::new().with_text_column("text"));
///
/// let rows = cleanser.cleanse_csv(b"text\nmakan di rumah\nRT tidur 123\n")?;
/// assert_eq!(rows, vec!["makan rumah", "tidur"]);
/// # Ok::<(), tweetclean::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Cleanser {
    lexicon: Arc<Lexicon>,
    options: CleanseOptions,
    batch: BatchOptions,
}

impl Cleanser {
    /// Creates a cleanser with default options.
    pub fn new(lexicon: Lexicon) -> Self {
        Self::from_shared(Arc::new(lexicon))
    }

    /// Creates a cleanser around an already shared lexicon.
    pub fn from_shared(lexicon: Arc<Lexicon>) -> Self {
        Self {
            lexicon,
            options: CleanseOptions::default(),
            batch: BatchOptions::default(),
        }
    }

    /// Loads the lexicon tables and creates a cleanser.
    pub async fn load(paths: &LexiconPaths) -> Result<Self> {
        Ok(Self::new(Lexicon::load(paths).await?))
    }

    /// Sets the pipeline options.
    pub fn with_options(mut self, options: CleanseOptions) -> Self {
        self.options = options;
        self
    }

    /// Lowercase and noise strip only.
    pub fn minimal(self) -> Self {
        self.with_options(CleanseOptions::minimal())
    }

    /// Sets the batch file options.
    pub fn with_batch_options(mut self, batch: BatchOptions) -> Self {
        self.batch = batch;
        self
    }

    /// Returns the shared lexicon.
    pub fn lexicon(&self) -> &Arc<Lexicon> {
        &self.lexicon
    }

    pub fn options(&self) -> &CleanseOptions {
        &self.options
    }

    pub fn batch_options(&self) -> &BatchOptions {
        &self.batch
    }

    /// Cleanses one text unit.
    pub fn cleanse(&self, text: &str) -> String {
        cleanse(text, &self.lexicon, &self.options)
    }

    /// Parses a batch file and cleanses every row, in order.
    pub fn cleanse_csv(&self, bytes: &[u8]) -> Result<Vec<String>> {
        batch::cleanse_file(bytes, &self.lexicon, &self.batch, &self.options)
    }

    /// Parses a batch file into typed rows without cleansing them.
    pub fn parse_rows(&self, bytes: &[u8]) -> Result<Vec<TweetRow>> {
        batch::parse_rows(bytes, &self.batch)
    }

    /// Reads and cleanses a batch file from disk.
    pub fn cleanse_csv_file(&self, path: impl AsRef<Path>) -> Result<Vec<String>> {
        let bytes = std::fs::read(path)?;
        self.cleanse_csv(&bytes)
    }
}
