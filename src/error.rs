//! Error types for tweetclean.

use std::io;
use thiserror::Error;

/// Result type alias for tweetclean operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for tweetclean library.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A lexicon table is missing, unreadable or malformed.
    #[error("Lexicon table '{table}' could not be loaded: {message}")]
    Lexicon { table: String, message: String },

    /// SQLite access error while reading a lexicon table.
    #[cfg(feature = "sqlite")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The uploaded table has no column with the required name.
    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    /// Structurally malformed delimited table.
    #[error("Malformed table: {0}")]
    Csv(String),

    /// A request payload is missing a field or is otherwise unusable.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid runtime configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn lexicon(table: impl Into<String>, message: impl ToString) -> Self {
        Error::Lexicon {
            table: table.into(),
            message: message.to_string(),
        }
    }

    /// Returns true if the error was caused by the caller's input rather than
    /// by the service itself.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::MissingColumn(_) | Error::Csv(_) | Error::InvalidInput(_)
        )
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        match err.kind() {
            csv::ErrorKind::Io(_) => Error::Io(io::Error::other(err.to_string())),
            _ => Error::Csv(err.to_string()),
        }
    }
}
