//! Runtime configuration for the HTTP service.

use crate::error::{Error, Result};
use crate::lexicon::LexiconPaths;
use std::net::SocketAddr;

/// Default listen address.
pub const DEFAULT_BIND: &str = "127.0.0.1:5000";

/// Default upload size limit (16 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Options for running the HTTP service.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind: SocketAddr,

    /// Lexicon table locations.
    pub lexicon: LexiconPaths,

    /// Maximum accepted request body size in bytes.
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 5000)),
            lexicon: LexiconPaths::default(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl ServerConfig {
    /// Creates new config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the listen address from a `host:port` string.
    pub fn with_bind(mut self, bind: &str) -> Result<Self> {
        self.bind = bind
            .parse()
            .map_err(|e| Error::Config(format!("invalid bind address '{bind}': {e}")))?;
        Ok(self)
    }

    /// Sets the lexicon table locations.
    pub fn with_lexicon(mut self, paths: LexiconPaths) -> Self {
        self.lexicon = paths;
        self
    }

    /// Sets the upload limit in megabytes.
    pub fn with_max_upload_mb(mut self, mb: usize) -> Result<Self> {
        if mb == 0 {
            return Err(Error::Config("upload limit must be at least 1 MB".into()));
        }
        self.max_upload_bytes = mb * 1024 * 1024;
        Ok(self)
    }
}
