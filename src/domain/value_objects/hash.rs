//! Content Hash Value Object
//!
//! SHA-256 of a file's content. The watcher uses it to drop saves that did
//! not change anything.

use std::fmt;

use sha2::{Digest, Sha256};

/// Content hash value object
///
/// Wraps a SHA-256 hash string with the `sha256:` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(String);

impl ContentHash {
    /// Prefix for SHA-256 hashes
    pub const PREFIX: &'static str = "sha256:";

    /// Create a ContentHash by computing SHA-256 of raw bytes
    pub fn from_bytes(content: &[u8]) -> Self {
        let hash = Sha256::digest(content);
        Self(format!("{}{:x}", Self::PREFIX, hash))
    }

    /// Get the full hash string with prefix
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get just the hex part without prefix
    pub fn hex(&self) -> &str {
        self.0.strip_prefix(Self::PREFIX).unwrap_or(&self.0)
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
