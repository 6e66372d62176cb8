//! Core types for resource retrieval

use std::fmt;
use std::path::PathBuf;

use crate::address::Address;

/// How the caller needs the payload delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Raw text content
    Text,
    /// Bytes as standard base64
    Binary,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Text => write!(f, "text"),
            Encoding::Binary => write!(f, "base64"),
        }
    }
}

/// Identity of one cache entry.
///
/// The same resource requested as text and as binary is two entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RetrievalKey {
    pub address: Address,
    pub encoding: Encoding,
}

impl RetrievalKey {
    #[must_use]
    pub fn new(address: Address, encoding: Encoding) -> Self {
        Self { address, encoding }
    }
}

impl fmt::Display for RetrievalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.address, self.encoding)
    }
}

/// Error type for retrieval failures
///
/// Cloneable so one failed fetch can be handed to every caller that waited
/// on it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RetrieveError {
    #[error("Failed to read local file {}: {reason}", path.display())]
    LocalRead { path: PathBuf, reason: String },

    #[error("Request failed for {url}: {reason}")]
    Request { url: String, reason: String },

    #[error("HTTP error {status}: {url}")]
    HttpStatus { url: String, status: u16 },
}

/// A remote asset that could not be fetched and was inlined as empty content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegradedAsset {
    pub address: Address,
    pub encoding: Encoding,
    pub reason: String,
}

impl fmt::Display for DegradedAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.address, self.reason)
    }
}
