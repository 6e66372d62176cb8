//! Crate-level error type
//!
//! Per-resource failures live in [`RetrieveError`]; everything that can abort a
//! whole conversion is collected here.

use crate::retrieval::RetrieveError;

/// Errors that stop a conversion
#[derive(Debug, thiserror::Error)]
pub enum MonolithError {
    #[error("Invalid target location: {0}")]
    InvalidTarget(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error(transparent)]
    Retrieve(#[from] RetrieveError),

    #[error("Invalid selector: {0}")]
    Selector(&'static str),

    #[error("Failed to serialize document: {0}")]
    Serialize(#[from] std::io::Error),

    #[error("Serialized document is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, MonolithError>;
