//! Resource retrieval
//!
//! This module fetches the bytes behind resolved addresses exactly once per
//! (address, encoding) pair within a conversion run.

pub mod cache;
pub mod fetcher;
pub mod observer;
pub mod retriever;
pub mod types;

pub use cache::{CachedPayload, RetrievalCache};
pub use fetcher::{Fetch, SystemFetcher};
pub use observer::{ProgressLog, RetrievalObserver, Silent};
pub use retriever::Retriever;
pub use types::{DegradedAsset, Encoding, RetrievalKey, RetrieveError};
