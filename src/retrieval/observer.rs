//! Progress notifications for cache misses

use std::fmt;

use super::types::Encoding;
use crate::address::Address;

/// Notified each time an asset retrieval misses the cache and performs real
/// I/O.
///
/// Never called for cache hits, nor for the root document, which is read
/// outside the cache.
pub trait RetrievalObserver: Send + Sync + fmt::Debug {
    fn on_fetch(&self, address: &Address, encoding: Encoding);
}

/// Emits a human-readable progress notice through the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressLog;

impl RetrievalObserver for ProgressLog {
    fn on_fetch(&self, address: &Address, _encoding: Encoding) {
        log::info!("Retrieving {address} ...");
    }
}

/// Observer for quiet runs
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl RetrievalObserver for Silent {
    fn on_fetch(&self, _address: &Address, _encoding: Encoding) {}
}
