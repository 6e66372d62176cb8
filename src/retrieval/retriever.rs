//! Memoized retrieval of document assets
//!
//! [`Retriever`] ties the resolver, the cache and a [`Fetch`] implementation
//! together. It also owns the failure policy: a remote asset that cannot be
//! fetched becomes empty content, a local file that cannot be read is fatal.

use std::sync::Arc;

use dashmap::DashMap;

use super::cache::{CachedPayload, RetrievalCache};
use super::fetcher::Fetch;
use super::observer::RetrievalObserver;
use super::types::{DegradedAsset, Encoding, RetrievalKey, RetrieveError};
use crate::address::{AddressKind, BaseLocation, resolve_fetchable};

/// Retrieval front-end for one conversion run
pub struct Retriever<F: Fetch> {
    fetcher: Arc<F>,
    observer: Arc<dyn RetrievalObserver>,
    cache: RetrievalCache,
    degraded: DashMap<RetrievalKey, String>,
}

impl<F: Fetch> Retriever<F> {
    /// Create a retriever with an empty cache
    pub fn new(fetcher: Arc<F>, observer: Arc<dyn RetrievalObserver>) -> Self {
        Self {
            fetcher,
            observer,
            cache: RetrievalCache::new(),
            degraded: DashMap::new(),
        }
    }

    /// Resolve `reference` against `base` and return its content, fetching it
    /// only if this (address, encoding) pair was never retrieved before.
    pub async fn retrieve(
        &self,
        base: &BaseLocation,
        reference: &str,
        encoding: Encoding,
    ) -> Result<Arc<str>, RetrieveError> {
        let key = RetrievalKey::new(resolve_fetchable(base, reference), encoding);
        self.retrieve_key(&key).await
    }

    /// Same as [`Retriever::retrieve`] for an already resolved key
    pub async fn retrieve_key(&self, key: &RetrievalKey) -> Result<Arc<str>, RetrieveError> {
        self.cache.get_or_fetch(key, || self.fetch_miss(key)).await
    }

    async fn fetch_miss(&self, key: &RetrievalKey) -> CachedPayload {
        self.observer.on_fetch(&key.address, key.encoding);

        match self.fetcher.fetch(&key.address, key.encoding).await {
            Ok(payload) => Ok(Arc::from(payload)),
            Err(error) => match key.address.kind() {
                AddressKind::Remote => {
                    log::warn!("Failed to retrieve {}: {error}; inlining empty content", key.address);
                    self.degraded.insert(key.clone(), error.to_string());
                    Ok(Arc::from(""))
                }
                AddressKind::Local => Err(error),
            },
        }
    }

    /// Payload of a completed retrieval, without fetching
    #[must_use]
    pub fn cached(&self, key: &RetrievalKey) -> Option<CachedPayload> {
        self.cache.get(key)
    }

    /// Number of distinct keys retrieved so far
    #[must_use]
    pub fn retrieved(&self) -> usize {
        self.cache.len()
    }

    /// Remote assets that were replaced by empty content, ordered by address
    #[must_use]
    pub fn degraded(&self) -> Vec<DegradedAsset> {
        let mut degraded: Vec<DegradedAsset> = self
            .degraded
            .iter()
            .map(|entry| DegradedAsset {
                address: entry.key().address.clone(),
                encoding: entry.key().encoding,
                reason: entry.value().clone(),
            })
            .collect();
        degraded.sort_by_key(|asset| asset.address.to_string());
        degraded
    }
}
