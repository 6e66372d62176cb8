//! Per-run retrieval cache
//!
//! Every [`RetrievalKey`] owns one slot. The first caller to reach an empty
//! slot runs the fetch; callers arriving while it is in flight wait on the
//! same slot and share its outcome, so a key is fetched at most once per run
//! no matter how many elements reference it or how concurrently they ask.

use std::future::Future;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::OnceCell;

use super::types::{RetrievalKey, RetrieveError};

/// Stored outcome of one fetch
pub type CachedPayload = Result<Arc<str>, RetrieveError>;

type Slot = Arc<OnceCell<CachedPayload>>;

/// Key-value store of retrieved payloads for one conversion run
#[derive(Debug, Default)]
pub struct RetrievalCache {
    slots: DashMap<RetrievalKey, Slot>,
}

impl RetrievalCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the payload for `key`, running `fetch` only if no caller has
    /// filled the slot yet.
    pub async fn get_or_fetch<F, Fut>(&self, key: &RetrievalKey, fetch: F) -> CachedPayload
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = CachedPayload>,
    {
        // Release the shard lock before awaiting
        let slot = Arc::clone(&self.slots.entry(key.clone()).or_default());

        slot.get_or_init(fetch).await.clone()
    }

    /// Completed payload for `key`, without fetching
    #[must_use]
    pub fn get(&self, key: &RetrievalKey) -> Option<CachedPayload> {
        self.slots.get(key).and_then(|slot| slot.get().cloned())
    }

    /// Number of completed entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.initialized()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
