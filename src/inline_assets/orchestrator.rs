//! Orchestration of a complete conversion
//!
//! The document is parsed once to plan every retrieval, the planned keys are
//! fetched concurrently through the run's [`Retriever`], linked stylesheets
//! are scanned for their own references (one import level per round), and a
//! second parse applies the payloads in document order. No parsed tree is
//! held across an await point.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use base64::Engine;
use futures::{StreamExt, TryStreamExt, stream};

use super::planner::plan_retrievals;
use super::rewriter::rewrite_document;
use super::stylesheet::plan_stylesheet;
use super::types::Conversion;
use crate::address::{Address, BaseLocation};
use crate::config::MonolithConfig;
use crate::error::{MonolithError, Result};
use crate::retrieval::{
    Encoding, Fetch, ProgressLog, RetrievalKey, RetrievalObserver, Retriever, Silent,
    SystemFetcher,
};

/// Converts web pages into single self-contained documents
pub struct Monolith<F: Fetch = SystemFetcher> {
    config: Arc<MonolithConfig>,
    fetcher: Arc<F>,
    observer: Arc<dyn RetrievalObserver>,
}

impl Monolith<SystemFetcher> {
    /// Create a converter that reads the filesystem and the network
    pub fn new(config: MonolithConfig) -> Result<Self> {
        let fetcher = SystemFetcher::new(&config)?;
        Ok(Self::with_fetcher(config, fetcher))
    }
}

impl<F: Fetch> Monolith<F> {
    /// Create a converter around a custom fetcher
    pub fn with_fetcher(config: MonolithConfig, fetcher: F) -> Self {
        let observer: Arc<dyn RetrievalObserver> = if config.quiet() {
            Arc::new(Silent)
        } else {
            Arc::new(ProgressLog)
        };

        Self {
            config: Arc::new(config),
            fetcher: Arc::new(fetcher),
            observer,
        }
    }

    /// Replace the cache-miss observer
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn RetrievalObserver>) -> Self {
        self.observer = observer;
        self
    }

    #[must_use]
    pub fn config(&self) -> &MonolithConfig {
        &self.config
    }

    /// Convert the document at `target` (path or `http(s)` URL).
    ///
    /// Each call starts with an empty cache. Failing to read the target
    /// itself or any local asset aborts the conversion; remote assets that
    /// fail are inlined as empty content and listed in
    /// [`Conversion::degraded`].
    pub async fn convert(&self, target: &str) -> Result<Conversion> {
        let root = Address::from_target(target)?;
        let base = match self.config.base_url() {
            Some(base_url) => BaseLocation::from_override(base_url)?,
            None => BaseLocation::of_document(&root),
        };
        log::debug!("Converting {root} with base {base}");

        if !self.config.quiet() {
            log::info!("Loading document {root}");
        }
        let html = self.fetcher.fetch(&root, Encoding::Text).await?;

        let retriever = Retriever::new(Arc::clone(&self.fetcher), Arc::clone(&self.observer));
        let limit = self.config.max_concurrent_fetches();
        let plan = plan_retrievals(&html, &base, &self.config)?;
        let mut payloads = retrieve_all(&retriever, plan.keys, limit).await?;
        retrieve_stylesheet_assets(&retriever, plan.stylesheets, &mut payloads, &self.config)
            .await?;

        let document = rewrite_document(&html, &base, &self.config, &payloads)?;
        let output = if self.config.output_as_base64() {
            base64::engine::general_purpose::STANDARD.encode(document)
        } else {
            document
        };

        let conversion = Conversion {
            output,
            retrieved: retriever.retrieved(),
            degraded: retriever.degraded(),
        };
        log::debug!(
            "Converted {root}: {} assets retrieved, {} degraded",
            conversion.retrieved,
            conversion.degraded.len()
        );

        Ok(conversion)
    }
}

/// Retrieve what the given stylesheets reference, then what their imports
/// reference, until no new stylesheet turns up.
async fn retrieve_stylesheet_assets<F: Fetch>(
    retriever: &Retriever<F>,
    mut sheets: Vec<RetrievalKey>,
    payloads: &mut HashMap<RetrievalKey, Arc<str>>,
    config: &MonolithConfig,
) -> Result<()> {
    let mut seen: HashSet<RetrievalKey> = payloads.keys().cloned().collect();

    while !sheets.is_empty() {
        let mut round = Vec::new();
        for sheet in &sheets {
            let Some(css) = payloads.get(sheet) else {
                continue;
            };
            for key in plan_stylesheet(&sheet.address, css, config) {
                if seen.insert(key.clone()) {
                    round.push(key);
                }
            }
        }

        sheets = round
            .iter()
            .filter(|key| key.encoding == Encoding::Text)
            .cloned()
            .collect();
        payloads.extend(retrieve_all(retriever, round, config.max_concurrent_fetches()).await?);
    }

    Ok(())
}

/// Fetch every key with at most `limit` cache misses in flight.
///
/// Stops at the first fatal (local) failure.
async fn retrieve_all<F: Fetch>(
    retriever: &Retriever<F>,
    keys: Vec<RetrievalKey>,
    limit: usize,
) -> Result<HashMap<RetrievalKey, Arc<str>>> {
    let payloads: HashMap<RetrievalKey, Arc<str>> = stream::iter(keys)
        .map(move |key| async move {
            let payload = retriever.retrieve_key(&key).await?;
            Ok::<_, MonolithError>((key, payload))
        })
        .buffer_unordered(limit.max(1))
        .try_collect()
        .await?;

    Ok(payloads)
}
