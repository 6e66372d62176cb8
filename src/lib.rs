pub mod address;
pub mod config;
pub mod error;
pub mod inline_assets;
pub mod media;
pub mod retrieval;
pub mod utils;

pub use address::{Address, AddressKind, BaseLocation, resolve, resolve_fetchable};
pub use config::MonolithConfig;
pub use error::{MonolithError, Result};
pub use inline_assets::{AssetPass, Conversion, Monolith};
pub use media::{MediaType, sniff};
pub use retrieval::{
    DegradedAsset, Encoding, Fetch, RetrievalCache, RetrievalKey, RetrievalObserver,
    RetrieveError, Retriever, SystemFetcher,
};

/// Convert the page at `target` with the network and filesystem fetcher
pub async fn convert(target: &str, config: MonolithConfig) -> Result<Conversion> {
    Monolith::new(config)?.convert(target).await
}
