//! Core configuration type for page conversion
//!
//! This module contains the `MonolithConfig` struct that defines how a
//! document and its assets are turned into a single self-contained file.

use serde::{Deserialize, Serialize};

/// Immutable configuration for a conversion run
///
/// Built once through [`MonolithConfig::builder`] and shared by reference
/// with every component of the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonolithConfig {
    /// Emit the final document as base64 text instead of raw markup
    pub(crate) output_as_base64: bool,

    /// Suppress progress notices on cache misses
    pub(crate) quiet: bool,

    /// User-Agent header sent with every remote request
    pub(crate) user_agent: String,

    /// Per-request network timeout in seconds
    ///
    /// **INVARIANT:** Never zero (enforced in builder).
    pub(crate) timeout_secs: u64,

    /// Accept invalid TLS certificates
    pub(crate) insecure: bool,

    /// Leave stylesheets external (their links are still made absolute)
    pub(crate) no_css: bool,

    /// Leave scripts external (their sources are still made absolute)
    pub(crate) no_js: bool,

    /// Leave images, picture sources and favicons external
    pub(crate) no_images: bool,

    /// Inline scripts as element content instead of `data:` URIs
    pub(crate) scripts_as_content: bool,

    /// Override of the base location derived from the target
    pub(crate) base_url: Option<String>,

    /// Upper bound on concurrently running cache-miss fetches
    ///
    /// **INVARIANT:** At least 1 (enforced in builder).
    pub(crate) max_concurrent_fetches: usize,
}

impl Default for MonolithConfig {
    fn default() -> Self {
        super::builder::MonolithConfigBuilder::default().into_config()
    }
}
