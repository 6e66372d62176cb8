//! Shared configuration constants for monolith
//!
//! This module contains default values and configuration constants used
//! throughout the codebase to ensure consistency and avoid magic numbers.

/// Default network timeout: 60 seconds
///
/// Applies to every remote GET issued while inlining a page. A slow asset
/// only ever costs its own timeout: on expiry it degrades to empty content.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default bound on concurrently running cache-miss fetches
///
/// Duplicate requests for one asset never count twice: they wait on the
/// fetch already in flight.
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 8;

/// Browser user agent sent with every remote request
///
/// Some CDNs refuse or degrade requests without a browser-like agent, so
/// the identifying header mirrors current Chrome stable.
///
/// Reference: https://chromiumdash.appspot.com/schedule
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";

/// Media type declared for inlined stylesheets
pub const CSS_MEDIA_TYPE: &str = "text/css";

/// Media type declared for inlined scripts
pub const JS_MEDIA_TYPE: &str = "text/javascript";
