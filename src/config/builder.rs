//! Builder for `MonolithConfig`
//!
//! Collects options with sensible defaults and validates them once in
//! [`MonolithConfigBuilder::build`].

use crate::error::{MonolithError, Result};
use crate::utils::{DEFAULT_MAX_CONCURRENT_FETCHES, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};

use super::types::MonolithConfig;

#[derive(Debug, Clone)]
pub struct MonolithConfigBuilder {
    pub(crate) output_as_base64: bool,
    pub(crate) quiet: bool,
    pub(crate) user_agent: String,
    pub(crate) timeout_secs: u64,
    pub(crate) insecure: bool,
    pub(crate) no_css: bool,
    pub(crate) no_js: bool,
    pub(crate) no_images: bool,
    pub(crate) scripts_as_content: bool,
    pub(crate) base_url: Option<String>,
    pub(crate) max_concurrent_fetches: usize,
}

impl Default for MonolithConfigBuilder {
    fn default() -> Self {
        Self {
            output_as_base64: false,
            quiet: false,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            insecure: false,
            no_css: false,
            no_js: false,
            no_images: false,
            scripts_as_content: false,
            base_url: None,
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
        }
    }
}

impl MonolithConfig {
    /// Create a builder for configuring a `MonolithConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> MonolithConfigBuilder {
        MonolithConfigBuilder::default()
    }
}

impl MonolithConfigBuilder {
    /// Validate the collected options and freeze them
    pub fn build(self) -> Result<MonolithConfig> {
        if self.timeout_secs == 0 {
            return Err(MonolithError::Config(
                "timeout must be at least one second".to_string(),
            ));
        }

        if self.max_concurrent_fetches == 0 {
            return Err(MonolithError::Config(
                "max_concurrent_fetches must be at least 1".to_string(),
            ));
        }

        if self.user_agent.trim().is_empty() {
            return Err(MonolithError::Config("user agent cannot be empty".to_string()));
        }

        if let Some(base_url) = &self.base_url
            && base_url.trim().is_empty()
        {
            return Err(MonolithError::Config("base URL cannot be empty".to_string()));
        }

        Ok(self.into_config())
    }

    pub(crate) fn into_config(self) -> MonolithConfig {
        MonolithConfig {
            output_as_base64: self.output_as_base64,
            quiet: self.quiet,
            user_agent: self.user_agent,
            timeout_secs: self.timeout_secs,
            insecure: self.insecure,
            no_css: self.no_css,
            no_js: self.no_js,
            no_images: self.no_images,
            scripts_as_content: self.scripts_as_content,
            base_url: self.base_url,
            max_concurrent_fetches: self.max_concurrent_fetches,
        }
    }
}
